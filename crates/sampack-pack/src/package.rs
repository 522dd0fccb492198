//! The package: parameters plus a sample store, the unit of persistence.

use std::path::Path;

use tracing::{debug, info, warn};

use sampack_store::{Iter, SampleStore};
use sampack_types::{Content, Parameters, SampleSource};

use crate::codec::{self, ArchiveFormat};
use crate::config::PackConfig;
use crate::error::{PackError, PackResult};

/// Parameters and samples, generated in memory or restored from an archive.
#[derive(Clone, Debug, Default)]
pub struct Package {
    params: Parameters,
    samples: SampleStore,
    loaded: bool,
}

impl Package {
    /// Create an empty package with the given parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            samples: SampleStore::new(),
            loaded: false,
        }
    }

    /// Create an empty package carrying the config's parameters.
    pub fn from_config(config: &PackConfig) -> Self {
        Self::new(config.parameters())
    }

    /// Read a package from an archive file.
    pub fn open(path: impl AsRef<Path>) -> PackResult<Self> {
        let mut package = Self::default();
        package.load(path)?;
        Ok(package)
    }

    /// Decode a package from archive bytes of either format.
    pub fn from_bytes(bytes: &[u8]) -> PackResult<Self> {
        let archive = codec::decode(bytes)?;
        Ok(Self {
            params: archive.params,
            samples: archive.samples.into_iter().collect(),
            loaded: true,
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Number of distinct samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns `true` once the package has been restored from an archive.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Read access to every index over the samples.
    pub fn store(&self) -> &SampleStore {
        &self.samples
    }

    /// Samples in identity order.
    pub fn iter(&self) -> Iter<'_> {
        self.samples.iter()
    }

    /// Look up a sample by id.
    pub fn get(&self, id: &str) -> PackResult<&Content> {
        self.samples
            .get(id)
            .ok_or_else(|| PackError::SampleNotFound(id.to_string()))
    }

    /// Generate `contents` base contents with `angles` variants each.
    ///
    /// Each variant copies its base and draws a new angle, so variants share
    /// a length but not necessarily an angle. Variants that repeat an angle
    /// collapse in the store. Returns the number of variants produced, which
    /// is `contents * angles` regardless of how many were distinct.
    pub fn generate<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
        contents: usize,
        angles: usize,
    ) -> usize {
        let before = self.samples.len();
        let mut count = 0;
        for _ in 0..contents {
            let base = Content::generate(source);
            for _ in 0..angles {
                let mut variant = base;
                variant.reset_angle_random(source);
                if !self.samples.insert(variant) {
                    debug!(id = %variant.id(), "variant collapsed into existing sample");
                }
                count += 1;
            }
        }
        info!(
            produced = count,
            added = self.samples.len() - before,
            total = self.samples.len(),
            "generated samples"
        );
        count
    }

    /// Encode the package in the given format.
    pub fn to_bytes(&self, format: ArchiveFormat) -> PackResult<Vec<u8>> {
        codec::encode(&self.params, &self.samples, format)
    }

    /// Save in the default (binary) format.
    pub fn save(&self, path: impl AsRef<Path>) -> PackResult<()> {
        self.save_as(path, ArchiveFormat::default())
    }

    /// Save in the given format.
    pub fn save_as(&self, path: impl AsRef<Path>, format: ArchiveFormat) -> PackResult<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(format)?;
        std::fs::write(path, &bytes)?;
        info!(
            path = %path.display(),
            ?format,
            version = codec::FORMAT_VERSION,
            samples = self.samples.len(),
            bytes = bytes.len(),
            "package saved"
        );
        Ok(())
    }

    /// Replace this package's contents with the archive at `path`.
    ///
    /// The archive is fully decoded before anything is replaced; on error
    /// the package is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> PackResult<()> {
        let path = path.as_ref();
        let restored = match std::fs::read(path)
            .map_err(PackError::from)
            .and_then(|bytes| Self::from_bytes(&bytes))
        {
            Ok(restored) => restored,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "package load failed");
                return Err(e);
            }
        };

        *self = restored;
        info!(
            path = %path.display(),
            version = codec::FORMAT_VERSION,
            samples = self.samples.len(),
            "package loaded"
        );
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Package {
    type Item = &'a Content;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
