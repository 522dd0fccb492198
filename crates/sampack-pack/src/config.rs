use std::path::Path;

use serde::{Deserialize, Serialize};

use sampack_types::Parameters;

use crate::codec::ArchiveFormat;
use crate::error::{PackError, PackResult};

/// Settings for building and writing a package.
///
/// Every field is optional in a TOML file; missing keys take the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Degree recorded in the package parameters.
    pub degree: u64,
    /// Frame size recorded in the package parameters.
    pub frame_size: u64,
    /// Angle variants generated per base content.
    pub angles_per_content: usize,
    /// Encoding used when saving.
    pub format: ArchiveFormat,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            degree: 4,
            frame_size: 128,
            angles_per_content: 4,
            format: ArchiveFormat::Binary,
        }
    }
}

impl PackConfig {
    /// The parameters a package built from this config carries.
    pub fn parameters(&self) -> Parameters {
        Parameters::new(self.degree, self.frame_size)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> PackResult<Self> {
        toml::from_str(text)
            .map_err(|e| PackError::Config(e.to_string()))
    }

    /// Read a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> PackResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
