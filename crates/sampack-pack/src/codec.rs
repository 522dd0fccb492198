//! Versioned archive encoding for packages.
//!
//! Every archive carries the same logical record: the package parameters
//! followed by its samples in identity order. Two encodings exist.
//!
//! Binary ([`ArchiveFormat::Binary`]):
//!
//! ```text
//! [4 bytes: magic "SPAK"]
//! [4 bytes: format version (big-endian u32)]
//! [4 bytes: sample count (big-endian u32)]
//! [4 bytes: CRC32 of the compressed payload (big-endian u32)]
//! [N bytes: zstd-compressed bincode payload]
//! [32 bytes: BLAKE3 checksum of everything above]
//! ```
//!
//! Text ([`ArchiveFormat::Text`]): the record as pretty-printed JSON,
//! including its `version` field.
//!
//! [`decode`] picks the encoding from the leading bytes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sampack_types::{Angle, Content, Parameters};

use crate::error::{PackError, PackResult};

/// Leading bytes of a binary archive.
pub const MAGIC: &[u8; 4] = b"SPAK";

/// Current archive format version.
pub const FORMAT_VERSION: u32 = 1;

/// Magic + version + sample count.
const HEADER_SIZE: usize = 12;
const CRC_SIZE: usize = 4;
const CHECKSUM_SIZE: usize = 32;
const ZSTD_LEVEL: i32 = 3;

/// On-disk encoding of a package.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// Compressed, checksummed binary archive.
    #[default]
    Binary,
    /// Human-readable JSON archive.
    Text,
}

/// The decoded contents of an archive.
#[derive(Clone, Debug, PartialEq)]
pub struct Archive {
    pub params: Parameters,
    /// Samples in the order they were written.
    pub samples: Vec<Content>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct ContentRecord {
    length: f64,
    angle: Angle,
}

impl From<&Content> for ContentRecord {
    fn from(content: &Content) -> Self {
        Self {
            length: content.length(),
            angle: content.angle(),
        }
    }
}

impl TryFrom<ContentRecord> for Content {
    type Error = PackError;

    fn try_from(record: ContentRecord) -> PackResult<Self> {
        Ok(Content::from_parts(record.length, record.angle)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ParametersRecord {
    degree: u64,
    frame_size: u64,
}

impl From<&Parameters> for ParametersRecord {
    fn from(params: &Parameters) -> Self {
        Self {
            degree: params.degree,
            frame_size: params.frame_size,
        }
    }
}

impl From<ParametersRecord> for Parameters {
    fn from(record: ParametersRecord) -> Self {
        Parameters::new(record.degree, record.frame_size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PackageRecord {
    version: u32,
    params: ParametersRecord,
    samples: Vec<ContentRecord>,
}

impl PackageRecord {
    fn into_archive(self) -> PackResult<Archive> {
        if self.version != FORMAT_VERSION {
            return Err(PackError::UnsupportedVersion(self.version));
        }
        let samples = self
            .samples
            .into_iter()
            .map(Content::try_from)
            .collect::<PackResult<Vec<_>>>()?;
        Ok(Archive {
            params: self.params.into(),
            samples,
        })
    }
}

/// Encode parameters and samples in the requested format.
pub fn encode<'a, I>(params: &Parameters, samples: I, format: ArchiveFormat) -> PackResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Content>,
{
    let record = PackageRecord {
        version: FORMAT_VERSION,
        params: params.into(),
        samples: samples.into_iter().map(ContentRecord::from).collect(),
    };
    match format {
        ArchiveFormat::Binary => encode_binary(&record),
        ArchiveFormat::Text => serde_json::to_vec_pretty(&record)
            .map_err(|e| PackError::Serialization(e.to_string())),
    }
}

/// Decode an archive of either format.
pub fn decode(bytes: &[u8]) -> PackResult<Archive> {
    match detect(bytes) {
        ArchiveFormat::Binary => decode_binary(bytes),
        ArchiveFormat::Text => decode_text(bytes),
    }
}

/// Guess the encoding of `bytes` from its leading magic.
pub fn detect(bytes: &[u8]) -> ArchiveFormat {
    if bytes.starts_with(MAGIC) {
        ArchiveFormat::Binary
    } else {
        ArchiveFormat::Text
    }
}

fn encode_binary(record: &PackageRecord) -> PackResult<Vec<u8>> {
    let count = u32::try_from(record.samples.len())
        .map_err(|_| PackError::Serialization("too many samples for one archive".into()))?;
    let payload = bincode::serialize(record)
        .map_err(|e| PackError::Serialization(e.to_string()))?;
    let compressed = zstd::encode_all(payload.as_slice(), ZSTD_LEVEL)
        .map_err(|e| PackError::Compression(e.to_string()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE + CRC_SIZE + compressed.len() + CHECKSUM_SIZE);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
    out.extend_from_slice(&count.to_be_bytes());
    out.extend_from_slice(&crc32fast::hash(&compressed).to_be_bytes());
    out.extend_from_slice(&compressed);

    let checksum = *blake3::hash(&out).as_bytes();
    out.extend_from_slice(&checksum);

    debug!(
        samples = count,
        payload = payload.len(),
        compressed = compressed.len(),
        "encoded binary archive"
    );
    Ok(out)
}

fn decode_binary(bytes: &[u8]) -> PackResult<Archive> {
    let needed = HEADER_SIZE + CRC_SIZE + CHECKSUM_SIZE;
    if bytes.len() < needed {
        return Err(PackError::Truncated {
            needed,
            actual: bytes.len(),
        });
    }
    if &bytes[0..4] != MAGIC {
        return Err(PackError::InvalidMagic {
            expected: String::from_utf8_lossy(MAGIC).into(),
            actual: String::from_utf8_lossy(&bytes[0..4]).into(),
        });
    }
    let version = read_u32(bytes, 4);
    if version != FORMAT_VERSION {
        return Err(PackError::UnsupportedVersion(version));
    }

    let (body, trailer) = bytes.split_at(bytes.len() - CHECKSUM_SIZE);
    if blake3::hash(body).as_bytes() != trailer {
        return Err(PackError::ChecksumMismatch);
    }

    let count = read_u32(body, 8) as usize;
    let expected_crc = read_u32(body, HEADER_SIZE);
    let compressed = &body[HEADER_SIZE + CRC_SIZE..];
    if crc32fast::hash(compressed) != expected_crc {
        return Err(PackError::CrcMismatch);
    }

    let payload = zstd::decode_all(compressed)
        .map_err(|e| PackError::Compression(e.to_string()))?;
    let record: PackageRecord = bincode::deserialize(&payload)
        .map_err(|e| PackError::Serialization(e.to_string()))?;
    if record.samples.len() != count {
        return Err(PackError::CountMismatch {
            expected: count,
            actual: record.samples.len(),
        });
    }

    debug!(samples = count, "decoded binary archive");
    record.into_archive()
}

fn decode_text(bytes: &[u8]) -> PackResult<Archive> {
    let record: PackageRecord = serde_json::from_slice(bytes)
        .map_err(|e| PackError::Serialization(e.to_string()))?;
    debug!(samples = record.samples.len(), "decoded text archive");
    record.into_archive()
}

/// Big-endian `u32` at `at`; callers check bounds first.
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampack_types::RngSource;

    fn sample_set(n: usize) -> Vec<Content> {
        let mut source = RngSource::seeded(11);
        (0..n).map(|_| Content::generate(&mut source)).collect()
    }

    fn params() -> Parameters {
        Parameters::new(4, 128)
    }

    #[test]
    fn binary_roundtrip() {
        let samples = sample_set(20);
        let bytes = encode(&params(), &samples, ArchiveFormat::Binary).unwrap();
        assert!(bytes.starts_with(MAGIC));

        let archive = decode(&bytes).unwrap();
        assert_eq!(archive.params, params());
        assert_eq!(archive.samples, samples);
    }

    #[test]
    fn text_roundtrip_is_exact() {
        let samples = sample_set(20);
        let bytes = encode(&params(), &samples, ArchiveFormat::Text).unwrap();
        assert_eq!(detect(&bytes), ArchiveFormat::Text);

        let archive = decode(&bytes).unwrap();
        assert_eq!(archive.params, params());
        for (a, b) in archive.samples.iter().zip(&samples) {
            assert_eq!(a.length().to_bits(), b.length().to_bits());
            assert_eq!(a.angle(), b.angle());
        }
    }

    #[test]
    fn text_archive_is_readable() {
        let c = Content::from_parts(0.25, 10).unwrap();
        let bytes = encode(&params(), [&c], ArchiveFormat::Text).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"version\": 1"));
        assert!(text.contains("\"frame_size\": 128"));
        assert!(text.contains("\"length\": 0.25"));
        assert!(text.contains("\"angle\": 10"));
    }

    #[test]
    fn empty_archive_roundtrip() {
        let bytes = encode(&params(), [], ArchiveFormat::Binary).unwrap();
        let archive = decode(&bytes).unwrap();
        assert!(archive.samples.is_empty());
        assert_eq!(archive.params, params());
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let err = decode(b"SPAK\0\0").unwrap_err();
        assert!(matches!(err, PackError::Truncated { .. }));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = encode(&params(), &sample_set(3), ArchiveFormat::Binary).unwrap();
        bytes[4..8].copy_from_slice(&99u32.to_be_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, PackError::UnsupportedVersion(99)));
    }

    #[test]
    fn flipped_byte_fails_checksum() {
        let mut bytes = encode(&params(), &sample_set(3), ArchiveFormat::Binary).unwrap();
        let mid = HEADER_SIZE + CRC_SIZE + 2;
        bytes[mid] ^= 0xFF;
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, PackError::ChecksumMismatch));
    }

    #[test]
    fn payload_corruption_with_fixed_checksum_fails_crc() {
        let mut bytes = encode(&params(), &sample_set(3), ArchiveFormat::Binary).unwrap();
        let body_len = bytes.len() - CHECKSUM_SIZE;
        bytes[HEADER_SIZE + CRC_SIZE + 2] ^= 0xFF;
        let checksum = *blake3::hash(&bytes[..body_len]).as_bytes();
        bytes[body_len..].copy_from_slice(&checksum);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, PackError::CrcMismatch));
    }

    #[test]
    fn header_count_must_match_payload() {
        let mut bytes = encode(&params(), &sample_set(3), ArchiveFormat::Binary).unwrap();
        let body_len = bytes.len() - CHECKSUM_SIZE;
        bytes[8..12].copy_from_slice(&7u32.to_be_bytes());
        let checksum = *blake3::hash(&bytes[..body_len]).as_bytes();
        bytes[body_len..].copy_from_slice(&checksum);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            PackError::CountMismatch {
                expected: 7,
                actual: 3
            }
        ));
    }

    #[test]
    fn malformed_text_is_a_serialization_error() {
        let err = decode(b"{ not json").unwrap_err();
        assert!(matches!(err, PackError::Serialization(_)));
    }

    #[test]
    fn text_with_future_version_is_rejected() {
        let json = br#"{"version":2,"params":{"degree":1,"frame_size":2},"samples":[]}"#;
        let err = decode(json).unwrap_err();
        assert!(matches!(err, PackError::UnsupportedVersion(2)));
    }

    #[test]
    fn out_of_range_angle_is_rejected() {
        let json = br#"{"version":1,"params":{"degree":1,"frame_size":2},
            "samples":[{"length":0.1,"angle":200}]}"#;
        let err = decode(json).unwrap_err();
        assert!(matches!(err, PackError::InvalidSample(_)));
    }

    #[test]
    fn archive_format_serde_names() {
        assert_eq!(
            serde_json::to_string(&ArchiveFormat::Binary).unwrap(),
            "\"binary\""
        );
        let text: ArchiveFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(text, ArchiveFormat::Text);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_bytes_never_panic(
                tail in proptest::collection::vec(any::<u8>(), 0..256),
            ) {
                let mut bytes = MAGIC.to_vec();
                bytes.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
                bytes.extend_from_slice(&tail);
                prop_assert!(decode(&bytes).is_err());
                let _ = decode(&tail);
            }

            #[test]
            fn any_flipped_byte_is_rejected(
                n in 1usize..8,
                pos in any::<prop::sample::Index>(),
                bit in 0u8..8,
            ) {
                let samples = sample_set(n);
                let mut bytes = encode(&params(), &samples, ArchiveFormat::Binary).unwrap();
                let at = pos.index(bytes.len());
                bytes[at] ^= 1 << bit;
                prop_assert!(decode(&bytes).is_err());
            }
        }
    }
}
