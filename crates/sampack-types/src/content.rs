use std::cmp::Ordering;
use std::fmt;

use crate::error::TypeError;
use crate::source::SampleSource;

/// Orientation of a sample in whole degrees.
pub type Angle = u32;

/// Largest angle a sample may carry.
pub const MAX_ANGLE: Angle = 180;

/// Angle every content is reset to by [`Content::freeze`].
pub const CANONICAL_ANGLE: Angle = 0;

/// Domain tag prepended to every content hash.
const CONTENT_DOMAIN: &[u8] = b"sampack-content-v1:";

/// A single synthetic sample.
///
/// Two contents with the same `length` and `angle` are the same sample:
/// equality and ordering both go through [`Content::id`], so the sample
/// store collapses them. There is no constructor taking an
/// arbitrary angle; contents come from [`Content::generate`], from copying
/// and mutating an existing one, or from [`Content::from_parts`], which
/// validates its input.
#[derive(Clone, Copy)]
pub struct Content {
    length: f64,
    angle: Angle,
}

impl Content {
    /// Draw a new content from the source.
    ///
    /// The length is drawn first, then the angle through
    /// [`reset_angle_random`](Self::reset_angle_random). A non-finite
    /// length draw is replaced by `0.0`, so every content can be persisted.
    pub fn generate<S: SampleSource + ?Sized>(source: &mut S) -> Self {
        let length = source.next_length();
        let mut content = Self {
            length: if length.is_finite() { length } else { 0.0 },
            angle: CANONICAL_ANGLE,
        };
        content.reset_angle_random(source);
        content
    }

    /// Build a content from persisted attributes.
    pub fn from_parts(length: f64, angle: Angle) -> Result<Self, TypeError> {
        if !length.is_finite() {
            return Err(TypeError::NonFiniteLength(length));
        }
        if angle > MAX_ANGLE {
            return Err(TypeError::AngleOutOfRange(angle));
        }
        Ok(Self { length, angle })
    }

    /// The continuous attribute.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The orientation in degrees.
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Replace the angle with a fresh draw, keeping the length.
    pub fn reset_angle_random<S: SampleSource + ?Sized>(&mut self, source: &mut S) {
        self.angle = source.next_angle().min(MAX_ANGLE);
    }

    /// Reset the angle to [`CANONICAL_ANGLE`].
    pub fn freeze(&mut self) {
        self.angle = CANONICAL_ANGLE;
    }

    /// A copy of this content with the angle reset.
    pub fn frozen(&self) -> Self {
        let mut copy = *self;
        copy.freeze();
        copy
    }

    /// Combined hash of length and angle.
    ///
    /// BLAKE3 over a domain tag, the little-endian IEEE-754 bits of the
    /// length and the little-endian angle, truncated to the first 8 bytes.
    /// The result does not depend on the process or the platform.
    pub fn hash(&self) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(CONTENT_DOMAIN);
        hasher.update(&canonical_bits(self.length).to_le_bytes());
        hasher.update(&self.angle.to_le_bytes());
        let digest = hasher.finalize();
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(word)
    }

    /// Hash of the frozen copy; shared by every angle of the same length.
    pub fn frozen_id(&self) -> u64 {
        self.frozen().hash()
    }

    /// Unique string key: `"<frozen_id>~<hash>-<angle>"`.
    pub fn id(&self) -> String {
        format!("{}~{}-{}", self.frozen_id(), self.hash(), self.angle)
    }
}

/// `-0.0` and `0.0` compare equal, so they must hash equal too.
fn canonical_bits(length: f64) -> u64 {
    if length == 0.0 {
        0
    } else {
        length.to_bits()
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Content {}

impl PartialOrd for Content {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Content {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("length", &self.length)
            .field("angle", &self.angle)
            .finish()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.length, self.angle)
    }
}
