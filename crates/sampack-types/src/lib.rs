//! Foundation types for sampack.
//!
//! Every sample held by a package is a [`Content`]: a continuous `length`
//! and a discrete `angle`. The keys the sample store indexes on are all
//! derived from those two attributes:
//!
//! - [`Content::hash`] -- the content key
//! - [`Content::frozen_id`] -- the hash of the content with its angle reset
//! - [`Content::id`] -- the unique string key, `"<frozen_id>~<hash>-<angle>"`
//!
//! Randomness is never ambient. Generation takes a [`SampleSource`], either
//! an [`RngSource`] wrapping any `rand` generator or a [`SequenceSource`]
//! replaying fixed draws.

pub mod content;
pub mod error;
pub mod params;
pub mod source;

pub use content::{Angle, Content, CANONICAL_ANGLE, MAX_ANGLE};
pub use error::TypeError;
pub use params::Parameters;
pub use source::{RngSource, SampleSource, SequenceSource};
