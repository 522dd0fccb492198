use thiserror::Error;

use crate::content::Angle;

/// Errors produced when constructing types from untrusted values.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("angle out of range: {0} (expected 0..=180)")]
    AngleOutOfRange(Angle),

    #[error("length is not finite: {0}")]
    NonFiniteLength(f64),
}
