use std::fmt;

use serde::{Deserialize, Serialize};

/// Generation parameters attached to a package when it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub degree: u64,
    pub frame_size: u64,
}

impl Parameters {
    pub fn new(degree: u64, frame_size: u64) -> Self {
        Self { degree, frame_size }
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "params {{")?;
        writeln!(f, "    degree:     {}", self.degree)?;
        writeln!(f, "    frame_size: {}", self.frame_size)?;
        write!(f, "}}")
    }
}
