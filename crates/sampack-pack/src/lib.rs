//! Package persistence for sampack.
//!
//! A [`Package`] pairs generation [`Parameters`](sampack_types::Parameters)
//! with a [`SampleStore`](sampack_store::SampleStore) and is the unit that
//! gets written to and read from disk.
//!
//! # Architecture
//!
//! - **Package**: generation, save/load, lookup by id
//! - **Codec**: explicit, versioned archive records in a checksummed binary
//!   encoding or a JSON text encoding
//! - **PackConfig**: defaults and TOML loading for the CLI
//!
//! A failed load never leaves a partially populated package behind.

pub mod codec;
pub mod config;
pub mod error;
pub mod package;

pub use codec::{Archive, ArchiveFormat, FORMAT_VERSION, MAGIC};
pub use config::PackConfig;
pub use error::{PackError, PackResult};
pub use package::Package;
