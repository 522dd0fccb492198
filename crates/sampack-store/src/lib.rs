//! Multi-index sample store for sampack.
//!
//! A [`SampleStore`] owns every [`Content`](sampack_types::Content) exactly
//! once and exposes five views over that single collection:
//!
//! - identity order -- [`SampleStore::iter`], ascending by `id()`
//! - id -- [`SampleStore::get`]
//! - content hash -- [`SampleStore::by_hash`]
//! - angle -- [`SampleStore::by_angle`], [`SampleStore::by_angle_range`]
//! - frozen id -- [`SampleStore::by_frozen_id`]
//!
//! # Design Rules
//!
//! 1. The id-keyed map is the only owner of sample data.
//! 2. Secondary indexes hold ids, never copies of samples.
//! 3. [`SampleStore::insert`], [`SampleStore::remove`] and
//!    [`SampleStore::clear`] are the only mutations, and each updates every
//!    view before returning.

pub mod store;

pub use store::{Iter, SampleStore};
