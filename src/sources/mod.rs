//! Corpus sources.
//!
//! Each source writes its lines into its own file of the raw directory
//! and reports a [crate::manifest::CollectionResult].
pub mod aihub;
pub mod opus;

pub use aihub::Aihub;
pub use opus::Opus;
