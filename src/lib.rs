//! # kocollect
//!
//! Raw Korean text acquisition from two sources:
//!
//! - an AIHub-derived dataset mirrored on the Hugging Face hub,
//! - the OPUS OpenSubtitles v2024 Korean monolingual dump.
//!
//! Each source is written into a line-delimited text file, and a JSON manifest
//! records what has been collected and from where.
//! No cleaning or deduplication is done beyond dropping empty lines.
pub mod cli;
pub mod collect;
pub mod error;
pub mod lines;
pub mod manifest;
pub mod sources;
