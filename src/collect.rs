//! Sequential collection run: both sources, then the manifest.
use log::debug;
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Collect;
use crate::error::Error;
use crate::manifest::Manifest;
use crate::sources::{Aihub, Opus};

/// Environment variable holding an optional Hugging Face token.
pub const HF_TOKEN_VAR: &str = "HF_TOKEN";

/// Create `raw_dir` (and its parents) if needed, and return its absolute path.
pub fn prepare_raw_dir(raw_dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(raw_dir)?;
    let raw_dir = raw_dir.canonicalize()?;
    debug!("using raw directory {:?}", raw_dir);
    Ok(raw_dir)
}

/// Build the HTTP client shared by both sources.
///
/// The whole-request timeout is disabled since the OPUS dump is streamed for as long as needed.
pub fn build_client() -> Result<Client, Error> {
    Ok(Client::builder().timeout(None::<Duration>).build()?)
}

/// Run AIHub then OPUS collection, and write the manifest.
///
/// Returns the path of the written manifest.
pub fn run(opt: &Collect) -> Result<PathBuf, Error> {
    let raw_dir = prepare_raw_dir(&opt.raw_dir)?;

    let client = build_client()?;
    let aihub = Aihub::new(client.clone(), &opt.datasets_server)?
        .with_token(std::env::var(HF_TOKEN_VAR).ok());
    let opus = Opus::new(client, &opt.opus_url)?;

    println!("[collect] collecting AIHub (2)");
    let aihub_meta = aihub.collect(&raw_dir, opt.aihub_max_lines)?;
    println!("[collect] aihub lines: {}", aihub_meta.lines_written);

    println!("[collect] collecting OPUS OpenSubtitles (4)");
    let opus_meta = opus.collect(&raw_dir, opt.opus_max_lines)?;
    println!("[collect] opus lines: {}", opus_meta.lines_written);

    let manifest = Manifest::now(vec![aihub_meta, opus_meta]);
    let manifest_path = manifest.write_to(&raw_dir)?;
    println!("[collect] metadata: {}", manifest_path.display());

    Ok(manifest_path)
}
