//! # kocollect
//!
//! Downloads raw Korean text corpora into a local directory.
//!
//! ```sh
//! kocollect 0.1.0
//! Download raw Korean text from AIHub (Hugging Face mirror) and OPUS OpenSubtitles.
//!
//! USAGE:
//!     kocollect [OPTIONS]
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! OPTIONS:
//!         --aihub-max-lines <aihub-max-lines>    max number of rows requested from AIHub [default: 120000]
//!         --datasets-server <datasets-server>    datasets-server base url [default: https://datasets-server.huggingface.co]
//!         --opus-max-lines <opus-max-lines>      max number of lines written from OPUS [default: 120000]
//!         --opus-url <opus-url>                  url of the gzipped OPUS dump
//!         --raw-dir <raw-dir>                    output directory [default: corpus/raw]
//! ```
//!
//! Set `RUST_LOG=debug` for request-level logging, and `HF_TOKEN` to authenticate against the hub.
//!
//! ```sh
//! kocollect --raw-dir corpus/raw --opus-max-lines 50000
//! ```
use kocollect::{cli, collect, error};
use log::debug;
use structopt::StructOpt;

fn main() -> Result<(), error::Error> {
    env_logger::init();

    let opt = cli::Collect::from_args();
    debug!("cli args\n{:#?}", opt);

    collect::run(&opt)?;
    Ok(())
}
