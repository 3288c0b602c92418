//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kocollect",
    about = "Download raw Korean text from AIHub (Hugging Face mirror) and OPUS OpenSubtitles."
)]
/// Collect command and parameters.
///
/// ```sh
/// kocollect 0.1.0
///
/// USAGE:
///     kocollect [OPTIONS]
///
/// OPTIONS:
///         --aihub-max-lines <aihub-max-lines>    max number of rows requested from AIHub [default: 120000]
///         --datasets-server <datasets-server>    datasets-server base url
///         --opus-max-lines <opus-max-lines>      max number of lines written from OPUS [default: 120000]
///         --opus-url <opus-url>                  url of the gzipped OPUS dump
///         --raw-dir <raw-dir>                    output directory [default: corpus/raw]
/// ```
pub struct Collect {
    #[structopt(
        parse(from_os_str),
        long = "raw-dir",
        help = "output directory",
        default_value = "corpus/raw"
    )]
    pub raw_dir: PathBuf,
    #[structopt(
        long = "aihub-max-lines",
        help = "max number of rows requested from AIHub",
        default_value = "120000"
    )]
    pub aihub_max_lines: u64,
    #[structopt(
        long = "opus-max-lines",
        help = "max number of lines written from OPUS",
        default_value = "120000"
    )]
    pub opus_max_lines: u64,
    #[structopt(
        long = "datasets-server",
        help = "datasets-server base url",
        default_value = "https://datasets-server.huggingface.co"
    )]
    pub datasets_server: String,
    #[structopt(
        long = "opus-url",
        help = "url of the gzipped OPUS dump",
        default_value = "https://object.pouta.csc.fi/OPUS-OpenSubtitles/v2024/mono/ko.txt.gz"
    )]
    pub opus_url: String,
}
