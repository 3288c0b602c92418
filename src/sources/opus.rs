//! OPUS OpenSubtitles (v2024) Korean monolingual dump.
//!
//! The dump is a single gzipped text file. It is streamed and decompressed on the fly,
//! and reading stops as soon as enough lines have been written.
use flate2::read::MultiGzDecoder;
use log::{debug, info};
use reqwest::blocking::Client;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use url::Url;

use crate::error::Error;
use crate::lines::{decode_lossy, output_path, TextWriter};
use crate::manifest::{CollectionResult, Origin};

pub const OPUS_KO_URL: &str = "https://object.pouta.csc.fi/OPUS-OpenSubtitles/v2024/mono/ko.txt.gz";
pub const SOURCE_NAME: &str = "OPUS OpenSubtitles v2024";
pub const OUTPUT_FILENAME: &str = "opus_open_subtitles_ko.txt";

pub struct Opus {
    client: Client,
    url: Url,
}

impl Opus {
    pub fn new(client: Client, url: &str) -> Result<Self, Error> {
        Ok(Self {
            client,
            url: Url::parse(url)?,
        })
    }

    /// Stream the dump and write at most `max_lines` non-empty lines into `raw_dir`/[OUTPUT_FILENAME].
    ///
    /// Lines written before an eventual network or decompression error are kept.
    pub fn collect(&self, raw_dir: &Path, max_lines: u64) -> Result<CollectionResult, Error> {
        let out_path = output_path(raw_dir, OUTPUT_FILENAME);

        debug!("streaming {}", self.url);
        let response = self.client.get(self.url.clone()).send()?.error_for_status()?;

        // concatenated gzip members are read through
        let reader = BufReader::new(MultiGzDecoder::new(response));

        let mut writer = TextWriter::create(&out_path)?;
        write_lines(reader, max_lines, &mut writer)?;
        let lines_written = writer.finish()?;

        info!("[opus] wrote {} lines to {:?}", lines_written, out_path);
        Ok(CollectionResult::new(
            SOURCE_NAME,
            Origin::Url(self.url.to_string()),
            out_path,
            lines_written,
        ))
    }
}

/// Read `reader` line by line, writing non-empty lines until `max_lines` have been written.
///
/// Nothing is read from `reader` once the limit is hit.
pub fn write_lines<R, W>(
    mut reader: R,
    max_lines: u64,
    writer: &mut TextWriter<W>,
) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    while writer.nb_lines() < max_lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        writer.push(&decode_lossy(&buf))?;
    }
    Ok(())
}
