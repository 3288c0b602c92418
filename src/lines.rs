//! Raw line normalisation and the counting text writer.
//!
//! Both collectors funnel their text through [clean_line] and into a [TextWriter],
//! so that every output file holds one non-empty, single-line sentence per line.
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Normalise a raw piece of text into a line suitable for output.
///
/// Leading/trailing whitespace is stripped, and remaining newlines are replaced by a space.
/// Returns [None] if nothing is left after stripping.
pub fn clean_line(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(is_strippable);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.replace('\n', " "))
    }
}

/// Whitespace, plus the information separators (U+001C..=U+001F).
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Decode `bytes` as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }

                // error_len is None on a truncated sequence at the end of input
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => return out,
                }
            }
        }
    }
}

/// Line-oriented writer that counts what it writes.
///
/// Each accepted line is written followed by `\n`.
pub struct TextWriter<W: Write> {
    inner: W,
    nb_lines: u64,
}

impl TextWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        info!("creating {:?}", path);
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TextWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, nb_lines: 0 }
    }

    /// Clean `raw` and write it if anything is left.
    ///
    /// Returns `true` if a line has been written.
    pub fn push(&mut self, raw: &str) -> std::io::Result<bool> {
        match clean_line(raw) {
            Some(line) => {
                self.inner.write_all(line.as_bytes())?;
                self.inner.write_all(b"\n")?;
                self.nb_lines += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// number of lines written so far
    pub fn nb_lines(&self) -> u64 {
        self.nb_lines
    }

    /// Flush the inner writer and return the written line count.
    pub fn finish(mut self) -> std::io::Result<u64> {
        self.inner.flush()?;
        Ok(self.nb_lines)
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.inner
    }
}

/// Join `raw_dir` and `filename`.
pub(crate) fn output_path(raw_dir: &Path, filename: &str) -> PathBuf {
    let mut path = raw_dir.to_path_buf();
    path.push(filename);
    path
}
