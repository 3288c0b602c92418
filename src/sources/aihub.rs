//! AIHub-derived corpus, fetched from its Hugging Face mirror.
//!
//! There is no local dataset loader: rows are paged out of the Hugging Face
//! datasets-server (`/splits` to find the configuration holding the `train` split,
//! then `/rows` by pages of at most [PAGE_SIZE] rows).
//! The total number of requested rows never exceeds the requested maximum,
//! which mirrors a `train[:max]` slice.
use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use url::Url;

use crate::error::Error;
use crate::lines::{output_path, TextWriter};
use crate::manifest::{CollectionResult, Origin};

pub const DATASET_ID: &str = "shihyunlim/aihub-ko-en-everyday-expression";
pub const DATASETS_SERVER: &str = "https://datasets-server.huggingface.co";
pub const SOURCE_NAME: &str = "AIHub-derived (Hugging Face mirror)";
pub const OUTPUT_FILENAME: &str = "aihub_ko.txt";

/// max rows per `/rows` request accepted by datasets-server.
pub const PAGE_SIZE: u64 = 100;
const SPLIT: &str = "train";
const TEXT_FIELD: &str = "ko";

/// A dataset row, as column name -> value.
pub type Row = serde_json::Map<String, Value>;

#[derive(Deserialize, Debug)]
struct Splits {
    splits: Vec<SplitEntry>,
}

#[derive(Deserialize, Debug)]
struct SplitEntry {
    config: String,
    split: String,
}

#[derive(Deserialize, Debug)]
struct RowsPage {
    rows: Vec<RowEntry>,
    #[serde(default)]
    num_rows_total: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct RowEntry {
    #[serde(default)]
    row_idx: u64,
    row: Row,
    /// columns whose value has been shortened by the server
    #[serde(default)]
    truncated_cells: Vec<String>,
}

impl RowEntry {
    /// Get the row, failing if its text column has been truncated by the server.
    fn into_row(self, dataset: &str) -> Result<Row, Error> {
        if self.truncated_cells.iter().any(|cell| cell == TEXT_FIELD) {
            return Err(Error::Custom(format!(
                "dataset {} row {}: {} value truncated by datasets-server",
                dataset, self.row_idx, TEXT_FIELD
            )));
        }
        Ok(self.row)
    }
}

/// `(offset, length)` of each `/rows` request needed to get `max_rows` rows.
#[derive(Debug)]
pub struct Pages {
    offset: u64,
    max_rows: u64,
}

impl Pages {
    pub fn new(max_rows: u64) -> Self {
        Self {
            offset: 0,
            max_rows,
        }
    }
}

impl Iterator for Pages {
    type Item = (u64, u64);
    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.max_rows {
            return None;
        }
        let length = PAGE_SIZE.min(self.max_rows - self.offset);
        let page = (self.offset, length);
        self.offset += length;
        Some(page)
    }
}

/// Client for a dataset hosted on the Hugging Face hub.
pub struct Aihub {
    client: Client,
    endpoint: Url,
    dataset: String,
    token: Option<String>,
}

impl Aihub {
    /// Create a new client targeting `endpoint` (a datasets-server base url).
    pub fn new(client: Client, endpoint: &str) -> Result<Self, Error> {
        // join() would drop the last path segment otherwise
        let endpoint = if endpoint.ends_with('/') {
            Url::parse(endpoint)?
        } else {
            Url::parse(&format!("{}/", endpoint))?
        };

        Ok(Self {
            client,
            endpoint,
            dataset: DATASET_ID.to_string(),
            token: None,
        })
    }

    /// Use a bearer token on each request (gated or private mirrors).
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn get(&self, url: Url) -> Result<Response, Error> {
        debug!("requesting {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?.error_for_status()?)
    }

    /// Get the name of the configuration holding the `train` split.
    pub fn train_config(&self) -> Result<String, Error> {
        let mut url = self.endpoint.join("splits")?;
        url.query_pairs_mut().append_pair("dataset", &self.dataset);

        let splits: Splits = serde_json::from_reader(self.get(url)?)?;
        splits
            .splits
            .into_iter()
            .find(|entry| entry.split == SPLIT)
            .map(|entry| entry.config)
            .ok_or_else(|| {
                Error::Custom(format!("dataset {} has no {} split", self.dataset, SPLIT))
            })
    }

    fn fetch_rows(&self, config: &str, offset: u64, length: u64) -> Result<RowsPage, Error> {
        let mut url = self.endpoint.join("rows")?;
        url.query_pairs_mut()
            .append_pair("dataset", &self.dataset)
            .append_pair("config", config)
            .append_pair("split", SPLIT)
            .append_pair("offset", &offset.to_string())
            .append_pair("length", &length.to_string());

        Ok(serde_json::from_reader(self.get(url)?)?)
    }

    /// Iterate over the first `max_rows` rows of the `train` split of `config`.
    pub fn rows<'a>(&'a self, config: &'a str, max_rows: u64) -> Rows<'a> {
        Rows {
            hub: self,
            config,
            pages: Pages::new(max_rows),
            current: Vec::new().into_iter(),
            exhausted: false,
        }
    }

    /// Write the non-empty `ko` texts of the first `max_lines` rows into `raw_dir`/[OUTPUT_FILENAME].
    pub fn collect(&self, raw_dir: &Path, max_lines: u64) -> Result<CollectionResult, Error> {
        let out_path = output_path(raw_dir, OUTPUT_FILENAME);

        let config = if max_lines > 0 {
            Some(self.train_config()?)
        } else {
            None
        };

        let mut writer = TextWriter::create(&out_path)?;
        if let Some(config) = &config {
            write_rows(self.rows(config, max_lines), &mut writer)?;
        }
        let lines_written = writer.finish()?;

        info!("[{}] wrote {} lines to {:?}", self.dataset, lines_written, out_path);
        Ok(CollectionResult::new(
            SOURCE_NAME,
            Origin::DatasetId(self.dataset.clone()),
            out_path,
            lines_written,
        ))
    }
}

/// Paging iterator over dataset rows.
///
/// Stops after the last planned page, or as soon as the server returns a short page.
pub struct Rows<'a> {
    hub: &'a Aihub,
    config: &'a str,
    pages: Pages,
    current: std::vec::IntoIter<RowEntry>,
    exhausted: bool,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Row, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(entry.into_row(&self.hub.dataset));
            }
            if self.exhausted {
                return None;
            }
            let (offset, length) = self.pages.next()?;

            match self.hub.fetch_rows(self.config, offset, length) {
                Ok(page) => {
                    let received = page.rows.len() as u64;
                    let end_reached = page
                        .num_rows_total
                        .map_or(false, |total| offset + length >= total);
                    if received < length || end_reached {
                        self.exhausted = true;
                    }
                    self.current = page
                        .rows
                        .into_iter()
                        .take(length as usize)
                        .collect::<Vec<_>>()
                        .into_iter();
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Get the text column of a row, defaulting to an empty string.
pub fn row_text(row: &Row) -> &str {
    match row.get(TEXT_FIELD) {
        Some(Value::String(text)) => text.as_str(),
        Some(Value::Null) | None => "",
        Some(other) => {
            warn!("ignoring non-text {} value: {}", TEXT_FIELD, other);
            ""
        }
    }
}

/// Write the text of each row, skipping empty ones.
pub fn write_rows<I, W>(rows: I, writer: &mut TextWriter<W>) -> Result<(), Error>
where
    I: IntoIterator<Item = Result<Row, Error>>,
    W: Write,
{
    for row in rows {
        let row = row?;
        writer.push(row_text(&row))?;
    }
    Ok(())
}
