//! Collection results and the JSON manifest summarizing a run.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the manifest file, written in the raw directory.
pub const MANIFEST_FILENAME: &str = "sources_2_4.json";

/// Where a collection comes from.
///
/// Serialized as a single `dataset_id` or `url` key alongside the other result fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    DatasetId(String),
    Url(String),
}

/// Outcome of a single collector run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CollectionResult {
    pub source_name: String,
    #[serde(flatten)]
    pub origin: Origin,
    pub output_file: PathBuf,
    pub lines_written: u64,
}

impl CollectionResult {
    pub fn new(
        source_name: &str,
        origin: Origin,
        output_file: PathBuf,
        lines_written: u64,
    ) -> Self {
        Self {
            source_name: source_name.to_string(),
            origin,
            output_file,
            lines_written,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Manifest {
    pub generated_at_utc: String,
    pub items: Vec<CollectionResult>,
}

impl Manifest {
    /// Create a manifest stamped with the current UTC time.
    pub fn now(items: Vec<CollectionResult>) -> Self {
        Self::at(Utc::now(), items)
    }

    pub fn at(time: DateTime<Utc>, items: Vec<CollectionResult>) -> Self {
        Self {
            generated_at_utc: time.to_rfc3339_opts(SecondsFormat::Micros, false),
            items,
        }
    }

    /// Serialize as indented JSON and write it to `raw_dir`/[MANIFEST_FILENAME] in one go.
    ///
    /// Returns the path of the written manifest.
    pub fn write_to(&self, raw_dir: &Path) -> Result<PathBuf, Error> {
        let path = raw_dir.join(MANIFEST_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn items() -> Vec<CollectionResult> {
        vec![
            CollectionResult::new(
                "AIHub-derived (Hugging Face mirror)",
                Origin::DatasetId("shihyunlim/aihub-ko-en-everyday-expression".to_string()),
                PathBuf::from("/data/raw/aihub_ko.txt"),
                10,
            ),
            CollectionResult::new(
                "OPUS OpenSubtitles v2024",
                Origin::Url("https://example.org/ko.txt.gz".to_string()),
                PathBuf::from("/data/raw/opus_open_subtitles_ko.txt"),
                3,
            ),
        ]
    }

    #[test]
    fn timestamp_format() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 12).unwrap();
        let manifest = Manifest::at(time, vec![]);
        assert_eq!(manifest.generated_at_utc, "2024-05-01T09:30:12.000000+00:00");
    }

    #[test]
    fn origin_keys() {
        let manifest = Manifest::now(items());
        let value = serde_json::to_value(&manifest).unwrap();

        let aihub = &value["items"][0];
        assert_eq!(aihub["dataset_id"], "shihyunlim/aihub-ko-en-everyday-expression");
        assert!(aihub.get("url").is_none());
        assert_eq!(aihub["lines_written"], 10);

        let opus = &value["items"][1];
        assert_eq!(opus["url"], "https://example.org/ko.txt.gz");
        assert!(opus.get("dataset_id").is_none());
        assert_eq!(opus["output_file"], "/data/raw/opus_open_subtitles_ko.txt");
    }

    #[test]
    fn key_order() {
        let manifest = Manifest::now(items());
        let json = serde_json::to_string_pretty(&manifest).unwrap();

        let positions: Vec<usize> = [
            "\"source_name\"",
            "\"dataset_id\"",
            "\"output_file\"",
            "\"lines_written\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn write_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let mut items = items();
        items[0].source_name = "에이아이허브".to_string();
        let manifest = Manifest::now(items);

        let path = manifest.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(MANIFEST_FILENAME));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("에이아이허브"));
        assert!(content.contains("\n  \"items\": ["));

        let read_back: Manifest = serde_json::from_str(&content).unwrap();
        assert_eq!(read_back, manifest);
    }
}
