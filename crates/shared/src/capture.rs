//! Records left behind by the camera capture helper.
//!
//! The helper writes the most recent photo as
//! `{"photo": "/path/photo.jpg", "timestamp": "2024-05-10T12:30:45.123456"}`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub photo: PathBuf,
    pub timestamp: NaiveDateTime,
}

impl CaptureRecord {
    pub fn load(path: &Path) -> InventoryResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            InventoryError::Validation(format!(
                "could not read capture record '{}': {err}",
                path.display()
            ))
        })?;
        Self::parse(&raw).map_err(|err| {
            InventoryError::Validation(format!(
                "malformed capture record '{}': {err}",
                path.display()
            ))
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn is_fresh(&self, now: NaiveDateTime, max_age: Duration) -> bool {
        let age = now.signed_duration_since(self.timestamp);
        age >= Duration::zero() && age <= max_age
    }

    pub fn photo_path(&self) -> String {
        self.photo.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn at(raw: &str) -> NaiveDateTime {
        raw.parse().expect("timestamp")
    }

    #[test]
    fn parses_helper_output_with_fractional_seconds() {
        let record = CaptureRecord::parse(
            r#"{"photo": "/home/pi/captures/photo_2024-05-10_12-30-45.jpg", "timestamp": "2024-05-10T12:30:45.123456"}"#,
        )
        .expect("parse");
        assert_eq!(
            record.photo,
            PathBuf::from("/home/pi/captures/photo_2024-05-10_12-30-45.jpg")
        );
        assert_eq!(record.timestamp, at("2024-05-10T12:30:45.123456"));
    }

    #[test]
    fn freshness_window_excludes_old_and_future_captures() {
        let record = CaptureRecord {
            photo: PathBuf::from("photo.jpg"),
            timestamp: at("2024-05-10T12:00:00"),
        };
        let window = Duration::minutes(30);
        assert!(record.is_fresh(at("2024-05-10T12:29:00"), window));
        assert!(!record.is_fresh(at("2024-05-10T12:31:00"), window));
        assert!(!record.is_fresh(at("2024-05-10T11:59:00"), window));
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        assert!(CaptureRecord::load(&missing).is_err());

        let malformed = dir.path().join("last_capture.json");
        let mut file = fs::File::create(&malformed).expect("create");
        file.write_all(b"{\"photo\": 12}").expect("write");
        let err = CaptureRecord::load(&malformed).expect_err("malformed");
        assert!(err.to_string().contains("malformed capture record"));
    }
}
