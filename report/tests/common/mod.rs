//! FILENAME: report/tests/common/mod.rs
//! Fixtures for report integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const COSTS_RESPONSE: &str = r#"{
    "count": 6,
    "request": {"granularity": "monthly", "start_date": "2025-04-01", "end_date": "2025-05-31"},
    "dates": ["2025-04", "2025-05"],
    "groups": ["environment", "region"],
    "data": [
        {"environment": "production", "region": "eu-west-1", "date": "2025-04", "cost": "23966.5"},
        {"environment": "production", "region": "eu-west-1", "date": "2025-05", "cost": "24757.25"},
        {"environment": "production", "region": "eu-west-2", "date": "2025-05", "cost": "5031.75"},
        {"environment": "development", "region": "eu-west-1", "date": "2025-04", "cost": "16624.5"},
        {"environment": "development", "region": "global", "date": "2025-05", "cost": "283.25"},
        {"environment": "backup", "region": "eu-west-2", "date": "2025-04", "cost": "3169.75"}
    ]
}"#;

pub const UPTIME_RESPONSE: &str = r#"{
    "count": 5,
    "request": {"granularity": "monthly", "start_date": "2025-04-01", "end_date": "2025-06-30"},
    "groups": ["team"],
    "data": [
        {"team": "sirius", "date": "2025-04", "average": "99.5"},
        {"team": "sirius", "date": "2025-05", "average": "100"},
        {"team": "orion", "date": "2025-06", "average": "98"},
        {"team": "vega", "date": "2025-04", "average": "100"},
        {"team": "vega", "date": "2025-06", "average": "99"}
    ]
}"#;

/// A temporary directory holding response and config files.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Writes `contents` to `name` and returns the full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
