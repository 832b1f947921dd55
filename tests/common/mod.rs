// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use eb_scrape::{core::PageSource, Error, Result};

pub fn fixture(publisher: &str, name: &str) -> String {
    fs::read_to_string(fixtures_dir(publisher).join(name)).unwrap()
}

pub fn fixtures_dir(publisher: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(publisher)
}

/// Serves canned pages; unknown ids answer 404. Remembers what was asked.
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, String>,
    pub requested: Vec<String>,
    /// File to snapshot before each fetch (checkpoint tests).
    pub watch: Option<PathBuf>,
    pub snapshots: Vec<String>,
}

impl FakeSource {
    pub fn with(mut self, id: &str, html: impl Into<String>) -> Self {
        self.pages.insert(id.to_string(), html.into());
        self
    }
}

impl PageSource for FakeSource {
    fn fetch(&mut self, journal_id: &str, url: &str) -> Result<String> {
        self.requested.push(url.to_string());
        if let Some(path) = &self.watch {
            self.snapshots.push(fs::read_to_string(path).unwrap_or_default());
        }
        self.pages
            .get(journal_id)
            .cloned()
            .ok_or_else(|| Error::Status { url: url.to_string(), status: 404 })
    }

    fn is_remote(&self) -> bool { false }
}
