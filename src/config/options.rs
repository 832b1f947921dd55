// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::consts::*;
use crate::error::{Error, Result};
use crate::file::looks_like_dir_hint;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Publisher {
    Elsevier,
    Springer,
    Wiley,
}

impl Publisher {
    pub fn url_template(&self) -> &'static str {
        match self {
            Publisher::Elsevier => ELSEVIER_URL,
            Publisher::Springer => SPRINGER_URL,
            Publisher::Wiley => WILEY_URL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Publisher::Elsevier => "elsevier",
            Publisher::Springer => "springer",
            Publisher::Wiley => "wiley",
        }
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JournalSelector {
    /// `start..end`, end exclusive
    Range { start: u32, end: u32 },
    Ids(Vec<String>),
    /// Spreadsheet or CSV with an id column
    Sheet(PathBuf),
}

impl Default for JournalSelector {
    fn default() -> Self {
        JournalSelector::Range { start: DEFAULT_START_INDEX, end: DEFAULT_END_INDEX }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub publisher: Publisher,
    pub journals: JournalSelector,
    pub pattern: String,
    /// Overrides the publisher's default page template.
    pub url_template: Option<String>,
    pub pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            publisher: Publisher::Springer,
            journals: JournalSelector::default(),
            pattern: s!(DEFAULT_PATTERN),
            url_template: None,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

impl ScrapeOptions {
    pub fn template(&self) -> &str {
        self.url_template
            .as_deref()
            .unwrap_or_else(|| self.publisher.url_template())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator; `None` for formats that aren't delimited text.
    pub fn delim(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// File, or directory to receive the default file name. `None` → `out/`.
    pub out: Option<PathBuf>,
    pub file_stem: String,
    pub include_headers: bool,
    pub checkpoint_every: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out: None,
            file_stem: s!(DEFAULT_BOARDS_FILE),
            include_headers: true,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
        }
    }
}

impl ExportOptions {
    /// Final output file. A user-supplied file name keeps its extension;
    /// directories get `<file_stem>.<ext>`.
    pub fn out_path(&self) -> PathBuf {
        let default_name = format!("{}.{}", self.file_stem, self.format.ext());
        match &self.out {
            None => PathBuf::from(DEFAULT_OUT_DIR).join(default_name),
            Some(p) if p.is_dir() || looks_like_dir_hint(p) => p.join(default_name),
            Some(p) => p.clone(),
        }
    }
}

static ISSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{3}[0-9Xx]$").expect("valid ISSN regex"));

/// Expand "12000-12005,12186" into a sorted, deduplicated id list.
/// ISSNs ("0022-3514") are single ids, never ranges.
pub fn parse_ids_list(s: &str) -> Result<Vec<String>> {
    let mut out: Vec<u64> = Vec::new();
    let mut named: Vec<String> = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }

        if ISSN.is_match(part) {
            named.push(s!(part));
            continue;
        }

        let range = part.split_once('-').and_then(|(a, b)| {
            Some((a.trim().parse::<u64>().ok()?, b.trim().parse::<u64>().ok()?))
        });
        match range {
            Some((a, b)) => {
                if a > b {
                    return Err(Error::input(format!("Invalid range: {}", part)));
                }
                out.extend(a..=b);
            }
            // Elsevier slugs are ids too
            None => match part.parse::<u64>() {
                Ok(v) => out.push(v),
                Err(_) => named.push(s!(part)),
            },
        }
    }

    out.sort_unstable();
    out.dedup();
    named.sort();
    named.dedup();

    let mut ids: Vec<String> = out.into_iter().map(|v| v.to_string()).collect();
    ids.extend(named);
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_list_expands_ranges() {
        let ids = parse_ids_list("5, 1-3,2").unwrap();
        assert_eq!(ids, vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn ids_list_rejects_reversed_range() {
        assert!(parse_ids_list("9-3").is_err());
    }

    #[test]
    fn all_digit_issn_is_one_id() {
        assert_eq!(parse_ids_list("0022-3514").unwrap(), vec!["0022-3514"]);
        assert_eq!(
            parse_ids_list("1532-2882, 3-4").unwrap(),
            vec!["3", "4", "1532-2882"]
        );
    }

    #[test]
    fn ids_list_keeps_slugs_and_issns() {
        let ids = parse_ids_list("journal-of-tests,1234-567X,7").unwrap();
        assert_eq!(ids, vec!["7", "1234-567X", "journal-of-tests"]);
    }

    #[test]
    fn out_path_defaults_and_dir_hints() {
        let mut opts = ExportOptions::default();
        assert_eq!(opts.out_path(), PathBuf::from("out").join("editors.csv"));

        opts.format = ExportFormat::Json;
        opts.out = Some(PathBuf::from("somewhere/"));
        assert_eq!(opts.out_path(), PathBuf::from("somewhere/").join("editors.json"));

        // user extension wins over format
        opts.out = Some(PathBuf::from("boards.txt"));
        assert_eq!(opts.out_path(), PathBuf::from("boards.txt"));
    }

    #[test]
    fn template_override() {
        let mut opts = ScrapeOptions::default();
        assert_eq!(opts.template(), SPRINGER_URL);
        opts.url_template = Some(s!("http://localhost/{id}"));
        assert_eq!(opts.template(), "http://localhost/{id}");
    }
}
