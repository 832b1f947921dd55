// src/journals.rs
//
// The work list: which journals to visit, and where their board pages are.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::config::options::{JournalSelector, Publisher};
use crate::error::{Error, Result};

const ID_COLUMNS: &[&str] = &["id", "journal_id", "journalid", "issn", "slug"];
const TITLE_COLUMNS: &[&str] = &["title", "journal_title", "journaltitle", "journal"];
const URL_COLUMNS: &[&str] = &["url", "link", "href"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Journal {
    pub id: String,
    pub title: Option<String>,
    /// Explicit page URL; wins over the publisher template.
    pub url: Option<String>,
}

impl Journal {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), title: None, url: None }
    }

    pub fn url(&self, template: &str) -> String {
        match &self.url {
            Some(u) => u.clone(),
            None => template.replace("{id}", &self.id),
        }
    }

    pub fn default_url(&self, publisher: Publisher) -> String {
        self.url(publisher.url_template())
    }
}

/// Expand a selector into the ordered journal list.
pub fn resolve(sel: &JournalSelector) -> Result<Vec<Journal>> {
    let journals = match sel {
        JournalSelector::Range { start, end } => (*start..*end).map(|i| Journal::new(i.to_string())).collect(),
        JournalSelector::Ids(ids) => ids.iter().map(Journal::new).collect(),
        JournalSelector::Sheet(path) => load_sheet(path)?,
    };
    debug!("{} journals selected", journals.len());
    Ok(journals)
}

/// Read journals from a spreadsheet (.xlsx/.xlsm/.xls/.ods) or a CSV/TSV file.
/// The first row is the header; an id column is required.
pub fn load_sheet(path: &Path) -> Result<Vec<Journal>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" => read_delimited(path, b'\t')?,
        _ => read_workbook(path)?,
    };

    let journals = journals_from_rows(path, rows)?;
    info!("Loaded {} journals from {}", journals.len(), path.display());
    Ok(journals)
}

fn read_delimited(path: &Path, delim: u8) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(String::from).collect());
    }
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<Vec<String>>> {
    let sheet_err = |msg: String| Error::Sheet { path: path.to_path_buf(), msg };

    let mut workbook = open_workbook_auto(path).map_err(|e| sheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| sheet_err(s!("no worksheet found")))?
        .map_err(|e| sheet_err(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Spreadsheet cell as text; whole floats lose their `.0` (ids are often numeric).
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => s!(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

fn journals_from_rows(path: &Path, rows: Vec<Vec<String>>) -> Result<Vec<Journal>> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();

    let find = |names: &[&str]| {
        header
            .iter()
            .position(|h| names.contains(&h.trim().to_ascii_lowercase().as_str()))
    };
    let id_col = find(ID_COLUMNS).ok_or_else(|| Error::Sheet {
        path: path.to_path_buf(),
        msg: format!("no id column (expected one of: {})", ID_COLUMNS.join(", ")),
    })?;
    let title_col = find(TITLE_COLUMNS);
    let url_col = find(URL_COLUMNS);

    let cell = |row: &[String], col: Option<usize>| {
        col.and_then(|c| row.get(c))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    Ok(rows
        .filter_map(|row| {
            let id = cell(&row, Some(id_col))?;
            Some(Journal { id, title: cell(&row, title_col), url: cell(&row, url_col) })
        })
        .collect())
}
