// src/file.rs

use std::{
    collections::BTreeMap,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::error::{Error, Result};
use crate::records::Record;

/// Append-only output for one run.
///
/// Records are buffered and written at each `checkpoint()`:
/// - CSV/TSV: the file is created (header included) up front; each
///   checkpoint appends only the rows gathered since the last one.
/// - JSON: each checkpoint rewrites the whole `{ journal_id: [records] }`
///   document from everything seen so far.
pub struct RecordSink<R: Record> {
    path: PathBuf,
    format: ExportFormat,
    pending: Vec<R>,
    /// JSON only; delimited formats don't keep rows once written
    kept: Vec<R>,
    written: usize,
}

impl<R: Record> RecordSink<R> {
    pub fn create(export: &ExportOptions) -> Result<Self> {
        let path = export.out_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }

        let sink = Self { path, format: export.format, pending: Vec::new(), kept: Vec::new(), written: 0 };
        match sink.format.delim() {
            Some(sep) => {
                let headers = export.include_headers.then_some(R::HEADERS);
                write_rows_start(&sink.path, headers, sep)?;
            }
            None => sink.write_json()?,
        }
        Ok(sink)
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn push(&mut self, records: Vec<R>) {
        self.pending.extend(records);
    }

    /// Records pushed so far, written or not.
    pub fn len(&self) -> usize { self.written + self.pending.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn checkpoint(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let n = self.pending.len();

        match self.format.delim() {
            Some(sep) => {
                let rows: Vec<Vec<String>> = self.pending.drain(..).map(|r| r.row()).collect();
                append_rows(&self.path, &rows, sep)?;
            }
            None => {
                self.kept.append(&mut self.pending);
                self.write_json()?;
            }
        }

        self.written += n;
        debug!("Checkpoint: {} records → {}", self.written, self.path.display());
        Ok(())
    }

    /// Last checkpoint; returns the file written.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.checkpoint()?;
        Ok(self.path)
    }

    fn write_json(&self) -> Result<()> {
        let mut grouped: BTreeMap<&str, Vec<&R>> = BTreeMap::new();
        for r in &self.kept {
            grouped.entry(r.journal_id()).or_default().push(r);
        }

        let file = File::create(&self.path).map_err(|e| Error::file(&self.path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &grouped)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Create/truncate the file and optionally write the header row.
pub fn write_rows_start(path: &Path, headers: Option<&[&str]>, sep: u8) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    let mut out = csv::WriterBuilder::new()
        .delimiter(sep)
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    if let Some(h) = headers {
        out.write_record(h)?;
    }
    out.flush()?;
    Ok(())
}

/// Append rows to a file created by `write_rows_start`.
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: u8) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| Error::file(path, e))?;
    let mut out = csv::WriterBuilder::new()
        .delimiter(sep)
        .has_headers(false)
        .flexible(true)
        .from_writer(BufWriter::new(file));
    for row in rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::input(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
