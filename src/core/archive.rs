// src/core/archive.rs
// Saved pages read back for offline analysis: a directory written by
// `fetch`, or a `.zip` of pages. Either way a page is named by its file
// (or member) name, and that name is the record id.

use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use zip::ZipArchive;

use crate::core::net::archived_pages;
use crate::error::{Error, Result};

pub enum PageArchive {
    Dir { dir: PathBuf, names: Vec<String> },
    Zip { zip: ZipArchive<File>, names: Vec<String> },
}

impl PageArchive {
    /// `.zip` files open as zip archives; anything else must be a directory.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_file() && is_zip(path) {
            let file = File::open(path).map_err(|e| Error::file(path, e))?;
            let zip = ZipArchive::new(file)?;
            let mut names: Vec<String> = zip
                .file_names()
                .filter(|n| n.contains(".html") && !n.ends_with('/'))
                .map(String::from)
                .collect();
            names.sort();
            return Ok(PageArchive::Zip { zip, names });
        }

        let names = archived_pages(path)?
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        Ok(PageArchive::Dir { dir: path.to_path_buf(), names })
    }

    /// Page names, sorted.
    pub fn names(&self) -> &[String] {
        match self {
            PageArchive::Dir { names, .. } | PageArchive::Zip { names, .. } => names,
        }
    }

    /// Page text. Invalid UTF-8 is replaced rather than rejected.
    pub fn read(&mut self, name: &str) -> Result<String> {
        let bytes = match self {
            PageArchive::Dir { dir, .. } => {
                let path = dir.join(name);
                fs::read(&path).map_err(|e| Error::file(path, e))?
            }
            PageArchive::Zip { zip, .. } => {
                let mut entry = zip.by_name(name)?;
                let mut buf = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut buf)?;
                buf
            }
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}
