// src/core/mod.rs

pub mod archive;
pub mod html;
pub mod net;
pub mod sanitize;

pub use archive::PageArchive;
pub use net::{ArchiveSource, HttpSource, PageSource};
