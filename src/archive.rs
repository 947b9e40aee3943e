//! Cartridge archives on disk.
//!
//! An archive root holds `cartridges/<cartridge-id>/playt.json` plus the media
//! files the catalog points at. There are two roots, a read-only bundled one
//! and a writable local one, both laid out the same way.
//!
//! Catalog data is untrusted: every media path goes through
//! [`ArchiveLibrary::resolve_media_path`], which refuses anything that could
//! land outside the cartridge directory.

mod catalog;
mod error;
mod library;
mod paths;
mod source;

pub use catalog::*;
pub use error::*;
pub use library::*;
pub use source::*;

/// Directory under an archive root that holds one folder per cartridge.
pub const CARTRIDGES_DIR: &str = "cartridges";
/// Catalog file name inside each cartridge folder.
pub const CATALOG_FILE: &str = "playt.json";

#[cfg(test)]
mod tests;
