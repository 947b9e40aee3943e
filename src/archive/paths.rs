//! Path checks for untrusted catalog input.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Validate a catalog-supplied media path and return it with `.` segments
/// dropped. `None` means the path must be rejected.
///
/// Rejected: blank input, a leading `/`, `\` or `~`, any `..` segment, and
/// anything that is not a plain chain of normal components (drive prefixes,
/// embedded roots).
pub(crate) fn sanitize_relative(relative: &str) -> Option<PathBuf> {
    let trimmed = relative.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with(['/', '\\', '~']) {
        return None;
    }
    if trimmed.split(['/', '\\']).any(|segment| segment == "..") {
        return None;
    }

    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        return None;
    }
    Some(clean)
}

/// A cartridge id must name exactly one directory entry.
pub(crate) fn is_valid_cartridge_id(id: &str) -> bool {
    if id.trim().is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Canonicalize `path`, tolerating a missing tail.
///
/// The deepest ancestor that exists is canonicalized (resolving symlinks)
/// and the missing components are appended verbatim. This lets the
/// containment check run before the existence check.
pub(crate) fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for part in missing.iter().rev() {
                    resolved.push(part);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Err(e),
                }
            }
            Err(e) => return Err(e),
        }
    }
}
