//! Candidate filename derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Derive the candidate path for a save attempt.
///
/// Index `0` is the base path itself. Any other index inserts `(index)`
/// between the file stem and the extension, keeping the parent directory:
///
/// ```
/// use construct::artifact::candidate_path;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("plots/out.png");
/// assert_eq!(candidate_path(base, 0), PathBuf::from("plots/out.png"));
/// assert_eq!(candidate_path(base, 2), PathBuf::from("plots/out(2).png"));
/// ```
///
/// A base without an extension gets the suffix appended to its file name.
pub fn candidate_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }

    let Some(stem) = base.file_stem() else {
        // No file name at all (e.g. "/" or ".."); suffix the whole path.
        let mut name = base.as_os_str().to_os_string();
        name.push(format!("({})", index));
        return PathBuf::from(name);
    };

    let mut name = OsString::from(stem);
    name.push(format!("({})", index));
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }

    base.with_file_name(name)
}
