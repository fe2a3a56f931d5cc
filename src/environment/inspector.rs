//! Interpreter and virtual environment discovery.
//!
//! Detection order:
//!
//! 1. `VIRTUAL_ENV` naming an existing directory (an activated venv)
//! 2. The first `python3`/`python` on `PATH`, treated as a venv when its
//!    prefix contains `pyvenv.cfg`
//!
//! # Example
//!
//! ```no_run
//! use construct::environment::{EnvironmentInspector, SystemInspector};
//!
//! let inspector = SystemInspector::detect();
//! if inspector.is_virtual_environment() {
//!     for path in inspector.package_install_paths() {
//!         println!("{}", path.display());
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

/// Facts about the current Python installation.
pub trait EnvironmentInspector {
    /// Whether the interpreter belongs to a virtual environment.
    fn is_virtual_environment(&self) -> bool;

    /// Path of the interpreter executable, if one was found.
    fn current_interpreter_path(&self) -> Option<PathBuf>;

    /// Installation prefix (the venv root inside a virtual environment).
    fn current_prefix_path(&self) -> Option<PathBuf>;

    /// Directories packages are installed into, most specific first.
    fn package_install_paths(&self) -> Vec<PathBuf>;
}

/// Interpreter names tried on `PATH`, in order.
#[cfg(not(windows))]
const PYTHON_NAMES: &[&str] = &["python3", "python"];
#[cfg(windows)]
const PYTHON_NAMES: &[&str] = &["python.exe", "python3.exe"];

/// Marker file every venv created by `python -m venv` carries.
const PYVENV_CFG: &str = "pyvenv.cfg";

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    path_entries
        .iter()
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Inspector backed by the process environment and filesystem.
#[derive(Debug, Clone, Default)]
pub struct SystemInspector {
    virtual_env: Option<PathBuf>,
    interpreter: Option<PathBuf>,
    prefix: Option<PathBuf>,
}

impl SystemInspector {
    /// Inspect using real environment variables and `PATH`.
    pub fn detect() -> Self {
        Self::detect_with_env(|key: &str| std::env::var(key), &parse_system_path())
    }

    /// Inspect with a custom env var lookup and `PATH` (for testing).
    pub fn detect_with_env<F>(env_fn: F, path_entries: &[PathBuf]) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let virtual_env = env_fn("VIRTUAL_ENV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .filter(|path| path.is_dir());

        let interpreter = virtual_env
            .as_deref()
            .and_then(venv_interpreter)
            .or_else(|| {
                PYTHON_NAMES
                    .iter()
                    .find_map(|name| resolve_tool_path(name, path_entries))
            });

        let prefix = virtual_env
            .clone()
            .or_else(|| interpreter.as_deref().and_then(prefix_of));

        debug!(
            "Python environment: venv={:?} interpreter={:?} prefix={:?}",
            virtual_env, interpreter, prefix
        );

        Self {
            virtual_env,
            interpreter,
            prefix,
        }
    }
}

impl EnvironmentInspector for SystemInspector {
    fn is_virtual_environment(&self) -> bool {
        self.virtual_env.is_some()
            || self
                .prefix
                .as_ref()
                .is_some_and(|prefix| prefix.join(PYVENV_CFG).is_file())
    }

    fn current_interpreter_path(&self) -> Option<PathBuf> {
        self.interpreter.clone()
    }

    fn current_prefix_path(&self) -> Option<PathBuf> {
        self.prefix.clone()
    }

    fn package_install_paths(&self) -> Vec<PathBuf> {
        self.prefix
            .as_deref()
            .map(site_packages_dirs)
            .unwrap_or_default()
    }
}

/// Interpreter inside a venv root, if present.
fn venv_interpreter(root: &Path) -> Option<PathBuf> {
    let candidates = if cfg!(windows) {
        [root.join("Scripts").join("python.exe"), root.join("python.exe")]
    } else {
        [root.join("bin").join("python"), root.join("bin").join("python3")]
    };
    candidates.into_iter().find(|path| path.is_file())
}

/// Prefix of an interpreter: the parent of its `bin`/`Scripts` directory.
fn prefix_of(interpreter: &Path) -> Option<PathBuf> {
    let dir = interpreter.parent()?;
    match dir.file_name().and_then(|name| name.to_str()) {
        Some("bin") | Some("Scripts") => dir.parent().map(Path::to_path_buf),
        _ => Some(dir.to_path_buf()),
    }
}

/// Package directories under a prefix, sorted.
///
/// Unix layouts put them at `lib/pythonX.Y/{site,dist}-packages`; Windows
/// uses `Lib/site-packages`.
fn site_packages_dirs(prefix: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let windows_dir = prefix.join("Lib").join("site-packages");
    if windows_dir.is_dir() {
        dirs.push(windows_dir);
    }

    if let Ok(entries) = std::fs::read_dir(prefix.join("lib")) {
        let mut versioned: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("python"))
            .map(|entry| entry.path())
            .collect();
        versioned.sort();

        for version_dir in versioned {
            for leaf in ["site-packages", "dist-packages"] {
                let dir = version_dir.join(leaf);
                if dir.is_dir() {
                    dirs.push(dir);
                }
            }
        }
    }

    dirs.dedup();
    dirs
}
