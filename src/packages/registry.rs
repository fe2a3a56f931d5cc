//! Installed package lookup.
//!
//! Installed distributions leave a `<name>-<version>.dist-info` (or legacy
//! `.egg-info`) directory in site-packages. The registry indexes those once
//! and answers version queries by normalized name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::environment::EnvironmentInspector;

/// Lookup of installed package versions.
pub trait PackageRegistry {
    /// Installed version of `package_name`, or `None` when not installed.
    fn installed_version(&self, package_name: &str) -> Option<String>;
}

/// Regex for distribution metadata directory names.
static DIST_INFO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z0-9][A-Za-z0-9._]*)-(?P<version>[^-]+?)(?:-py[0-9.]+)?\.(?:dist|egg)-info$")
        .expect("DIST_INFO_REGEX must compile")
});

/// Regex for runs of separators folded during name normalization.
static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("SEPARATOR_REGEX must compile"));

/// Normalize a distribution name: lowercase, separators folded to `-`.
///
/// ```
/// use construct::packages::normalize_name;
///
/// assert_eq!(normalize_name("Typing_Extensions"), "typing-extensions");
/// assert_eq!(normalize_name("zope.interface"), "zope-interface");
/// ```
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_REGEX
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

/// Registry indexed from site-packages directories.
#[derive(Debug, Clone, Default)]
pub struct SitePackagesRegistry {
    versions: BTreeMap<String, String>,
}

impl SitePackagesRegistry {
    /// Index the given directories. Earlier directories win on duplicates.
    pub fn scan(paths: &[PathBuf]) -> Self {
        let mut versions = BTreeMap::new();

        for dir in paths {
            let Ok(entries) = std::fs::read_dir(dir) else {
                debug!("Skipping unreadable package directory {}", dir.display());
                continue;
            };

            for entry in entries.filter_map(|e| e.ok()) {
                let file_name = entry.file_name();
                let Some(file_name) = file_name.to_str() else {
                    continue;
                };
                let Some(caps) = DIST_INFO_REGEX.captures(file_name) else {
                    continue;
                };

                let name = normalize_name(&caps["name"]);
                let version = read_metadata_version(&entry.path())
                    .unwrap_or_else(|| caps["version"].to_string());
                versions.entry(name).or_insert(version);
            }
        }

        debug!("Indexed {} installed packages", versions.len());
        Self { versions }
    }

    /// Index the package directories reported by an inspector.
    pub fn from_inspector(inspector: &dyn EnvironmentInspector) -> Self {
        Self::scan(&inspector.package_install_paths())
    }

    /// Number of indexed packages.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no packages were found.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl PackageRegistry for SitePackagesRegistry {
    fn installed_version(&self, package_name: &str) -> Option<String> {
        self.versions.get(&normalize_name(package_name)).cloned()
    }
}

/// Read the `Version:` header from `METADATA` (or `PKG-INFO` for egg-info).
fn read_metadata_version(info_dir: &Path) -> Option<String> {
    ["METADATA", "PKG-INFO"].iter().find_map(|file| {
        let content = std::fs::read_to_string(info_dir.join(file)).ok()?;
        content
            .lines()
            // Headers end at the first blank line; the body may mention "Version:".
            .take_while(|line| !line.trim().is_empty())
            .find_map(|line| line.strip_prefix("Version:"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install(site: &Path, dir_name: &str, metadata: Option<&str>) {
        let info = site.join(dir_name);
        fs::create_dir_all(&info).unwrap();
        if let Some(content) = metadata {
            fs::write(info.join("METADATA"), content).unwrap();
        }
    }

    #[test]
    fn reads_version_from_metadata() {
        let temp = TempDir::new().unwrap();
        install(
            temp.path(),
            "numpy-2.1.3.dist-info",
            Some("Metadata-Version: 2.1\nName: numpy\nVersion: 2.1.3\n\nVersion: bogus\n"),
        );

        let registry = SitePackagesRegistry::scan(&[temp.path().to_path_buf()]);

        assert_eq!(registry.installed_version("numpy"), Some("2.1.3".into()));
    }

    #[test]
    fn falls_back_to_directory_version() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "pandas-2.2.0.dist-info", None);

        let registry = SitePackagesRegistry::scan(&[temp.path().to_path_buf()]);

        assert_eq!(registry.installed_version("pandas"), Some("2.2.0".into()));
    }

    #[test]
    fn matches_names_after_normalization() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "typing_extensions-4.12.2.dist-info", None);
        install(temp.path(), "PyYAML-6.0.1-py3.11.egg-info", None);

        let registry = SitePackagesRegistry::scan(&[temp.path().to_path_buf()]);

        assert_eq!(
            registry.installed_version("typing-extensions"),
            Some("4.12.2".into())
        );
        assert_eq!(registry.installed_version("pyyaml"), Some("6.0.1".into()));
    }

    #[test]
    fn missing_package_is_none() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "pandas-2.2.0.dist-info", None);

        let registry = SitePackagesRegistry::scan(&[temp.path().to_path_buf()]);

        assert_eq!(registry.installed_version("numpy"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ignores_unrelated_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("numpy")).unwrap();
        fs::write(temp.path().join("six.py"), "").unwrap();

        let registry = SitePackagesRegistry::scan(&[temp.path().to_path_buf()]);

        assert!(registry.is_empty());
    }

    #[test]
    fn earlier_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        install(first.path(), "numpy-2.0.0.dist-info", None);
        install(second.path(), "numpy-1.26.4.dist-info", None);

        let registry = SitePackagesRegistry::scan(&[
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(registry.installed_version("numpy"), Some("2.0.0".into()));
    }

    #[test]
    fn unreadable_directory_is_skipped() {
        let registry = SitePackagesRegistry::scan(&[PathBuf::from("/nonexistent/site-packages")]);
        assert!(registry.is_empty());
    }

    #[test]
    fn normalize_name_folds_separator_runs() {
        assert_eq!(normalize_name("Foo__Bar.-baz"), "foo-bar-baz");
        assert_eq!(normalize_name("  numpy "), "numpy");
    }
}
