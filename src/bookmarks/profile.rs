//! Firefox profile resolution
//!
//! `profiles.ini` lists profiles as sections:
//!
//! ```ini
//! [Profile0]
//! Name=default
//! IsRelative=1
//! Path=abcd1234.default
//! ```
//!
//! A relative `Path` is resolved against the Firefox directory that holds
//! `profiles.ini`; `IsRelative=0` marks an absolute path.

use ini::Ini;
use std::path::{Path, PathBuf};
use tracing::info;

use super::errors::{BookmarkError, BookmarkResult};
use crate::config::ArchiveConfig;
use crate::utils::{PLACES_DB, PROFILES_INI};

/// A resolved Firefox profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirefoxProfile {
    /// Human-readable profile name (`Name=`)
    pub name: String,
    /// Absolute profile directory
    pub dir: PathBuf,
}

impl FirefoxProfile {
    /// Location of the profile's bookmark store
    #[must_use]
    pub fn places_db(&self) -> PathBuf {
        self.dir.join(PLACES_DB)
    }
}

/// Resolves `profiles.ini` sections inside one Firefox directory
#[derive(Debug, Clone)]
pub struct ProfileLocator {
    firefox_dir: PathBuf,
}

impl ProfileLocator {
    #[must_use]
    pub fn new(firefox_dir: impl Into<PathBuf>) -> Self {
        Self {
            firefox_dir: firefox_dir.into(),
        }
    }

    /// Locator for the Firefox directory named by the config
    ///
    /// # Errors
    ///
    /// `BookmarkError::NoHomeDir` when no directory is configured and the
    /// home directory is unknown.
    pub fn from_config(config: &ArchiveConfig) -> BookmarkResult<Self> {
        config
            .firefox_dir()
            .map(Self::new)
            .ok_or(BookmarkError::NoHomeDir)
    }

    #[must_use]
    pub fn firefox_dir(&self) -> &Path {
        &self.firefox_dir
    }

    /// Resolve a section such as `Profile0` to its profile directory
    ///
    /// # Errors
    ///
    /// Fails when `profiles.ini` cannot be read or parsed, the section is
    /// missing, or the section lacks `Name` or `Path`.
    pub fn resolve(&self, section: &str) -> BookmarkResult<FirefoxProfile> {
        let ini_path = self.firefox_dir.join(PROFILES_INI);
        info!("Reading Firefox profiles from {}", ini_path.display());

        let profiles = Ini::load_from_file(&ini_path).map_err(|source| BookmarkError::ProfilesIni {
            path: ini_path.clone(),
            source,
        })?;

        let props = profiles
            .section(Some(section))
            .ok_or_else(|| BookmarkError::ProfileNotFound {
                section: section.to_string(),
                path: ini_path.clone(),
            })?;

        let key_missing = |key| BookmarkError::ProfileKeyMissing {
            section: section.to_string(),
            key,
        };
        let name = props.get("Name").ok_or_else(|| key_missing("Name"))?;
        let path = props.get("Path").ok_or_else(|| key_missing("Path"))?;

        let dir = if props.get("IsRelative").is_some_and(|v| v.trim() == "0") {
            PathBuf::from(path)
        } else {
            self.firefox_dir.join(path)
        };

        info!("Profile: name {name:?}, path {path:?}");
        Ok(FirefoxProfile {
            name: name.to_string(),
            dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROFILES: &str = "\
[General]
StartWithLastProfile=1

[Profile0]
Name=default
IsRelative=1
Path=abcd1234.default

[Profile1]
Name=work
IsRelative=0
Path=/srv/firefox/work

[Profile2]
Name=broken
";

    fn locator() -> (TempDir, ProfileLocator) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROFILES_INI), PROFILES).unwrap();
        let locator = ProfileLocator::new(dir.path());
        (dir, locator)
    }

    #[test]
    fn relative_profile_is_joined_to_firefox_dir() {
        let (dir, locator) = locator();
        let profile = locator.resolve("Profile0").unwrap();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.dir, dir.path().join("abcd1234.default"));
        assert_eq!(
            profile.places_db(),
            dir.path().join("abcd1234.default").join("places.sqlite")
        );
    }

    #[test]
    fn absolute_profile_is_used_verbatim() {
        let (_dir, locator) = locator();
        let profile = locator.resolve("Profile1").unwrap();
        assert_eq!(profile.dir, PathBuf::from("/srv/firefox/work"));
    }

    #[test]
    fn missing_section_is_an_error() {
        let (_dir, locator) = locator();
        let err = locator.resolve("Profile9").unwrap_err();
        assert!(matches!(err, BookmarkError::ProfileNotFound { .. }));
    }

    #[test]
    fn missing_path_key_is_an_error() {
        let (_dir, locator) = locator();
        let err = locator.resolve("Profile2").unwrap_err();
        assert!(matches!(
            err,
            BookmarkError::ProfileKeyMissing { key: "Path", .. }
        ));
    }

    #[test]
    fn missing_profiles_ini_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ProfileLocator::new(dir.path()).resolve("Profile0").unwrap_err();
        assert!(matches!(err, BookmarkError::ProfilesIni { .. }));
    }
}
