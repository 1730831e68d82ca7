//! Resolution of virtual root-relative attachment paths.

use std::path::{Path, PathBuf};

/// Resolves possibly `~/`-prefixed path strings against a base directory.
///
/// The `~/` prefix marks a path as relative to the application's resource
/// root rather than the user's home directory. Bare relative paths are also
/// resolved against the base; absolute paths pass through untouched.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    /// Resolve against the given base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The configured base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path string to a filesystem path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let trimmed = path.trim();
        if let Some(rest) = trimmed.strip_prefix("~/") {
            return self.base_dir.join(rest);
        }
        let candidate = Path::new(trimmed);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.base_dir.join(candidate)
        }
    }
}

impl Default for PathResolver {
    /// Resolve against the current working directory.
    fn default() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_root_prefix() {
        let resolver = PathResolver::new("/srv/app");
        assert_eq!(
            resolver.resolve("~/Resources/chart.png"),
            PathBuf::from("/srv/app/Resources/chart.png")
        );
    }

    #[test]
    fn test_relative_joins_base() {
        let resolver = PathResolver::new("/srv/app");
        assert_eq!(
            resolver.resolve("images/logo.png"),
            PathBuf::from("/srv/app/images/logo.png")
        );
    }

    #[test]
    fn test_absolute_passes_through() {
        let resolver = PathResolver::new("/srv/app");
        assert_eq!(
            resolver.resolve("/etc/hosts"),
            PathBuf::from("/etc/hosts")
        );
    }
}
