//! Source file discovery.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::BuildError;

/// A guide source found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// Path relative to the source directory.
    pub relative: PathBuf,
    /// Full path.
    pub path: PathBuf,
}

impl SourceFile {
    /// Folder of the source relative to the source root, `/`-separated.
    ///
    /// Empty for files directly in the source directory.
    #[must_use]
    pub fn folder(&self) -> String {
        self.relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default()
    }
}

/// Find every `*.<extension>` file below `dir`, sorted by relative path.
///
/// Hidden files and directories are skipped.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<SourceFile>, BuildError> {
    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let entries = glob::glob_with(&pattern, options).map_err(|source| BuildError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry?;
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(dir).map(Path::to_path_buf) else {
            continue;
        };
        if is_hidden(&relative) {
            continue;
        }
        sources.push(SourceFile { relative, path });
    }
    sources.sort();

    tracing::debug!(dir = %dir.display(), count = sources.len(), "Discovered sources");
    Ok(sources)
}

fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "setup.rst");
        touch(dir.path(), "guides/usage.rst");
        touch(dir.path(), "guides/notes.txt");
        touch(dir.path(), "index.rst");
        touch(dir.path(), ".drafts/wip.rst");

        let sources = discover_sources(dir.path(), "rst").unwrap();
        let relative: Vec<&Path> = sources.iter().map(|s| s.relative.as_path()).collect();

        assert_eq!(
            relative,
            vec![
                Path::new("guides/usage.rst"),
                Path::new("index.rst"),
                Path::new("setup.rst"),
            ]
        );
        assert_eq!(sources[0].path, dir.path().join("guides/usage.rst"));
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_sources(dir.path(), "rst").unwrap().is_empty());
    }

    #[test]
    fn test_folder() {
        let nested = SourceFile {
            relative: PathBuf::from("guides/advanced/extending.rst"),
            path: PathBuf::from("/docs/guides/advanced/extending.rst"),
        };
        let top = SourceFile {
            relative: PathBuf::from("index.rst"),
            path: PathBuf::from("/docs/index.rst"),
        };

        assert_eq!(nested.folder(), "guides/advanced");
        assert_eq!(top.folder(), "");
    }
}
