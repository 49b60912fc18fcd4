use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path: drops `.` segments and folds `..` into the
/// preceding segment. The file system is never consulted, so symlinks are
/// not followed.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Joins `path` onto `base` unless it is absolute already, then normalizes.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    normalize_path(&base.join(path))
}

/// Display form of a path below `base`, the path itself otherwise.
pub fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// The component name for a root file: its file name without a `.js` or
/// `.jsx` extension. Other dots are part of the name.
pub fn component_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    file_name
        .strip_suffix(".jsx")
        .or_else(|| file_name.strip_suffix(".js"))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or(file_name)
}

/// Appends `suffix` to the last segment, `Foo` + `.js` is `Foo.js`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
pub mod test_utils {
    use std::fs;

    use tempfile::TempDir;

    /// Creates a temporary project with the given `(path, content)` files.
    pub fn create_mock_project(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for (path, content) in files {
            // create directories before creating files
            let file_path = root.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(file_path, content).unwrap();
        }

        temp_dir
    }
}
