use std::{fmt, io, path::PathBuf};

/// Errors that end the expansion of a single subtree.
///
/// They never abort the whole build: the builder records them in
/// `ComponentTree::errors` and keeps going with the remaining siblings.
#[derive(Debug)]
pub enum TreeError {
    /// The file selected for a node could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The file was read but is not a valid module.
    Parse { path: PathBuf, message: String },
}

impl TreeError {
    pub fn path(&self) -> &PathBuf {
        match self {
            TreeError::Read { path, .. } => path,
            TreeError::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            TreeError::Parse { path, message } => {
                write!(f, "Failed to parse {}:\n{}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Read { source, .. } => Some(source),
            TreeError::Parse { .. } => None,
        }
    }
}

/// Errors while loading the alias configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(jsonc_parser::errors::ParseError),
    /// A javascript configuration that could not be parsed.
    Script(String),
    /// The file parsed, but has no `resolve.alias` object.
    MissingAlias(PathBuf),
}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<jsonc_parser::errors::ParseError> for ConfigError {
    fn from(error: jsonc_parser::errors::ParseError) -> Self {
        ConfigError::Json(error)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read alias configuration: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse alias configuration: {}", e),
            ConfigError::Script(e) => write!(f, "Failed to parse alias configuration:\n{}", e),
            ConfigError::MissingAlias(path) => write!(
                f,
                "No resolve.alias definitions found in {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
