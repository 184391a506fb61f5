use std::path::PathBuf;

/// Errors from generating a component.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid {label} `{value}`: only letters, digits, `_` and `-` are allowed")]
    InvalidName { label: &'static str, value: String },

    #[error("file already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error(
        "{} is not inside an Android source root (src/main/java or src/main/kotlin)",
        .0.display()
    )]
    NotInSourceRoot(PathBuf),

    #[error("layout directory not found: {}", .0.display())]
    LayoutDirNotFound(PathBuf),

    #[error("no package could be resolved for {}", .0.display())]
    NoPackage(PathBuf),

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the caller can fix this by changing the input, as opposed to a problem with
    /// the project tree or the filesystem.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidName { .. } | Self::NoPackage(_))
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
