use thiserror::Error;

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Invariant violations reported by [`crate::Project::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("El nombre del proyecto es obligatorio")]
    MissingName,

    #[error("La fuente del proyecto es obligatoria")]
    MissingSource,
}

/// Errors surfaced by importers to their caller
#[derive(Error, Debug)]
pub enum ImportError {
    /// Remote locator does not match the accepted `owner/repo` shape
    #[error("URL de GitHub inválida: {0}")]
    InvalidLocator(String),

    /// Remote source could not be reached or answered with an error
    #[error("Fuente no disponible: {0}")]
    SourceUnavailable(String),

    /// Host cannot select directories, or the selection timed out
    #[error("Selección de directorios no soportada: {0}")]
    CapabilityUnsupported(String),

    /// The user dismissed the directory selection
    #[error("Importación cancelada por el usuario")]
    UserCancelled,

    /// Produced project failed validation
    #[error(transparent)]
    Invalid(#[from] ProjectError),

    /// Reading the selected source failed midway
    #[error("Importación fallida: {0}")]
    ImportFailed(String),
}

impl ImportError {
    pub fn invalid_locator(locator: impl Into<String>) -> Self {
        Self::InvalidLocator(locator.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::CapabilityUnsupported(msg.into())
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self::ImportFailed(msg.into())
    }

    /// Code used for user-facing messaging; `None` for neutral outcomes.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ImportError::InvalidLocator(_) => Some(ErrorCode::UrlInvalid),
            ImportError::SourceUnavailable(_) => Some(ErrorCode::NetworkError),
            ImportError::CapabilityUnsupported(_) => Some(ErrorCode::DirectoryUnsupported),
            ImportError::Invalid(_) | ImportError::ImportFailed(_) => {
                Some(ErrorCode::ImportFailed)
            }
            ImportError::UserCancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportError::UserCancelled)
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::ImportFailed(err.to_string())
    }
}

/// Closed set of failure codes with a fixed user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UrlInvalid,
    NetworkError,
    ImportFailed,
    DirectoryUnsupported,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UrlInvalid => "URL_INVALID",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ImportFailed => "IMPORT_FAILED",
            ErrorCode::DirectoryUnsupported => "DIRECTORY_UNSUPPORTED",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "URL_INVALID" => Some(ErrorCode::UrlInvalid),
            "NETWORK_ERROR" => Some(ErrorCode::NetworkError),
            "IMPORT_FAILED" => Some(ErrorCode::ImportFailed),
            "DIRECTORY_UNSUPPORTED" => Some(ErrorCode::DirectoryUnsupported),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::UrlInvalid => "URL de repositorio inválida",
            ErrorCode::NetworkError => "Error de conexión",
            ErrorCode::ImportFailed => "Importación fallida",
            ErrorCode::DirectoryUnsupported => {
                "Su navegador no soporta importación de directorios"
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
