//! Single translation point from failures to user-visible text.

use crate::error::{ErrorCode, ImportError};
use serde::Serialize;

pub const DEFAULT_MESSAGE: &str = "Ha ocurrido un error inesperado";

/// Code/message pair extracted from any failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ErrorReport {
    pub fn new(code: Option<&str>, message: Option<&str>) -> Self {
        Self {
            code: code.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    /// Inspect an arbitrary error, recognising [`ImportError`] anywhere in its source chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut current = Some(err);
        while let Some(candidate) = current {
            if let Some(import) = candidate.downcast_ref::<ImportError>() {
                return Self::from(import);
            }
            current = candidate.source();
        }
        Self {
            code: None,
            message: Some(err.to_string()),
        }
    }
}

impl From<&ImportError> for ErrorReport {
    fn from(err: &ImportError) -> Self {
        Self {
            code: err.code().map(|code| code.as_str().to_string()),
            message: Some(err.to_string()),
        }
    }
}

/// Error state handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorState {
    pub has_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

/// Map a failure to its user-facing message. Never fails.
pub fn handle(report: &ErrorReport) -> String {
    if let Some(code) = report.code.as_deref().and_then(ErrorCode::parse) {
        return code.message().to_string();
    }
    match report.message.as_deref() {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => DEFAULT_MESSAGE.to_string(),
    }
}

/// Log the failure once and build the state shown to the user.
pub fn report(err: &ErrorReport) -> ErrorState {
    let message = handle(err);
    log::error!(
        "Error: code={} message={}",
        err.code.as_deref().unwrap_or("-"),
        err.message.as_deref().unwrap_or("-")
    );
    ErrorState {
        has_error: true,
        code: err.code.clone(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectError;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_codes_use_fixed_messages() {
        let cases = [
            ("URL_INVALID", "URL de repositorio inválida"),
            ("NETWORK_ERROR", "Error de conexión"),
            ("IMPORT_FAILED", "Importación fallida"),
            (
                "DIRECTORY_UNSUPPORTED",
                "Su navegador no soporta importación de directorios",
            ),
        ];
        for (code, expected) in cases {
            let report = ErrorReport::new(Some(code), Some("ignored"));
            assert_eq!(handle(&report), expected);
        }
    }

    #[test]
    fn unknown_code_falls_back_to_message() {
        let report = ErrorReport::new(Some("TEAPOT"), Some("short and stout"));
        assert_eq!(handle(&report), "short and stout");
    }

    #[test]
    fn missing_everything_falls_back_to_default() {
        assert_eq!(handle(&ErrorReport::default()), DEFAULT_MESSAGE);
        assert_eq!(handle(&ErrorReport::new(None, Some(""))), DEFAULT_MESSAGE);
    }

    #[test]
    fn import_errors_translate_through_codes() {
        let err = ImportError::invalid_locator("https://gitlab.com/a/b");
        assert_eq!(handle(&ErrorReport::from(&err)), "URL de repositorio inválida");

        let err = ImportError::from(ProjectError::MissingName);
        assert_eq!(handle(&ErrorReport::from(&err)), "Importación fallida");
    }

    #[test]
    fn from_error_finds_import_error_in_chain() {
        #[derive(Debug)]
        struct Wrapper(ImportError);
        impl std::fmt::Display for Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "wrapped")
            }
        }
        impl std::error::Error for Wrapper {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let wrapped = Wrapper(ImportError::unavailable("timed out"));
        let report = ErrorReport::from_error(&wrapped);
        assert_eq!(report.code.as_deref(), Some("NETWORK_ERROR"));

        let plain = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let report = ErrorReport::from_error(&plain);
        assert_eq!(report.code, None);
        assert_eq!(handle(&report), "disk on fire");
    }

    #[test]
    fn report_marks_error_state() {
        let state = report(&ErrorReport::new(Some("NETWORK_ERROR"), None));
        assert!(state.has_error);
        assert_eq!(state.message, "Error de conexión");
        assert_eq!(state.code.as_deref(), Some("NETWORK_ERROR"));
    }
}
