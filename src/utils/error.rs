//! Error handling for texhtml
//!
//! This module provides a unified error type and result type for rendering,
//! configuration loading, autosave storage and export operations.

use std::fmt;

/// Render error type
#[derive(Debug, Clone)]
pub enum RenderError {
    /// The document was rejected by the compilation hook
    Compilation { message: String },
    /// Configuration could not be read or parsed
    Config { message: String },
    /// Autosave store failure
    Storage { key: String, message: String },
    /// Export (file, clipboard payload, print page) failure
    Export { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Unknown template requested
    UnknownTemplate { name: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Compilation { message } => write!(f, "{}", message),
            RenderError::Config { message } => write!(f, "Configuration error: {}", message),
            RenderError::Storage { key, message } => {
                write!(f, "Storage error for '{}': {}", key, message)
            }
            RenderError::Export { message } => write!(f, "Export failed: {}", message),
            RenderError::IoError { message } => write!(f, "IO error: {}", message),
            RenderError::UnknownTemplate { name } => {
                write!(f, "Unknown template '{}'", name)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Storage {
            key: String::new(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(err: toml::de::Error) -> Self {
        RenderError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Render warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    pub message: String,
    /// Command the warning is about, without the backslash
    pub command: Option<String>,
    pub suggestion: Option<String>,
}

impl RenderWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            command: None,
            suggestion: None,
        }
    }

    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref cmd) = self.command {
            write!(f, "Warning in \\{}: {}", cmd, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Render output with optional warnings
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered HTML fragment
    pub html: String,
    /// Any warnings generated during rendering
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn new(html: String) -> Self {
        Self {
            html,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(html: String, warnings: Vec<RenderWarning>) -> Self {
        Self { html, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl RenderError {
    pub fn compilation(message: impl Into<String>) -> Self {
        RenderError::Compilation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        RenderError::Config {
            message: message.into(),
        }
    }

    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        RenderError::Export {
            message: message.into(),
        }
    }

    /// Whether this is the deliberate compilation-hook failure
    pub fn is_compilation(&self) -> bool {
        matches!(self, RenderError::Compilation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compilation_error_display_is_bare_message() {
        let err = RenderError::compilation("Compilation error: nope");
        assert_eq!(err.to_string(), "Compilation error: nope");
        assert!(err.is_compilation());
    }

    #[test]
    fn test_storage_error_mentions_key() {
        let err = RenderError::storage("latex-editor-source", "disk full");
        let msg = err.to_string();
        assert!(msg.contains("latex-editor-source"));
        assert!(msg.contains("disk full"));
        assert!(!err.is_compilation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RenderError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_warning_display() {
        let warn = RenderWarning::new("unbalanced braces")
            .for_command("textbf")
            .with_suggestion("add a closing '}'");
        let msg = warn.to_string();
        assert!(msg.contains("\\textbf"));
        assert!(msg.contains("add a closing"));
    }

    #[test]
    fn test_render_output() {
        let output = RenderOutput::new("<p>hi</p>".to_string());
        assert!(!output.has_warnings());

        let output = RenderOutput::with_warnings(
            String::new(),
            vec![RenderWarning::new("test warning")],
        );
        assert!(output.has_warnings());
    }
}
