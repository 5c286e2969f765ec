//! Error types for the DIRS engine
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for the CLI
//!
//! Reading a storage slot never produces one of these errors: a missing or
//! malformed slot is reported as [`crate::storage::Absent`] instead.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Pillar;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Storage errors (3xx)
    StorageWrite = 300,
    StorageSerialize = 301,
    StorageDelete = 302,

    // Assessment input errors (4xx)
    AssessmentIncomplete = 400,
    InvalidAnswer = 401,
    UnknownPillar = 402,
    InvalidOnboarding = 403,
    NoResults = 404,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Storage errors
            400..=499 => 40, // Assessment input errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// A slot could not be written
    #[error("Failed to write storage slot '{key}': {message}")]
    StorageWrite { key: String, message: String },

    /// A slot could not be deleted
    #[error("Failed to delete storage slot '{key}': {message}")]
    StorageDelete { key: String, message: String },

    /// A record could not be serialized
    #[error("Failed to serialize record for '{key}': {source}")]
    StorageSerialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // Assessment Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Submission attempted before every question was answered
    #[error("Assessment incomplete: {pillar} has {answered} of {expected} answers")]
    AssessmentIncomplete {
        pillar: Pillar,
        answered: usize,
        expected: usize,
    },

    /// Likert value or question index outside the accepted range
    #[error("Invalid answer: {message}")]
    InvalidAnswer { message: String },

    /// Pillar identifier not recognised
    #[error("Unknown pillar '{name}'")]
    UnknownPillar { name: String },

    /// Onboarding choice not among the offered options
    #[error("Invalid onboarding {field}: '{value}'")]
    InvalidOnboarding { field: String, value: String },

    /// An operation needed stored results and found none
    #[error("No assessment results stored")]
    NoResults,

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::StorageWrite { .. } => ErrorCode::StorageWrite,
            Error::StorageDelete { .. } => ErrorCode::StorageDelete,
            Error::StorageSerialize { .. } => ErrorCode::StorageSerialize,

            Error::AssessmentIncomplete { .. } => ErrorCode::AssessmentIncomplete,
            Error::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            Error::UnknownPillar { .. } => ErrorCode::UnknownPillar,
            Error::InvalidOnboarding { .. } => ErrorCode::InvalidOnboarding,
            Error::NoResults => ErrorCode::NoResults,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'dirs-engine config init' to create a default configuration file.",
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'dirs-engine config validate' to see details.",
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values.",
            ),
            Error::StorageWrite { .. } | Error::IoWrite { .. } => Some(
                "Check that the data directory exists and is writable, or pass --data-dir.",
            ),
            Error::AssessmentIncomplete { .. } => Some(
                "Run 'dirs-engine status' to see which questions still need an answer.",
            ),
            Error::InvalidAnswer { .. } => Some(
                "Answers use a 1-5 scale: 1 strongly disagree, 3 neutral, 5 strongly agree.",
            ),
            Error::UnknownPillar { .. } => Some(
                "Valid pillars: cyber-safety, ai-literacy, digital-citizenship, privacy-security, critical-thinking.",
            ),
            Error::InvalidOnboarding { .. } => Some(
                "Run 'dirs-engine onboard --help' to list the accepted options.",
            ),
            Error::NoResults => Some(
                "Complete the assessment first with 'dirs-engine submit'.",
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            self.code().as_str(),
            self
        );

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>, source: toml::de::Error) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn invalid_answer(message: impl Into<String>) -> Self {
        Error::InvalidAnswer {
            message: message.into(),
        }
    }

    pub fn invalid_onboarding(field: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidOnboarding {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn storage_write(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::StorageWrite {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::StorageWrite.as_str(), "E300");
        assert_eq!(ErrorCode::AssessmentIncomplete.as_str(), "E400");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::StorageSerialize.exit_code(), 30);
        assert_eq!(ErrorCode::InvalidAnswer.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_incomplete_message_names_pillar() {
        let err = Error::AssessmentIncomplete {
            pillar: Pillar::PrivacySecurity,
            answered: 3,
            expected: 5,
        };
        assert_eq!(err.code(), ErrorCode::AssessmentIncomplete);
        assert!(err.to_string().contains("Privacy & Security"));
        assert!(err.to_string().contains("3 of 5"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::invalid_answer("value 9");
        assert!(err.suggestion().unwrap().contains("1-5"));

        assert!(Error::Internal("x".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let formatted = Error::NoResults.format_for_terminal();
        assert!(formatted.contains("E404"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let formatted = Error::config_not_found("/test/config.toml").format_for_log();
        assert!(formatted.contains("[E100]"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoPermission);
    }
}
