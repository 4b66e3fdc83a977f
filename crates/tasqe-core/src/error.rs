//! Error types for the tasqe library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tasqe operations.
#[derive(Error, Debug)]
pub enum TasqeError {
    /// No API key has been configured; raised before any network call
    #[error("No API key configured. Set one with `tq config set-key <KEY>`")]
    MissingCredential,

    /// Transport or HTTP failure while talking to the model provider
    #[error("Request to {endpoint} failed: {message}")]
    RequestFailed {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// The provider answered with an envelope that lacks the documented path
    #[error("Unexpected {stage} response: {reason}")]
    UnexpectedResponse { stage: String, reason: String },

    /// Every structuring attempt was disqualified
    #[error("Couldn't parse the response after {attempts} attempts. Try again.")]
    CouldNotParse { attempts: u32 },

    /// The query looked like a prompt-injection attempt
    #[error("Nice try.")]
    InjectionDetected,

    /// Store backend failures outside SQLite itself, such as a lost worker
    #[error("Store error: {message}")]
    Store { message: String },

    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Named list does not exist
    #[error("List '{name}' not found")]
    ListNotFound { name: String },

    /// A list with this name already exists
    #[error("A list named '{name}' already exists")]
    ListExists { name: String },

    /// Category index or name does not resolve inside a list
    #[error("Category {category} not found in list '{list}'")]
    CategoryNotFound { list: String, category: String },

    /// Task or subtask position does not resolve inside a category
    #[error("Task {position} not found in list '{list}'")]
    TaskNotFound { list: String, position: String },

    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),

    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Characters of a provider error body kept in `RequestFailed`.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TasqeError {
        TasqeError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TasqeError {
        TasqeError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TasqeError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a `RequestFailed` error for a non-success HTTP status, keeping
    /// the start of the provider's response body.
    pub fn request_failed(endpoint: impl Into<String>, status: u16, body: &str) -> Self {
        let body = body.trim();
        let mut message = format!("status {status}");
        if !body.is_empty() {
            let prefix: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            let ellipsis = if prefix.len() < body.len() { "…" } else { "" };
            message.push_str(&format!(": {prefix}{ellipsis}"));
        }
        TasqeError::RequestFailed {
            endpoint: endpoint.into(),
            status: Some(status),
            message,
        }
    }

    /// Creates an `UnexpectedResponse` error for the given pipeline stage.
    pub fn unexpected(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        TasqeError::UnexpectedResponse {
            stage: stage.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TasqeError::database(message).with_source(e))
    }
}

/// Result type alias for tasqe operations
pub type Result<T> = std::result::Result<T, TasqeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_carries_status() {
        let err = TasqeError::request_failed("chat/completions", 503, "");
        match &err {
            TasqeError::RequestFailed { status, message, .. } => {
                assert_eq!(*status, Some(503));
                assert_eq!(message, "status 503");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(err.to_string().contains("chat/completions"));
    }

    #[test]
    fn test_request_failed_keeps_body_prefix() {
        let err = TasqeError::request_failed(
            "responses",
            401,
            r#" {"error":{"message":"Invalid API key"}} "#,
        );
        assert_eq!(
            err.to_string(),
            r#"Request to responses failed: status 401: {"error":{"message":"Invalid API key"}}"#
        );

        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 50);
        let err = TasqeError::request_failed("responses", 429, &long);
        let expected = format!("status 429: {}…", "x".repeat(MAX_ERROR_BODY_CHARS));
        assert!(err.to_string().ends_with(&expected));
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(TasqeError::InjectionDetected.to_string(), "Nice try.");
        assert!(TasqeError::CouldNotParse { attempts: 3 }
            .to_string()
            .starts_with("Couldn't parse"));
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = TasqeError::invalid_input("name").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );
    }
}
