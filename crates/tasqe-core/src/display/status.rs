//! Confirmation messages for commands that change stored lists.

use std::fmt;

/// One confirmation line, optionally followed by bullet details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    message: String,
    details: Vec<String>,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Appends a bullet printed under the confirmation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)?;
        if !self.details.is_empty() {
            writeln!(f)?;
            for detail in &self.details {
                writeln!(f, "- {detail}")?;
            }
        }
        Ok(())
    }
}
