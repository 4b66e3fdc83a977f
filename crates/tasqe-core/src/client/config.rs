//! Model provider configuration.

use std::time::Duration;

use jiff::civil::Date;

/// Default OpenAI-compatible endpoint root.
pub const DEFAULT_API_BASE: &str = "https://api.ai.it.ufl.edu/v1";

/// Default model for both stages.
pub const DEFAULT_MODEL: &str = "gpt-oss-120b";

/// Settings for [`super::ModelClient`] and [`super::HttpTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Endpoint root; `chat/completions` and `responses` are appended
    pub api_base: String,
    pub model: String,
    /// Sampling temperature of the extraction stage
    pub temperature: f32,
    pub extraction_effort: String,
    pub structuring_effort: String,
    pub verbosity: String,
    /// Per-request timeout enforced by the transport
    pub timeout: Duration,
    /// Date handed to the prompt templates; today's local date when unset
    pub fixed_date: Option<Date>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            extraction_effort: "low".to_string(),
            structuring_effort: "medium".to_string(),
            verbosity: "medium".to_string(),
            timeout: Duration::from_secs(120),
            fixed_date: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the endpoint root when `api_base` is given.
    pub fn with_api_base(mut self, api_base: Option<impl Into<String>>) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base.into();
        }
        self
    }

    /// Overrides the model when `model` is given.
    pub fn with_model(mut self, model: Option<impl Into<String>>) -> Self {
        if let Some(model) = model {
            self.model = model.into();
        }
        self
    }

    /// Pins the date used by the prompt templates.
    pub fn with_fixed_date(mut self, date: Date) -> Self {
        self.fixed_date = Some(date);
        self
    }

    /// Date to hand to the templates.
    pub fn today(&self) -> Date {
        self.fixed_date
            .unwrap_or_else(|| jiff::Zoned::now().date())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_overrides_only_apply_when_present() {
        let config = ClientConfig::new()
            .with_api_base(None::<String>)
            .with_model(Some("gpt-small"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, "gpt-small");
    }

    #[test]
    fn test_fixed_date_wins() {
        let config = ClientConfig::new().with_fixed_date(date(2025, 1, 6));
        assert_eq!(config.today(), date(2025, 1, 6));
    }
}
