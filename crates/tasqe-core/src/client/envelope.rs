//! Typed response envelopes of the two provider endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TasqeError};

/// Free-text completion response (`choices[0].message.content`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutlineResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl OutlineResponse {
    /// Outline text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns `TasqeError::UnexpectedResponse` when the first choice or its
    /// content is missing.
    pub fn outline_text(&self) -> Result<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| TasqeError::unexpected("outline", "missing choices[0].message.content"))
    }
}

/// Structured completion response (`output[].content[]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredResponse {
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputItem {
    /// Absent on reasoning items
    #[serde(default)]
    pub content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl StructuredResponse {
    /// Text of the last `output_text` block across all output items.
    pub fn last_output_text(&self) -> Option<&str> {
        self.output
            .iter()
            .flat_map(|item| item.content.iter().flatten())
            .filter(|block| block.kind == "output_text")
            .filter_map(|block| block.text.as_deref())
            .last()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_outline_text_path() {
        let response: OutlineResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "- Health" } }]
        }))
        .unwrap();
        assert_eq!(response.outline_text().unwrap(), "- Health");
    }

    #[test]
    fn test_outline_text_missing_is_typed_error() {
        let response = OutlineResponse { choices: vec![] };
        assert!(matches!(
            response.outline_text(),
            Err(TasqeError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn test_last_output_text_skips_reasoning_and_other_blocks() {
        let response: StructuredResponse = serde_json::from_value(json!({
            "output": [
                { "type": "reasoning", "summary": [] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "first" },
                    { "type": "refusal", "refusal": "no" }
                ] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "second" }
                ] }
            ]
        }))
        .unwrap();
        assert_eq!(response.last_output_text(), Some("second"));
    }

    #[test]
    fn test_last_output_text_absent() {
        let response: StructuredResponse =
            serde_json::from_value(json!({ "output": [{ "type": "reasoning" }] })).unwrap();
        assert_eq!(response.last_output_text(), None);
    }
}
