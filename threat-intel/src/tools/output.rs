use crate::error::{ErrorRecord, Result};
use crate::types::ImageEnvelope;
use serde::Serialize;

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

/// What a tool call hands back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Pretty-printed JSON of `value`
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::text(serde_json::to_string_pretty(value)?))
    }

    pub fn error_text<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    pub fn error(record: &ErrorRecord) -> Self {
        Self::error_text(record.to_tool_text())
    }

    /// Decoded image content, or an error output when the payload is unusable
    pub fn image(envelope: &ImageEnvelope) -> Self {
        if envelope.data.image.is_empty() {
            return Self::error_text("Error: No image data received from API");
        }

        match decode_data_url(&envelope.data.image) {
            Some((mime_type, data)) => Self {
                content: vec![ToolContent::Image {
                    data: data.to_string(),
                    mime_type: mime_type.to_string(),
                }],
                is_error: false,
            },
            None => Self::error_text("Error: Invalid image data format received from API"),
        }
    }

    /// Concatenated text blocks; image blocks are rendered as JSON
    pub fn to_display_string(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ToolContent::Text { text } => text.clone(),
                image => serde_json::to_string_pretty(image).unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split `data:<mime>;base64,<payload>` into mime type and payload
pub fn decode_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;

    if mime_type.is_empty() || mime_type.contains(';') || payload.is_empty() {
        return None;
    }

    Some((mime_type, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageData;
    use serde_json::json;

    fn envelope(image: &str) -> ImageEnvelope {
        ImageEnvelope {
            data: ImageData {
                image: image.to_string(),
            },
        }
    }

    #[test]
    fn test_decode_data_url() {
        assert_eq!(
            decode_data_url("data:image/png;base64,iVBORw0KGgo="),
            Some(("image/png", "iVBORw0KGgo="))
        );
        assert_eq!(decode_data_url("image/png;base64,abc"), None);
        assert_eq!(decode_data_url("data:;base64,abc"), None);
        assert_eq!(decode_data_url("data:image/png;base64,"), None);
        assert_eq!(decode_data_url("data:image/png;charset=x;base64,abc"), None);
    }

    #[test]
    fn test_image_output() {
        let output = ToolOutput::image(&envelope("data:image/jpeg;base64,/9j/4AAQ"));
        assert!(!output.is_error);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"content": [{"type": "image", "data": "/9j/4AAQ", "mimeType": "image/jpeg"}]})
        );
    }

    #[test]
    fn test_image_missing_or_malformed() {
        let output = ToolOutput::image(&envelope(""));
        assert!(output.is_error);
        assert_eq!(output.to_display_string(), "Error: No image data received from API");

        let output = ToolOutput::image(&envelope("not a data url"));
        assert!(output.is_error);
        assert_eq!(
            output.to_display_string(),
            "Error: Invalid image data format received from API"
        );
    }

    #[test]
    fn test_error_output() {
        let output = ToolOutput::error(&ErrorRecord::timeout());
        assert!(output.is_error);
        assert_eq!(
            output.to_display_string(),
            "Error: Request timeout (Status: 408, Code: timeout)"
        );
        assert_eq!(serde_json::to_value(&output).unwrap()["isError"], true);
    }

    #[test]
    fn test_json_output_is_pretty() {
        let output = ToolOutput::json(&json!({"data": [1]})).unwrap();
        assert!(!output.is_error);
        assert_eq!(output.to_display_string(), "{\n  \"data\": [\n    1\n  ]\n}");
        assert!(serde_json::to_value(&output).unwrap().get("isError").is_none());
    }
}
