//! Success envelope shared by every route.

use serde::Serialize;

/// The success envelope: `{ "success": true, "message": ..., "data": ... }`.
///
/// Error responses use [`crate::error::ErrorBody`], which carries
/// `success: false` and an optional `errors` array instead of `data`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` on this envelope.
    pub success: bool,
    /// Human-readable outcome, present on mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload, absent on delete-style responses without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope with data and no message.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Envelope with both a message and data.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with a message and no data.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_envelope_omits_message() {
        let value = serde_json::to_value(ApiResponse::data(json!({"k": 1}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"k": 1}}));
    }

    #[test]
    fn message_only_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::message_only("Done")).unwrap();
        assert_eq!(value, json!({"success": true, "message": "Done"}));
    }
}
