// src/message.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by both `POST /chat` and `POST /upload/`.
///
/// `reply` is required: a body without it fails to deserialize and is
/// treated like any other failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_message_field() {
        let body = serde_json::to_value(ChatRequest { message: "Hello".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Hello" }));
    }

    #[test]
    fn response_without_reply_is_rejected() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"answer":"x"}"#).is_err());
        assert!(serde_json::from_str::<ChatResponse>(r#"{"reply":null}"#).is_err());
    }

    #[test]
    fn response_ignores_extra_fields() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"Hi there","model":"mistral"}"#).unwrap();
        assert_eq!(resp.reply, "Hi there");
    }
}
