// src/services/chat_api.rs
use async_trait::async_trait;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use tracing::debug;

use crate::{
    error::ChatError,
    message::{ChatRequest, ChatResponse},
    state::Attachment,
};

/// The two operations the remote chat service offers.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /chat` with `{ message }`, returning the reply text.
    async fn chat(&self, message: &str) -> Result<String, ChatError>;

    /// `POST /upload/` as multipart `file` + `question`, returning the reply text.
    async fn upload(&self, file: &Attachment, question: &str) -> Result<String, ChatError>;
}

#[derive(Clone, Debug)]
pub struct HttpChatApi {
    http: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .json(&ChatRequest { message: message.to_string() })
            .send()
            .await?;

        read_reply(response).await
    }

    async fn upload(&self, file: &Attachment, question: &str) -> Result<String, ChatError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("question", question.to_string());

        let response = self
            .http
            .post(format!("{}/upload/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        read_reply(response).await
    }
}

async fn read_reply(response: Response) -> Result<String, ChatError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::Status(status));
    }

    let body = response.bytes().await?;
    debug!(status = %status, len = body.len(), "chat service responded");
    let parsed: ChatResponse = serde_json::from_slice(&body)?;
    Ok(parsed.reply)
}
