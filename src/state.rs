// src/state.rs
use std::{path::Path, sync::Arc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    /// Label shown in front of the message in the transcript.
    pub fn label(self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Bot => "Bot",
        }
    }
}

/// One entry of the transcript. Never mutated once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Bot, content: content.into() }
    }
}

/// A file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let mime_type = guess_mime_type(&filename).to_string();
        Self { filename, mime_type, bytes: bytes.into() }
    }

    /// Read a file from disk, keeping only its final path component as the name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(filename, bytes))
    }
}

fn guess_mime_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Everything the controller owns for one session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub messages: Vec<Message>,
    pub draft_input: String,
    pub pending_file: Option<Arc<Attachment>>,
    pub busy: bool,
}

impl SessionState {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            busy: self.busy,
            pending_file: self.pending_file.as_ref().map(|f| f.filename.clone()),
        }
    }
}

/// Read-only copy of the state a view needs to draw the pane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
    pub pending_file: Option<String>,
}
