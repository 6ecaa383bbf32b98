// src/services/chat_session.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::{RwLock, RwLockWriteGuard, watch};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::chat_api::ChatApi;
use crate::state::{Attachment, Message, SessionSnapshot, SessionState};

/// Shown as the user's message when only a file is sent.
pub const UPLOAD_PLACEHOLDER: &str = "Uploaded a file";
/// Question sent with a file when the draft is empty.
pub const DEFAULT_QUESTION: &str = "Summarize this document";
/// Bot message appended when a request fails for any reason.
pub const ERROR_REPLY: &str = "Error: Failed to get response";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A request is already in flight.
    Busy,
    /// Draft is blank and no file is attached.
    NothingToSend,
}

/// What a call to [`ChatSession::send_message`] ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    Failed,
    Ignored(IgnoreReason),
}

enum Outbound {
    Text(String),
    Upload { file: Arc<Attachment>, question: String },
}

/// A send that passed the busy guard and is waiting on the chat service.
///
/// The user message is already in the transcript and the session is busy
/// until [`InFlight::complete`] runs.
#[must_use = "the session stays busy until the request completes"]
pub struct InFlight<A> {
    session: ChatSession<A>,
    outbound: Outbound,
}

impl<A: ChatApi> InFlight<A> {
    /// Await the reply and append it (or [`ERROR_REPLY`]) to the transcript.
    pub async fn complete(self) -> SendOutcome {
        self.session.finish(self.outbound).await
    }
}

/// Controller for one chat session.
///
/// Clones share the same state, so one task can keep editing the draft while
/// another awaits a reply. Only one request is ever in flight: `send_message`
/// is ignored while `busy` is set.
pub struct ChatSession<A> {
    id: Uuid,
    api: Arc<A>,
    state: Arc<RwLock<SessionState>>,
    updates: Arc<watch::Sender<SessionSnapshot>>,
}

impl<A> Clone for ChatSession<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl<A> Debug for ChatSession<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").field("id", &self.id).finish()
    }
}

impl<A: ChatApi> ChatSession<A> {
    pub fn new(api: A) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            id: Uuid::new_v4(),
            api: Arc::new(api),
            state: Arc::new(RwLock::new(SessionState::default())),
            updates: Arc::new(updates),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receiver that sees a fresh snapshot whenever the transcript or busy flag changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn draft(&self) -> String {
        self.state.read().await.draft_input.clone()
    }

    /// Replace the text being typed. Allowed while busy.
    pub async fn set_draft(&self, text: impl Into<String>) {
        self.state.write().await.draft_input = text.into();
    }

    /// Remember `file` for the next send. Nothing is uploaded yet.
    pub async fn on_file_selected(&self, file: Attachment) {
        let mut state = self.state.write().await;
        debug!(session_id = %self.id, filename = %file.filename, "file selected");
        state.pending_file = Some(Arc::new(file));
        self.publish(&state);
    }

    /// Send the draft (and pending file, if any) and append the reply.
    ///
    /// Failures never surface as errors: they are logged and turned into an
    /// [`ERROR_REPLY`] bot message. The returned future must be driven to
    /// completion, otherwise the session stays busy.
    pub async fn send_message(&self) -> SendOutcome {
        let state = self.state.write().await;
        match self.begin(state) {
            Ok(in_flight) => in_flight.complete().await,
            Err(ignored) => ignored,
        }
    }

    /// Type `text` and press send, as one step.
    ///
    /// Waits for any request in flight to finish first, so consecutive
    /// submits reach the transcript in call order and none is dropped. The
    /// draft is set and the send guard checked under the same lock.
    pub async fn submit(&self, text: impl Into<String>) -> Result<InFlight<A>, SendOutcome> {
        let text = text.into();
        let mut updates = self.subscribe();
        loop {
            let _ = updates.wait_for(|snap| !snap.busy).await;
            let mut state = self.state.write().await;
            if state.busy {
                continue;
            }
            state.draft_input = text;
            return self.begin(state);
        }
    }

    fn begin(
        &self,
        mut state: RwLockWriteGuard<'_, SessionState>,
    ) -> Result<InFlight<A>, SendOutcome> {
        if state.busy {
            debug!(session_id = %self.id, "send ignored, request in flight");
            return Err(SendOutcome::Ignored(IgnoreReason::Busy));
        }
        if state.draft_input.trim().is_empty() && state.pending_file.is_none() {
            return Err(SendOutcome::Ignored(IgnoreReason::NothingToSend));
        }

        let draft = std::mem::take(&mut state.draft_input);
        let shown = if draft.is_empty() { UPLOAD_PLACEHOLDER.to_string() } else { draft.clone() };
        state.messages.push(Message::user(shown));
        state.busy = true;
        self.publish(&state);

        let outbound = match state.pending_file.clone() {
            Some(file) => {
                let question = if draft.is_empty() { DEFAULT_QUESTION.to_string() } else { draft };
                Outbound::Upload { file, question }
            }
            None => Outbound::Text(draft),
        };
        Ok(InFlight { session: self.clone(), outbound })
    }

    async fn finish(&self, outbound: Outbound) -> SendOutcome {
        let result = match &outbound {
            Outbound::Text(message) => {
                info!(session_id = %self.id, "sending chat message");
                self.api.chat(message).await
            }
            Outbound::Upload { file, question } => {
                info!(
                    session_id = %self.id,
                    filename = %file.filename,
                    size = file.bytes.len(),
                    "uploading file"
                );
                self.api.upload(file, question).await
            }
        };

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(reply) => {
                if let Outbound::Upload { file, .. } = &outbound {
                    // A file picked while the upload ran stays pending.
                    if state.pending_file.as_ref().is_some_and(|p| Arc::ptr_eq(p, file)) {
                        state.pending_file = None;
                    }
                }
                state.messages.push(Message::bot(reply));
                SendOutcome::Replied
            }
            Err(err) => {
                error!(session_id = %self.id, error = %err, "chat request failed");
                state.messages.push(Message::bot(ERROR_REPLY));
                SendOutcome::Failed
            }
        };
        state.busy = false;
        self.publish(&state);
        outcome
    }

    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }
}
