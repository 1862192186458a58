//! The assistant chat: transcript, pending input and the single outstanding
//! request to the generation service.
//!
//! A turn cycle is `Idle -> Dispatched -> Idle`. `submit` appends the user
//! turn and spawns one request task; the task reports back over a channel and
//! the resolution (reply, empty reply, failure or timeout) always appends
//! exactly one assistant turn before the manager is `Idle` again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{ApiError, GenerateRequest, TextGenerator};
use crate::content::SYSTEM_INSTRUCTION;
use crate::events::AppEvent;
use crate::models::Turn;

pub const GREETING: &str =
    "你好！我是你的经院研伴。关于厦大生活、经院学业或者办事流程，有什么我可以帮你的吗？";

/// Shown when the service answers without usable text.
pub const EMPTY_REPLY_FALLBACK: &str = "抱歉，我现在思维有点混乱，请稍后再试。";

/// Shown when the call fails for any reason.
pub const FAILURE_FALLBACK: &str = "出错了，可能网络有点问题。建议直接查看相关导航。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dispatched,
}

pub struct ConversationManager {
    generator: Arc<dyn TextGenerator>,
    transcript: Vec<Turn>,
    pending_input: String,
    phase: Phase,
    reply_timeout: Duration,
    in_flight: Option<JoinHandle<()>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl ConversationManager {
    pub fn new(generator: Arc<dyn TextGenerator>, reply_timeout: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            generator,
            transcript: vec![Turn::assistant(GREETING)],
            pending_input: String::new(),
            phase: Phase::Idle,
            reply_timeout,
            in_flight: None,
            event_tx,
            event_rx,
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    #[allow(dead_code)]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.phase == Phase::Dispatched
    }

    pub fn on_input_change(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.pending_input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.pending_input.pop();
    }

    /// Submit whatever is currently in the input buffer.
    pub fn on_submit(&mut self) -> bool {
        let text = self.pending_input.clone();
        self.submit(&text)
    }

    /// Dispatch `text` to the generation service.
    ///
    /// Returns `false` without touching any state when `text` is blank or a
    /// reply is still outstanding. Must be called inside a tokio runtime.
    pub fn submit(&mut self, text: &str) -> bool {
        let prompt = text.trim();
        if prompt.is_empty() {
            tracing::debug!("ignoring blank submission");
            return false;
        }
        if self.phase == Phase::Dispatched {
            tracing::debug!("ignoring submission while a reply is outstanding");
            return false;
        }

        self.transcript.push(Turn::user(prompt));
        self.pending_input.clear();
        self.phase = Phase::Dispatched;

        let request = GenerateRequest::new(prompt, SYSTEM_INSTRUCTION);
        let generator = Arc::clone(&self.generator);
        let tx = self.event_tx.clone();
        let timeout = self.reply_timeout;

        tracing::info!(turns = self.transcript.len(), "dispatching prompt");

        self.in_flight = Some(tokio::spawn(async move {
            let event = match tokio::time::timeout(timeout, generator.generate(request)).await {
                Ok(Ok(response)) => AppEvent::ReplyReceived(response.text),
                Ok(Err(e)) => AppEvent::ReplyFailed(e.to_string()),
                Err(_) => AppEvent::ReplyFailed(ApiError::Timeout(timeout).to_string()),
            };
            // The receiver lives as long as the manager; a send error means it is gone.
            let _ = tx.send(event);
        }));

        true
    }

    /// Apply a resolution if one has arrived. Never blocks.
    pub fn poll_resolution(&mut self) -> bool {
        if let Ok(event) = self.event_rx.try_recv() {
            self.apply(event);
            return true;
        }

        let task_finished = self
            .in_flight
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if self.phase == Phase::Dispatched && task_finished {
            // The task may have reported between the first check and now.
            let event = self.event_rx.try_recv().unwrap_or_else(|_| {
                AppEvent::ReplyFailed("reply task ended without a result".to_string())
            });
            self.apply(event);
            return true;
        }

        false
    }

    /// Wait for the outstanding request, if any, and apply its resolution.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "reply task did not complete");
            }
        }

        if !self.poll_resolution() && self.phase == Phase::Dispatched {
            self.apply(AppEvent::ReplyFailed(
                "reply task ended without a result".to_string(),
            ));
        }
    }

    fn apply(&mut self, event: AppEvent) {
        if self.phase != Phase::Dispatched {
            tracing::warn!(?event, "dropping resolution with no outstanding request");
            return;
        }

        let text = match event {
            AppEvent::ReplyReceived(Some(text)) if !text.trim().is_empty() => text,
            AppEvent::ReplyReceived(_) => {
                tracing::warn!("generation service returned no text");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            AppEvent::ReplyFailed(error) => {
                tracing::warn!(%error, "assistant reply failed");
                FAILURE_FALLBACK.to_string()
            }
        };

        self.transcript.push(Turn::assistant(text));
        self.phase = Phase::Idle;
        self.in_flight = None;
    }
}

impl Drop for ConversationManager {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
