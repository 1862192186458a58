// Event types for async communication

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The generation service answered; `None` when it produced no text
    ReplyReceived(Option<String>),
    /// The call failed, timed out, or its task died
    ReplyFailed(String),
}
