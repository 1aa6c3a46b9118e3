use crate::common::identity::SessionIdentity;

/// Send request handed from the UI to the write path.
#[derive(Debug, Clone)]
pub struct SendRequest {
    /// Raw composed text, not trimmed.
    pub content: String,
    pub sender: SessionIdentity,
}

/// Out-of-cadence request for the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    /// A message was just sent.
    AfterSend,
    /// User pressed "Try Again" on the error view.
    Retry,
    /// User pressed "Retry Connection"; probe connectivity first.
    Reconnect,
}
