use crate::common::types::Message;

/// Events from the network tasks to the UI.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The read path restarted (mount, refresh signal or retry).
    Loading,
    MessagesLoaded(Vec<Message>),
    LoadFailed(String),
    MessageSent(Message),
    SendFailed(String),
    Connectivity(bool),
}
