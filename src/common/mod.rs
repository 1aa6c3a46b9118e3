pub mod commands;
pub mod events;
pub mod identity;
pub mod types;

pub use commands::{RefreshRequest, SendRequest};
pub use events::ClientEvent;
pub use identity::SessionIdentity;
pub use types::{CreateMessageRequest, ErrorBody, Message, NewMessage};
