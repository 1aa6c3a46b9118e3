use crate::common::{ClientEvent, Message, SendRequest, SessionIdentity};

/// Read-path view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Error(String),
    Ready,
}

/// Message list as last fetched
#[derive(Debug)]
pub struct MessageFeed {
    status: FeedStatus,
    messages: Vec<Message>,
    scroll_pending: bool,
}

impl MessageFeed {
    pub fn new() -> Self {
        Self {
            status: FeedStatus::Loading,
            messages: Vec::new(),
            scroll_pending: false,
        }
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn begin_loading(&mut self) {
        self.status = FeedStatus::Loading;
    }

    pub fn apply_loaded(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.status = FeedStatus::Ready;
        self.scroll_pending = true;
    }

    pub fn apply_failed(&mut self, reason: String) {
        self.status = FeedStatus::Error(reason);
    }

    /// True once after each successful load
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }
}

/// Write-path view state
#[derive(Debug, Default)]
pub struct Composer {
    pub text: String,
    sending: bool,
    error: Option<String>,
}

impl Composer {
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.sending && !self.text.trim().is_empty()
    }

    /// Start a send of the raw text under `identity`.
    ///
    /// Returns `None` for whitespace-only text or while a send is in flight.
    pub fn submit(&mut self, identity: &SessionIdentity) -> Option<SendRequest> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.sending = true;
        Some(SendRequest {
            content: self.text.clone(),
            sender: identity.clone(),
        })
    }

    pub fn apply_sent(&mut self) {
        self.text.clear();
        self.sending = false;
    }

    pub fn apply_failed(&mut self, reason: String) {
        self.error = Some(reason);
        self.sending = false;
    }
}

/// Result of the startup reachability probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Checking,
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    FirstRun,
    Change,
}

/// Open "enter your username" dialog
#[derive(Debug)]
pub struct IdentityPrompt {
    pub kind: PromptKind,
    pub input: String,
}

impl IdentityPrompt {
    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::FirstRun => "Enter your username:",
            PromptKind::Change => "Enter your new username:",
        }
    }
}

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub feed: MessageFeed,
    pub composer: Composer,
    pub connectivity: Connectivity,
    pub prompt: Option<IdentityPrompt>,
    identity: Option<SessionIdentity>,
}

impl AppState {
    /// Opens the first-run prompt when no identity is stored yet
    pub fn new(identity: Option<SessionIdentity>) -> Self {
        let prompt = identity.is_none().then(|| IdentityPrompt {
            kind: PromptKind::FirstRun,
            input: String::new(),
        });
        Self {
            feed: MessageFeed::new(),
            composer: Composer::default(),
            connectivity: Connectivity::Checking,
            prompt,
            identity,
        }
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn apply_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Loading => self.feed.begin_loading(),
            ClientEvent::MessagesLoaded(messages) => self.feed.apply_loaded(messages),
            ClientEvent::LoadFailed(reason) => self.feed.apply_failed(reason),
            ClientEvent::MessageSent(_) => self.composer.apply_sent(),
            ClientEvent::SendFailed(reason) => self.composer.apply_failed(reason),
            ClientEvent::Connectivity(online) => {
                self.connectivity = if online {
                    Connectivity::Online
                } else {
                    Connectivity::Offline
                };
            }
        }
    }

    /// Start a send; nothing happens until an identity exists.
    pub fn submit(&mut self) -> Option<SendRequest> {
        let identity = self.identity.as_ref()?;
        self.composer.submit(identity)
    }

    pub fn begin_identity_change(&mut self) {
        self.prompt = Some(IdentityPrompt {
            kind: PromptKind::Change,
            input: String::new(),
        });
    }

    /// Close the prompt, adopting its input; returns the identity to persist.
    pub fn confirm_prompt(&mut self) -> Option<SessionIdentity> {
        let prompt = self.prompt.take()?;
        let identity = SessionIdentity::from_input(&prompt.input);
        self.identity = Some(identity.clone());
        Some(identity)
    }

    /// Dismissing behaves like submitting an empty name.
    pub fn dismiss_prompt(&mut self) -> Option<SessionIdentity> {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.clear();
        }
        self.confirm_prompt()
    }

    /// Retry Connection: back to the probing state.
    pub fn begin_reconnect(&mut self) {
        self.connectivity = Connectivity::Checking;
        self.feed.begin_loading();
    }
}

/// Whether `message` renders as this device's own.
///
/// Evaluated against the identity at render time, so renaming changes which
/// past messages highlight.
pub fn is_own(message: &Message, identity: Option<&SessionIdentity>) -> bool {
    identity.is_some_and(|identity| identity.owns(&message.sender))
}
