use std::fmt;

pub const ANONYMOUS: &str = "Anonymous";

/// Display name this device posts under.
///
/// Unauthenticated; any client may claim any name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity(String);

impl SessionIdentity {
    /// Name typed into a prompt. Empty input falls back to `Anonymous`.
    pub fn from_input(raw: &str) -> Self {
        if raw.is_empty() {
            Self::anonymous()
        } else {
            Self(raw.to_string())
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `sender` was posted under this name.
    pub fn owns(&self, sender: &str) -> bool {
        self.0 == sender
    }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_becomes_anonymous() {
        assert_eq!(SessionIdentity::from_input("").as_str(), "Anonymous");
        assert_eq!(SessionIdentity::from_input("bob").as_str(), "bob");
        assert_eq!(SessionIdentity::from_input(" ").as_str(), " ");
    }

    #[test]
    fn ownership_is_exact_text_match() {
        let me = SessionIdentity::from_input("alice");
        assert!(me.owns("alice"));
        assert!(!me.owns("Alice"));
        assert!(!me.owns("alice "));
    }
}
