use std::fmt;

/// Authenticated principal for the duration of one request.
///
/// Only ever produced by a strategy that verified a credential; handlers act on
/// this value, never on raw tokens or cookies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.user_id.fmt(f)
    }
}
