//! Refinement Chat Thread
//!
//! Durable, append-only conversation history for the refinement loop.
//! Turns are never mutated or removed once appended; the only ephemeral
//! element is the typing indicator, which lives outside the durable history
//! and is addressed by identity so a late response can clear exactly the
//! indicator it created.

use serde::{Deserialize, Serialize};

/// Identifier for a chat turn (and for typing indicators)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl TurnId {
    /// Generate a new unique turn ID
    #[must_use]
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("turn_{id}"))
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who spoke a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The human refining the creative
    User,
    /// The refinement service
    Agent,
}

/// One durable message in the refinement conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Unique turn ID
    pub id: TurnId,
    /// Who spoke
    pub role: ChatRole,
    /// Message text
    pub text: String,
    /// When the turn was appended (Unix timestamp ms)
    pub timestamp: u64,
}

impl ChatTurn {
    /// Create a new turn stamped with the current time
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role,
            text: text.into(),
            timestamp: now_ms(),
        }
    }
}

/// The append-only refinement conversation
#[derive(Clone, Debug, Default)]
pub struct ChatThread {
    /// Durable history, oldest first
    turns: Vec<ChatTurn>,
    /// Outstanding typing indicator, if any
    typing_id: Option<TurnId>,
}

impl ChatThread {
    /// Create an empty thread
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn, returning a copy for the surface
    pub fn add_user_turn(&mut self, text: impl Into<String>) -> ChatTurn {
        let turn = ChatTurn::new(ChatRole::User, text);
        self.turns.push(turn.clone());
        turn
    }

    /// Append an agent turn, returning a copy for the surface
    pub fn add_agent_turn(&mut self, text: impl Into<String>) -> ChatTurn {
        let turn = ChatTurn::new(ChatRole::Agent, text);
        self.turns.push(turn.clone());
        turn
    }

    /// Start a typing indicator
    ///
    /// Not part of the durable history. Starting a new indicator while one
    /// is outstanding replaces it; the stale one is simply forgotten here
    /// and cleared on the surface by its own ID.
    pub fn start_typing(&mut self) -> TurnId {
        let id = TurnId::new();
        self.typing_id = Some(id.clone());
        id
    }

    /// Clear the typing indicator with the given identity
    ///
    /// Returns `true` if it was the outstanding one. Clearing an indicator
    /// that has already been superseded is harmless.
    pub fn clear_typing(&mut self, id: &TurnId) -> bool {
        if self.typing_id.as_ref() == Some(id) {
            self.typing_id = None;
            true
        } else {
            false
        }
    }

    /// Whether a typing indicator is outstanding
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing_id.is_some()
    }

    /// The durable history, oldest first
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of durable turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no durable turn has been appended yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Get current timestamp in milliseconds
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
