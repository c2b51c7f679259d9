//! Typing Animator: types and deletes roles from a cyclic list, forever.
//!
//! The animator is a pure state machine. Each call to [`TypingAnimator::advance`]
//! performs one timer firing and returns the [`Frame`] to display together with
//! the delay before the next firing. Drivers (the browser binding, tests) own
//! the clock; the animator never sleeps.
//!
//! ```text
//! Typing ──(pos == len, 1500ms)──► PausedFull ──(0ms)──► Deleting
//!   ▲                                                       │
//!   └──(0ms, index+1)── PausedEmpty ◄──(pos == 0, 300ms)────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default roles shown in the hero subtitle
pub const DEFAULT_ROLES: &[&str] = &[
    "AI Engineering Lead",
    "AI Consultant",
    "Product Engineer",
    "Software Architect",
    "Transformational Leader & Mentor",
    "Tech Community Mentor",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("role sequence must contain at least one role")]
    Empty,
}

/// Ordered, cyclic, non-empty list of roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSequence {
    roles: Vec<String>,
}

impl RoleSequence {
    pub fn new<I, S>(roles: I) -> Result<Self, RoleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(RoleError::Empty);
        }
        Ok(Self { roles })
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Role at `index`, wrapping modulo length
    pub fn get(&self, index: usize) -> &str {
        &self.roles[index % self.roles.len()]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.roles.len()
    }
}

impl Default for RoleSequence {
    fn default() -> Self {
        Self { roles: DEFAULT_ROLES.iter().map(|r| r.to_string()).collect() }
    }
}

impl<'de> Deserialize<'de> for RoleSequence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<String>::deserialize(deserializer)?;
        Self::new(roles).map_err(serde::de::Error::custom)
    }
}

/// Animation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub hold_full: Duration,
    pub hold_empty: Duration,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(90),
            delete_delay: Duration::from_millis(60),
            hold_full: Duration::from_millis(1500),
            hold_empty: Duration::from_millis(300),
        }
    }
}

impl TypingConfig {
    pub fn with_type_delay(mut self, d: Duration) -> Self { self.type_delay = d; self }
    pub fn with_delete_delay(mut self, d: Duration) -> Self { self.delete_delay = d; self }
    pub fn with_hold_full(mut self, d: Duration) -> Self { self.hold_full = d; self }
    pub fn with_hold_empty(mut self, d: Duration) -> Self { self.hold_empty = d; self }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Typing,
    PausedFull,
    Deleting,
    PausedEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimatorState {
    pub index: usize,
    /// Visible prefix length, in chars
    pub position: usize,
    pub mode: Mode,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self { index: 0, position: 0, mode: Mode::Typing }
    }
}

/// Output of one timer firing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    /// Wait before the next firing. Zero means "fire again immediately".
    pub delay: Duration,
}

/// Pure transition over one role of `role_len` chars.
///
/// Returns the next state and the delay to schedule. Display text is derived
/// from the returned state, so it always equals the role truncated to
/// `position`.
pub fn transition(state: AnimatorState, role_len: usize, roles: usize, config: &TypingConfig) -> (AnimatorState, Duration) {
    match state.mode {
        Mode::Typing if state.position < role_len => (
            AnimatorState { position: state.position + 1, ..state },
            config.type_delay,
        ),
        Mode::Typing => (AnimatorState { mode: Mode::PausedFull, ..state }, config.hold_full),
        Mode::PausedFull => (AnimatorState { mode: Mode::Deleting, ..state }, Duration::ZERO),
        Mode::Deleting if state.position > 0 => (
            AnimatorState { position: state.position - 1, ..state },
            config.delete_delay,
        ),
        Mode::Deleting => (AnimatorState { mode: Mode::PausedEmpty, ..state }, config.hold_empty),
        Mode::PausedEmpty => (
            AnimatorState { index: (state.index + 1) % roles.max(1), position: 0, mode: Mode::Typing },
            Duration::ZERO,
        ),
    }
}

/// Role truncated to `position` chars
pub fn visible_prefix(role: &str, position: usize) -> &str {
    match role.char_indices().nth(position) {
        Some((byte, _)) => &role[..byte],
        None => role,
    }
}

/// One animator instance per output target
#[derive(Debug, Clone)]
pub struct TypingAnimator {
    roles: RoleSequence,
    config: TypingConfig,
    state: AnimatorState,
}

impl TypingAnimator {
    pub fn new(roles: RoleSequence) -> Self {
        Self { roles, config: TypingConfig::default(), state: AnimatorState::default() }
    }

    pub fn with_config(mut self, config: TypingConfig) -> Self { self.config = config; self }

    pub fn state(&self) -> AnimatorState { self.state }

    pub fn config(&self) -> &TypingConfig { &self.config }

    pub fn current_role(&self) -> &str { self.roles.get(self.state.index) }

    /// Text currently on screen
    pub fn text(&self) -> &str {
        visible_prefix(self.current_role(), self.state.position)
    }

    /// Fire the timer once
    pub fn advance(&mut self) -> Frame {
        let role_len = self.current_role().chars().count();
        let (next, delay) = transition(self.state, role_len, self.roles.len(), &self.config);
        self.state = next;
        Frame { text: self.text().to_string(), delay }
    }
}
