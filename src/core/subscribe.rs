//! Newsletter sign-up: validation, outcome messages, local fallback list

use once_cell::sync::Lazy;
use regex::Regex;

use super::paths::keys;
use super::store::PreferenceStore;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@(([^<>()\[\]\\.,;:\s@"]+\.)+[^<>()\[\]\\.,;:\s@"]{2,})$"#,
    )
    .expect("static email pattern")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// CSS variable used to color the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    AccentSecondary,
}

impl Tone {
    pub fn css_color(&self) -> &'static str {
        match self {
            Tone::Accent => "var(--accent)",
            Tone::AccentSecondary => "var(--accent-secondary)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Invalid,
    Subscribed,
    Rejected(String),
    /// Endpoint unreachable, address kept locally
    NetworkFallback,
    /// No endpoint configured, address kept locally
    SavedLocally,
}

impl SubscribeOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Invalid => "Please enter a valid email address.".into(),
            Self::Subscribed => "Subscribed — thanks! Check your inbox for confirmation.".into(),
            Self::Rejected(body) => format!("Subscription failed: {}", body),
            Self::NetworkFallback => "Subscription failed (network). Saved locally.".into(),
            Self::SavedLocally => "Subscribed locally — stored in browser.".into(),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Subscribed | Self::SavedLocally => Tone::Accent,
            Self::Invalid | Self::Rejected(_) | Self::NetworkFallback => Tone::AccentSecondary,
        }
    }

    pub fn clears_input(&self) -> bool {
        matches!(self, Self::Subscribed | Self::NetworkFallback | Self::SavedLocally)
    }

    pub fn saves_locally(&self) -> bool {
        matches!(self, Self::NetworkFallback | Self::SavedLocally)
    }
}

/// Result of posting to the relay endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointReply {
    Ok,
    Rejected(String),
    Unreachable,
}

/// Decide the outcome for a trimmed address. `reply` is `None` when no
/// endpoint is configured; it is only consulted for valid addresses.
pub fn outcome(email: &str, reply: Option<EndpointReply>) -> SubscribeOutcome {
    if !is_valid_email(email) {
        return SubscribeOutcome::Invalid;
    }
    match reply {
        None => SubscribeOutcome::SavedLocally,
        Some(EndpointReply::Ok) => SubscribeOutcome::Subscribed,
        Some(EndpointReply::Rejected(body)) => SubscribeOutcome::Rejected(body),
        Some(EndpointReply::Unreachable) => SubscribeOutcome::NetworkFallback,
    }
}

/// Append to the `subs` JSON list unless already present. A corrupt list is replaced.
pub fn save_local<S: PreferenceStore>(store: &S, email: &str) -> Vec<String> {
    let mut subs: Vec<String> = store
        .get(keys::SUBSCRIBERS)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();
    if !subs.iter().any(|s| s == email) {
        subs.push(email.to_string());
    }
    if let Ok(raw) = serde_json::to_string(&subs) {
        store.set(keys::SUBSCRIBERS, &raw);
    }
    subs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    #[test]
    fn validates_addresses() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("Ada.Lovelace@Mail.Example.ORG"));
        assert!(is_valid_email("\"odd name\"@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@example.c"));
        assert!(!is_valid_email("ada example@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn invalid_never_consults_reply() {
        assert_eq!(outcome("nope", Some(EndpointReply::Ok)), SubscribeOutcome::Invalid);
    }

    #[test]
    fn outcome_messages() {
        let rejected = outcome("a@b.io", Some(EndpointReply::Rejected("GitHub error: x".into())));
        assert_eq!(rejected.message(), "Subscription failed: GitHub error: x");
        assert!(!rejected.clears_input());
        assert_eq!(outcome("a@b.io", None), SubscribeOutcome::SavedLocally);
        assert!(outcome("a@b.io", Some(EndpointReply::Unreachable)).saves_locally());
        assert_eq!(SubscribeOutcome::Subscribed.tone().css_color(), "var(--accent)");
    }

    #[test]
    fn local_list_deduplicates() {
        let store = MemoryStore::new();
        save_local(&store, "a@b.io");
        save_local(&store, "c@d.io");
        let subs = save_local(&store, "a@b.io");
        assert_eq!(subs, ["a@b.io", "c@d.io"]);
        assert_eq!(store.get("subs").as_deref(), Some(r#"["a@b.io","c@d.io"]"#));
    }

    #[test]
    fn corrupt_list_is_reset() {
        let store = MemoryStore::new().with_entry("subs", "{not json");
        assert_eq!(save_local(&store, "a@b.io"), ["a@b.io"]);
    }
}
