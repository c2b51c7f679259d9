//! Relay Configuration - env first, CLI flags override

use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "riteshsingh84";
pub const DEFAULT_REPO: &str = "riteshsingh84.github.io";
pub const DEFAULT_EVENT_TYPE: &str = "collect_email";
pub const DEFAULT_PORT: u16 = 8787;

pub mod vars {
    pub const TOKEN: &str = "GITHUB_TOKEN";
    pub const OWNER: &str = "FOLIO_RELAY_OWNER";
    pub const REPO: &str = "FOLIO_RELAY_REPO";
    pub const API_BASE: &str = "FOLIO_RELAY_API_BASE";
    pub const PORT: &str = "FOLIO_RELAY_PORT";
}

#[derive(Clone)]
pub struct RelayConfig {
    pub owner: String,
    pub repo: String,
    /// Bearer credential for the dispatch endpoint. Never logged.
    pub token: String,
    pub api_base: String,
    pub event_type: String,
    pub port: u16,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("event_type", &self.event_type)
            .field("port", &self.port)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.into(),
            repo: DEFAULT_REPO.into(),
            token: String::new(),
            api_base: DEFAULT_API_BASE.into(),
            event_type: DEFAULT_EVENT_TYPE.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Default::default() }
    }

    /// Read every field from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(token) = env::var(vars::TOKEN) { config.token = token; }
        if let Ok(owner) = env::var(vars::OWNER) { config.owner = owner; }
        if let Ok(repo) = env::var(vars::REPO) { config.repo = repo; }
        if let Ok(base) = env::var(vars::API_BASE) { config.api_base = base; }
        if let Some(port) = env::var(vars::PORT).ok().and_then(|p| p.parse().ok()) { config.port = port; }
        config
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self { self.owner = owner.into(); self }
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self { self.repo = repo.into(); self }
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self { self.api_base = base.into(); self }
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self { self.event_type = event_type.into(); self }
    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }

    pub fn dispatch_url(&self) -> String {
        format!("{}/repos/{}/{}/dispatches", self.api_base.trim_end_matches('/'), self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_url_trims_slash() {
        let cfg = RelayConfig::new("t").with_api_base("http://127.0.0.1:9/").with_owner("o").with_repo("r");
        assert_eq!(cfg.dispatch_url(), "http://127.0.0.1:9/repos/o/r/dispatches");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = RelayConfig::new("ghp_secret");
        assert!(!format!("{:?}", cfg).contains("ghp_secret"));
    }
}
