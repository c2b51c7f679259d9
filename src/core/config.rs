//! Site configuration - passed from the page, or defaulted

use serde::Deserialize;

use super::typing::RoleSequence;
use super::{badges, repos, resources};

/// Browser-side settings. Every field is optional in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub roles: RoleSequence,
    pub github_user: String,
    pub featured_limit: usize,
    pub badges_url: String,
    pub resources_url: String,
    /// Relay URL for sign-ups; local-only capture when absent
    pub subscribe_endpoint: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            roles: RoleSequence::default(),
            github_user: repos::DEFAULT_USER.into(),
            featured_limit: repos::DEFAULT_LIMIT,
            badges_url: badges::DEFAULT_MARKDOWN_URL.into(),
            resources_url: resources::DEFAULT_URL.into(),
            subscribe_endpoint: None,
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_roles(mut self, roles: RoleSequence) -> Self { self.roles = roles; self }
    pub fn with_github_user(mut self, user: impl Into<String>) -> Self { self.github_user = user.into(); self }
    pub fn with_featured_limit(mut self, limit: usize) -> Self { self.featured_limit = limit; self }
    pub fn with_subscribe_endpoint(mut self, url: impl Into<String>) -> Self { self.subscribe_endpoint = Some(url.into()); self }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
