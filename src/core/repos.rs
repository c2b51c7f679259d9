//! Featured work: top repositories by stars, rendered as cards

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER: &str = "riteshsingh84";
pub const DEFAULT_LIMIT: usize = 6;

pub const LOADING: &str = "Loading featured projects…";
pub const EMPTY: &str = "No public repositories found.";
pub const FAILED: &str = "Could not load featured projects.";

/// Approximate characters per rendered line in a card
const CHARS_PER_LINE: usize = 80;
/// Descriptions estimated above this many lines get the expand overlay
const MAX_COLLAPSED_LINES: usize = 6;

const DEFAULT_LANGUAGE_COLOR: &str = "#9aa4b2";

/// Subset of the GitHub repository listing we render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

impl Repository {
    /// Homepage when set, repository page otherwise
    pub fn link(&self) -> &str {
        match self.homepage.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => &self.html_url,
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn language_color(&self) -> &'static str {
        self.language.as_deref().map(language_color).unwrap_or(DEFAULT_LANGUAGE_COLOR)
    }

    /// Layout-free estimate: 80 chars per line
    pub fn description_lines(&self) -> usize {
        self.description().chars().count().div_ceil(CHARS_PER_LINE)
    }

    pub fn needs_expansion(&self) -> bool {
        self.description_lines() > MAX_COLLAPSED_LINES
    }
}

pub fn listing_url(user: &str) -> String {
    format!("https://api.github.com/users/{}/repos?per_page=100", user)
}

pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Python" => "#3572A5",
        "C#" => "#178600",
        "C++" => "#f34b7d",
        "Java" => "#b07219",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

/// Most-starred first; ties keep listing order
pub fn featured(mut repos: Vec<Repository>, limit: usize) -> Vec<Repository> {
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos.truncate(limit);
    repos
}
