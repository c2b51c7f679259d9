//! Achievements: badge cards extracted from a markdown document
//!
//! Badges are written as linked images, `[<img ... src="X" ...>](Y)`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const DEFAULT_MARKDOWN_URL: &str =
    "https://raw.githubusercontent.com/riteshsingh84/CopilotLearningPath/main/docs/badges/Ritesh-Badges.md";

pub const LOADING: &str = "Loading achievements…";
pub const EMPTY: &str = "No badges found.";
pub const FAILED: &str = "Could not load achievements.";

static BADGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[<img[^>]*src="([^"]+)"[^>]*>\]\(([^)]+)\)"#).expect("static badge pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub image_url: String,
    pub link_url: String,
}

/// All badges, document order
pub fn parse_badges(markdown: &str) -> Vec<Badge> {
    BADGE_RE
        .captures_iter(markdown)
        .map(|c| Badge { image_url: raw_image_url(&c[1]), link_url: c[2].to_string() })
        .collect()
}

/// Point `github.com/.../blob/...` image links at the raw content host
pub fn raw_image_url(src: &str) -> String {
    if src.contains("github.com") && !src.contains("raw.githubusercontent.com") {
        src.replacen("github.com", "raw.githubusercontent.com", 1).replacen("/blob/", "/", 1)
    } else {
        src.to_string()
    }
}
