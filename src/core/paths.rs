//! Element, class and storage-key constants shared by the core and the DOM bindings
//!
//! Centralized registry for every id, selector and key the page markup
//! and the browser store agree on.

/// Hero typing animation
pub mod hero {
    pub const TYPING_TEXT: &str = "typing-text";
}

/// Theme toggle
pub mod theme {
    pub const TOGGLE: &str = "theme-toggle";
    pub const MOON_ICON: &str = ".theme-moon";
    pub const SUN_ICON: &str = ".theme-sun";

    pub const DARK_CLASS: &str = "dark-mode";
    pub const LIGHT_CLASS: &str = "light-mode";
}

/// Mobile navigation overlay
pub mod menu {
    pub const TOGGLE: &str = "menu-toggle";
    pub const CONTAINER: &str = "mobile-menu";
    pub const THEME_TOGGLE: &str = "mobile-theme-toggle";

    /// Focusable candidates, in document order
    pub const FOCUSABLE: &str = r#"a, button, [tabindex]:not([tabindex="-1"])"#;
    pub const LINKS: &str = "a";

    pub const OPEN_CLASS: &str = "open";
    pub const CLOSING_CLASS: &str = "closing";
}

/// Scroll reveal
pub mod reveal {
    pub const SELECTOR: &str = ".fade-in";
    pub const VISIBLE_CLASS: &str = "visible";
}

/// Footer
pub mod footer {
    pub const YEAR: &str = "year";
}

/// Card grids
pub mod widgets {
    pub const FEATURED_GRID: &str = "featured-grid";
    pub const ACHIEVEMENTS_GRID: &str = "achievements-grid";
    pub const RESOURCES_GRID: &str = "resources-grid";
}

/// Newsletter form
pub mod subscribe {
    pub const EMAIL_INPUT: &str = "subscribe-email";
    pub const BUTTON: &str = "subscribe-btn";
    pub const MESSAGE: &str = "subscribe-msg";
    /// Global a page may set to route sign-ups through the relay
    pub const ENDPOINT_GLOBAL: &str = "SUBSCRIBE_ENDPOINT";
}

/// Preference store keys
pub mod keys {
    pub const THEME: &str = "theme";
    pub const SUBSCRIBERS: &str = "subs";
}
