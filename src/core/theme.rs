//! Dark/light theme persisted under the `theme` key

use super::paths::{keys, theme as ids};
use super::store::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Only an explicit `"light"` selects light; anything else is dark
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn view(self) -> ThemeView {
        match self {
            Theme::Dark => ThemeView {
                add_class: ids::DARK_CLASS,
                remove_class: ids::LIGHT_CLASS,
                aria_pressed: "true",
                show_sun: false,
            },
            Theme::Light => ThemeView {
                add_class: ids::LIGHT_CLASS,
                remove_class: ids::DARK_CLASS,
                aria_pressed: "false",
                show_sun: true,
            },
        }
    }
}

/// What the page must look like for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeView {
    pub add_class: &'static str,
    pub remove_class: &'static str,
    pub aria_pressed: &'static str,
    /// Sun icon visible, moon hidden
    pub show_sun: bool,
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Read the saved preference. Nothing is written on load.
    pub fn load(store: S) -> Self {
        let current = Theme::from_stored(store.get(keys::THEME).as_deref());
        Self { store, current }
    }

    pub fn current(&self) -> Theme { self.current }

    /// Flip and persist
    pub fn toggle(&mut self) -> ThemeView {
        self.current = self.current.toggled();
        self.store.set(keys::THEME, self.current.as_str());
        self.current.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    #[test]
    fn missing_or_unknown_is_dark() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let store = MemoryStore::new();
        let mut theme = ThemeController::load(store.clone());
        assert_eq!(theme.current(), Theme::Dark);
        assert_eq!(store.get("theme"), None);

        let view = theme.toggle();
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert_eq!(view.aria_pressed, "false");
        assert!(view.show_sun);

        theme.toggle();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn load_restores_light() {
        let store = MemoryStore::new().with_entry("theme", "light");
        let theme = ThemeController::load(store);
        assert_eq!(theme.current().view().add_class, "light-mode");
    }
}
