//! Dark/light theme toggle.
//!
//! The stored preference (`"dark"` / `"light"` under one `localStorage`
//! key) is applied on load; the checkbox and system color-scheme changes
//! both apply and persist the new value.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, MediaQueryListEvent, Storage};

use crate::config::ThemeConfig;
use crate::error::{OptionExt, PortfolioResult, ResultExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value written to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Theme at page load. Only an explicit `"dark"` switches it on.
    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn from_dark(dark: bool) -> Theme {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Persisted preference, one string value.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
}

/// Where the theme shows up: body class and checkbox state.
pub trait ThemeSurface {
    fn set_dark(&self, dark: bool);
    fn set_checked(&self, checked: bool);
}

pub struct ThemeToggle<P, S> {
    store: P,
    surface: S,
}

impl<P: PreferenceStore, S: ThemeSurface> ThemeToggle<P, S> {
    pub fn new(store: P, surface: S) -> Self {
        Self { store, surface }
    }

    /// Apply the stored preference. Nothing is written back.
    pub fn restore(&self) -> Theme {
        let theme = Theme::from_stored(self.store.load().as_deref());
        if theme.is_dark() {
            self.surface.set_dark(true);
            self.surface.set_checked(true);
        }
        theme
    }

    /// The checkbox changed.
    pub fn toggled(&self, checked: bool) -> Theme {
        let theme = Theme::from_dark(checked);
        self.surface.set_dark(theme.is_dark());
        self.store.save(theme.as_str());
        theme
    }

    /// The system color scheme changed.
    pub fn system_changed(&self, prefers_dark: bool) -> Theme {
        let theme = Theme::from_dark(prefers_dark);
        self.surface.set_dark(theme.is_dark());
        self.surface.set_checked(theme.is_dark());
        self.store.save(theme.as_str());
        theme
    }
}

struct LocalStore {
    storage: Option<Storage>,
    key: String,
}

impl PreferenceStore for LocalStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(&self.key, value).is_err() {
                log::warn!("[Theme] Failed to persist preference");
            }
        }
    }
}

struct PageSurface {
    body: HtmlElement,
    toggle: Option<HtmlInputElement>,
    dark_class: String,
}

impl ThemeSurface for PageSurface {
    fn set_dark(&self, dark: bool) {
        self.body
            .class_list()
            .toggle_with_force(&self.dark_class, dark)
            .log_err("[Theme] Failed to toggle dark class");
    }

    fn set_checked(&self, checked: bool) {
        if let Some(toggle) = &self.toggle {
            toggle.set_checked(checked);
        }
    }
}

/// Wire the theme toggle into the current page.
pub fn start(config: &ThemeConfig) -> PortfolioResult<()> {
    let window = web_sys::window().context("window")?;
    let document = window.document().context("document")?;
    let body = document.body().context("body")?;

    let toggle = document
        .get_element_by_id(&config.toggle_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if toggle.is_none() {
        log::warn!("[Theme] #{} not found, toggle disabled", config.toggle_id);
    }

    let storage = window.local_storage().ok().flatten();
    if storage.is_none() {
        log::warn!("[Theme] localStorage unavailable, preference will not persist");
    }

    let controller = Rc::new(ThemeToggle::new(
        LocalStore {
            storage,
            key: config.storage_key.clone(),
        },
        PageSurface {
            body,
            toggle: toggle.clone(),
            dark_class: config.dark_class.clone(),
        },
    ));

    let theme = controller.restore();
    log::debug!("[Theme] Restored {} theme", theme.as_str());

    if let Some(toggle) = toggle {
        let controller = Rc::clone(&controller);
        let input = toggle.clone();
        EventListener::new(&toggle, "change", move |_| {
            let theme = controller.toggled(input.checked());
            log::debug!("[Theme] Switched to {}", theme.as_str());
        })
        .forget();
    }

    if config.follow_system {
        if let Ok(Some(query)) = window.match_media("(prefers-color-scheme: dark)") {
            let controller = Rc::clone(&controller);
            EventListener::new(&query, "change", move |event| {
                if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
                    let theme = controller.system_changed(event.matches());
                    log::debug!("[Theme] System scheme changed to {}", theme.as_str());
                }
            })
            .forget();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryStore(RefCell<Option<String>>);

    impl PreferenceStore for &MemoryStore {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn save(&self, value: &str) {
            *self.0.borrow_mut() = Some(value.to_string());
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        dark: Cell<bool>,
        checked: Cell<bool>,
    }

    impl ThemeSurface for &FakeSurface {
        fn set_dark(&self, dark: bool) {
            self.dark.set(dark);
        }

        fn set_checked(&self, checked: bool) {
            self.checked.set(checked);
        }
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn test_restore_dark() {
        let store = MemoryStore(RefCell::new(Some("dark".to_string())));
        let surface = FakeSurface::default();
        let toggle = ThemeToggle::new(&store, &surface);

        assert_eq!(toggle.restore(), Theme::Dark);
        assert!(surface.dark.get());
        assert!(surface.checked.get());
    }

    #[test]
    fn test_restore_without_preference_writes_nothing() {
        let store = MemoryStore::default();
        let surface = FakeSurface::default();
        let toggle = ThemeToggle::new(&store, &surface);

        assert_eq!(toggle.restore(), Theme::Light);
        assert!(!surface.dark.get());
        assert!(store.0.borrow().is_none());
    }

    #[test]
    fn test_toggle_persists() {
        let store = MemoryStore::default();
        let surface = FakeSurface::default();
        let toggle = ThemeToggle::new(&store, &surface);

        toggle.toggled(true);
        assert!(surface.dark.get());
        assert_eq!(store.0.borrow().as_deref(), Some("dark"));

        toggle.toggled(false);
        assert!(!surface.dark.get());
        assert_eq!(store.0.borrow().as_deref(), Some("light"));
    }

    #[test]
    fn test_system_change_syncs_checkbox() {
        let store = MemoryStore::default();
        let surface = FakeSurface::default();
        let toggle = ThemeToggle::new(&store, &surface);

        toggle.system_changed(true);
        assert!(surface.dark.get());
        assert!(surface.checked.get());
        assert_eq!(store.0.borrow().as_deref(), Some("dark"));

        toggle.system_changed(false);
        assert!(!surface.checked.get());
        assert_eq!(store.0.borrow().as_deref(), Some("light"));
    }
}
