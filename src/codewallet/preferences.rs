//! The theme preference.
//!
//! A single dark/light flag with the same load, mutate, persist cycle as the
//! fragment store. Other parts of the program learn about changes through
//! [`ThemeStore::subscribe`]; they never write the preference themselves.

use crate::store::{Persistence, StorageBackend, StorageKey};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

pub struct ThemeStore<B: StorageBackend> {
    current: Cell<Theme>,
    subscribers: RefCell<Vec<Sender<Theme>>>,
    persistence: Persistence<B>,
}

impl<B: StorageBackend> ThemeStore<B> {
    /// Loads the stored theme. Nothing stored, or garbage, means light.
    pub fn open(backend: B) -> Self {
        let persistence = Persistence::new(backend);
        let current: Theme = persistence.load(StorageKey::Theme);
        Self {
            current: Cell::new(current),
            subscribers: RefCell::new(Vec::new()),
            persistence,
        }
    }

    pub fn get(&self) -> Theme {
        self.current.get()
    }

    pub fn is_dark(&self) -> bool {
        self.get().is_dark()
    }

    /// Sets the theme, persists it and notifies subscribers.
    ///
    /// Setting the current value again is a no-op.
    pub fn set(&self, theme: Theme) -> Theme {
        if self.current.get() == theme {
            return theme;
        }
        self.current.set(theme);
        self.persistence.save(StorageKey::Theme, &theme);
        self.notify(theme);
        theme
    }

    /// Flips the theme and returns the new value.
    pub fn toggle(&self) -> Theme {
        self.set(self.get().toggled())
    }

    /// Returns a receiver that gets every subsequent change.
    pub fn subscribe(&self) -> Receiver<Theme> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    pub fn is_degraded(&self) -> bool {
        self.persistence.is_degraded()
    }

    fn notify(&self, theme: Theme) {
        let mut subscribers = self.subscribers.borrow_mut();
        // Dropped receivers are pruned on the way.
        subscribers.retain(|tx| tx.send(theme).is_ok());
        debug!("Theme is now {} ({} subscribers)", theme, subscribers.len());
    }
}
