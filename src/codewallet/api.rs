//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every wallet operation, whatever the UI.
//!
//! It:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (display indexes, ranges and UUIDs into selectors)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never does business logic, terminal I/O or formatting.
//!
//! ## Generic Over StorageBackend
//!
//! `WalletApi<B: StorageBackend>` opens both the fragment store and the theme
//! store on one backend:
//! - Production: `WalletApi<FsBackend>`
//! - Testing: `WalletApi<MemBackend>`

use crate::commands;
use crate::error::{Result, WalletError};
use crate::index::{self, FragmentSelector};
use crate::model::FragmentPatch;
use crate::preferences::{Theme, ThemeStore};
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;
use crate::tags::DEFAULT_TAG_COLOR;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

/// The main API facade for wallet operations.
pub struct WalletApi<B: StorageBackend> {
    store: FragmentStore<Rc<B>>,
    theme: ThemeStore<Rc<B>>,
}

impl<B: StorageBackend> WalletApi<B> {
    pub fn new(backend: B) -> Self {
        Self::with_default_color(backend, DEFAULT_TAG_COLOR)
    }

    pub fn with_default_color(backend: B, default_color: impl Into<String>) -> Self {
        let backend = Rc::new(backend);
        Self {
            store: FragmentStore::open_with_default_color(Rc::clone(&backend), default_color),
            theme: ThemeStore::open(backend),
        }
    }

    pub fn store(&self) -> &FragmentStore<Rc<B>> {
        &self.store
    }

    pub fn create_fragment(
        &mut self,
        title: String,
        body: String,
        tags: Vec<String>,
    ) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, title, body, tags)
    }

    pub fn update_fragment(
        &mut self,
        index: &str,
        patch: FragmentPatch,
    ) -> Result<commands::CmdResult> {
        let selector = parse_single_selector(index)?;
        commands::update::run(&mut self.store, selector, patch)
    }

    pub fn view_fragments<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn list_fragments(&self, tag: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, tag)
    }

    pub fn search_fragments(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn delete_fragments<I: AsRef<str>>(
        &mut self,
        indexes: &[I],
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(indexes)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn import_fragments(
        &mut self,
        paths: Vec<PathBuf>,
        import_exts: &[String],
    ) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, paths, import_exts)
    }

    pub fn list_tags(&self, filter: Option<&str>) -> Result<commands::CmdResult> {
        commands::tags::list(&self.store, filter)
    }

    pub fn add_tag(&mut self, name: &str, color: Option<&str>) -> Result<commands::CmdResult> {
        commands::tags::add(&mut self.store, name, color)
    }

    pub fn remove_tags(&mut self, names: &[String]) -> Result<commands::CmdResult> {
        commands::tags::remove(&mut self.store, names)
    }

    pub fn rename_tag(
        &mut self,
        old_name: &str,
        new_name: &str,
        merge: bool,
    ) -> Result<commands::CmdResult> {
        commands::tags::rename(&mut self.store, old_name, new_name, merge)
    }

    pub fn set_tag_color(&mut self, name: &str, color: &str) -> Result<commands::CmdResult> {
        commands::tags::color(&mut self.store, name, color)
    }

    pub fn suggest_tags(&self, input: &str, exclude: &[String]) -> Vec<String> {
        self.store.suggest_tags(input, exclude)
    }

    pub fn theme(&self) -> Result<commands::CmdResult> {
        commands::theme::show(&self.theme)
    }

    pub fn toggle_theme(&self) -> Result<commands::CmdResult> {
        commands::theme::toggle(&self.theme)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<commands::CmdResult> {
        commands::theme::set(&self.theme, theme)
    }

    pub fn subscribe_theme(&self) -> Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store)
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<FragmentSelector>> {
    if inputs.is_empty() {
        return Err(WalletError::Api("No fragment selected".to_string()));
    }
    index::parse_selectors(inputs).map_err(WalletError::Api)
}

fn parse_single_selector(input: &str) -> Result<FragmentSelector> {
    input.parse().map_err(WalletError::Api)
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
