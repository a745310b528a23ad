use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::preferences::{Theme, ThemeStore};
use crate::store::StorageBackend;

pub fn show<B: StorageBackend>(store: &ThemeStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_theme(store.get()))
}

pub fn toggle<B: StorageBackend>(store: &ThemeStore<B>) -> Result<CmdResult> {
    let theme = store.toggle();
    finish(store, theme)
}

pub fn set<B: StorageBackend>(store: &ThemeStore<B>, theme: Theme) -> Result<CmdResult> {
    let theme = store.set(theme);
    finish(store, theme)
}

fn finish<B: StorageBackend>(store: &ThemeStore<B>, theme: Theme) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
    Ok(result
        .with_theme(theme)
        .with_durability_warning(store.is_degraded()))
}
