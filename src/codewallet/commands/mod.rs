use crate::index::DisplayFragment;
use crate::model::Fragment;
use crate::preferences::Theme;
use crate::tags::TagSummary;

pub mod create;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod import;
pub mod list;
pub mod search;
pub mod tags;
pub mod theme;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command produced, for the client to render.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_fragments: Vec<Fragment>,
    pub listed_fragments: Vec<DisplayFragment>,
    pub listed_tags: Vec<TagSummary>,
    pub theme: Option<Theme>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_fragments(mut self, fragments: Vec<Fragment>) -> Self {
        self.affected_fragments = fragments;
        self
    }

    pub fn with_listed_fragments(mut self, fragments: Vec<DisplayFragment>) -> Self {
        self.listed_fragments = fragments;
        self
    }

    pub fn with_listed_tags(mut self, tags: Vec<TagSummary>) -> Self {
        self.listed_tags = tags;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Warns when the store could not write its last change to disk.
    pub fn with_durability_warning(mut self, degraded: bool) -> Self {
        if degraded {
            self.add_message(CmdMessage::warning(
                "Changes could not be saved to disk; they only live in this session.",
            ));
        }
        self
    }
}
