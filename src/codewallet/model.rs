use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A titled, tagged piece of stored text.
///
/// Serialized with camelCase field names so records written by earlier
/// versions of the wallet load unchanged. Those versions called the body
/// `code`, which is still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub id: Uuid,
    pub title: String,
    #[serde(alias = "code")]
    pub body: String,
    /// Tag names, each present in the tag registry
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fragment {
    pub fn new(title: String, body: String, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the fragment as modified now.
    ///
    /// `updated_at` never goes below `created_at`, even if the clock stepped
    /// backwards since creation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn char_count(&self) -> usize {
        self.body.chars().count()
    }

    pub fn line_count(&self) -> usize {
        // An empty body still occupies one (empty) line in the editor.
        self.body.split('\n').count()
    }
}

/// A partial update for a fragment. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl FragmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }
}
