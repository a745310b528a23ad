//! The entity store: fragments, the tag registry and tag colors.
//!
//! [`FragmentStore`] is the single owner of the three collections. Every
//! mutation is computed on copies first and committed in one step, so an
//! operation either fully applies or leaves the store untouched. After the
//! commit, exactly the records that changed are flushed through
//! [`Persistence`].
//!
//! ## Invariants
//!
//! - every tag name attached to a fragment is in the registry
//! - the registry has no duplicate names
//! - after a rename or removal, no color entry outlives its tag
//! - `updated_at >= created_at` on every fragment, and `updated_at` moves
//!   whenever a fragment or one of its tags changes
//!
//! Auto-registration is the documented side effect that keeps the first one
//! true: attaching an unknown tag name to a fragment registers it with the
//! default color.

use super::{Persistence, StorageBackend, StorageKey};
use crate::error::{Result, WalletError};
use crate::model::{Fragment, FragmentPatch};
use crate::search;
use crate::tags::validation::{validate_body, validate_title};
use crate::tags::{
    normalize_tag_list, normalize_tag_name, Tag, TagSummary, ValidationError, DEFAULT_TAG_COLOR,
};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Records touched by an operation.
#[derive(Debug, Default, Clone, Copy)]
struct Dirty {
    fragments: bool,
    tags: bool,
    colors: bool,
}

impl Dirty {
    const ALL: Dirty = Dirty {
        fragments: true,
        tags: true,
        colors: true,
    };

    fn any(&self) -> bool {
        self.fragments || self.tags || self.colors
    }
}

/// What a [`FragmentStore::rename_tag`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// New name was blank or identical to the old one
    Unchanged,
    /// Tag renamed; `fragments` fragments were rewritten
    Renamed { fragments: usize },
    /// New name already existed, the two tags are now one
    Merged { fragments: usize },
}

/// Report from reconciling loaded records with each other.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub registered_missing_tags: usize,
    pub dropped_duplicate_tags: usize,
    pub cleaned_fragment_tags: usize,
    pub dropped_stale_colors: usize,
    pub fixed_timestamps: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        *self == ReconcileReport::default()
    }

    /// Add the counts of `other` to this report.
    pub fn merge(&mut self, other: &ReconcileReport) {
        self.registered_missing_tags += other.registered_missing_tags;
        self.dropped_duplicate_tags += other.dropped_duplicate_tags;
        self.cleaned_fragment_tags += other.cleaned_fragment_tags;
        self.dropped_stale_colors += other.dropped_stale_colors;
        self.fixed_timestamps += other.fixed_timestamps;
    }
}

pub struct FragmentStore<B: StorageBackend> {
    fragments: Vec<Fragment>,
    tags: Vec<String>,
    colors: BTreeMap<String, String>,
    default_color: String,
    persistence: Persistence<B>,
    // repairs made while opening, not yet reported by `doctor`
    load_report: ReconcileReport,
}

impl<B: StorageBackend> FragmentStore<B> {
    /// Load the store from `backend` using the built-in default tag color.
    pub fn open(backend: B) -> Self {
        Self::open_with_default_color(backend, DEFAULT_TAG_COLOR)
    }

    /// Load the store from `backend`.
    ///
    /// Each record loads on its own; a missing or malformed record becomes an
    /// empty collection. The loaded records are then reconciled, and the
    /// repaired ones are written back. Colors stored for unregistered names
    /// are kept; only [`FragmentStore::doctor`] prunes them.
    pub fn open_with_default_color(backend: B, default_color: impl Into<String>) -> Self {
        let persistence = Persistence::new(backend);
        let fragments: Vec<Fragment> = persistence.load(StorageKey::Fragments);
        let tags: Vec<String> = persistence.load(StorageKey::Tags);
        let colors: BTreeMap<String, String> = persistence.load(StorageKey::TagColors);

        let mut store = Self {
            fragments,
            tags,
            colors,
            default_color: default_color.into(),
            persistence,
            load_report: ReconcileReport::default(),
        };

        let (report, dirty) = store.reconcile(false);
        if dirty.any() {
            warn!("Repaired stored records on load: {:?}", report);
            store.flush(dirty);
        }
        store.load_report = report;
        debug!(
            "Opened store with {} fragments and {} tags",
            store.fragments.len(),
            store.tags.len()
        );
        store
    }

    /// Reconcile the current state and drop colors of unregistered names.
    ///
    /// The returned report also counts the repairs made when the store was
    /// opened, so they are reported once even though they already happened.
    pub fn doctor(&mut self) -> ReconcileReport {
        let (report, dirty) = self.reconcile(true);
        self.flush(dirty);
        let mut total = std::mem::take(&mut self.load_report);
        total.merge(&report);
        total
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// True when the last flush failed and the store runs without durability.
    pub fn is_degraded(&self) -> bool {
        self.persistence.is_degraded()
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    // --- Fragments ---

    /// Create a fragment and append it to the collection.
    ///
    /// Tag names are trimmed and deduplicated. Names not yet in the registry
    /// are registered with the default color.
    pub fn add_fragment<I, S>(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: I,
    ) -> Result<Fragment>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title.into();
        let body = body.into();
        validate_title(&title)?;
        validate_body(&body)?;

        let tags = normalize_tag_list(tags);
        let fragment = Fragment::new(title, body, tags);

        let registered = self.register_missing(&fragment.tags);
        self.fragments.push(fragment.clone());

        self.flush(Dirty {
            fragments: true,
            tags: registered > 0,
            colors: false,
        });
        Ok(fragment)
    }

    /// Merge `patch` into the fragment with `id`.
    ///
    /// Fields absent from the patch are left alone. `updated_at` is bumped
    /// even for an empty patch.
    pub fn update_fragment(&mut self, id: &Uuid, patch: FragmentPatch) -> Result<Fragment> {
        let pos = self
            .position(id)
            .ok_or(WalletError::FragmentNotFound(*id))?;

        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(body) = &patch.body {
            validate_body(body)?;
        }

        let mut updated = self.fragments[pos].clone();
        if let Some(title) = patch.title {
            updated.title = title;
        }
        if let Some(body) = patch.body {
            updated.body = body;
        }
        if let Some(tags) = patch.tags {
            updated.tags = normalize_tag_list(tags);
        }
        updated.touch();

        let registered = self.register_missing(&updated.tags);
        self.fragments[pos] = updated.clone();

        self.flush(Dirty {
            fragments: true,
            tags: registered > 0,
            colors: false,
        });
        Ok(updated)
    }

    /// Remove the fragment with `id`. Returns false if there was none.
    pub fn delete_fragment(&mut self, id: &Uuid) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.fragments.remove(pos);
        self.flush(Dirty {
            fragments: true,
            ..Dirty::default()
        });
        true
    }

    pub fn get_fragment(&self, id: &Uuid) -> Option<Fragment> {
        self.fragment(id).cloned()
    }

    pub fn fragment(&self, id: &Uuid) -> Option<&Fragment> {
        self.fragments.iter().find(|f| &f.id == id)
    }

    /// Snapshot of all fragments, insertion order.
    pub fn list_fragments(&self) -> Vec<Fragment> {
        self.fragments.clone()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Fragments carrying tag `name`, collection order.
    pub fn fragments_by_tag(&self, name: &str) -> Vec<Fragment> {
        self.fragments
            .iter()
            .filter(|f| f.has_tag(name))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search, see [`crate::search::search`].
    pub fn search(&self, term: &str) -> Vec<Fragment> {
        search::search(&self.fragments, term)
    }

    // --- Tags ---

    /// Register a tag explicitly.
    ///
    /// Fails validation if the trimmed name is blank or already registered.
    pub fn add_tag(&mut self, name: &str, color: Option<&str>) -> Result<Tag> {
        let name = normalize_tag_name(name)?;
        if self.tag_exists(&name) {
            return Err(ValidationError::DuplicateTag(name).into());
        }

        self.tags.push(name.clone());
        if let Some(color) = color {
            self.colors.insert(name.clone(), color.to_string());
        }

        self.flush(Dirty {
            tags: true,
            colors: color.is_some(),
            ..Dirty::default()
        });
        Ok(Tag::new(name.clone(), self.get_tag_color(&name)))
    }

    /// Remove a tag from the registry, from the color map and from every
    /// fragment that carries it.
    ///
    /// Returns false when nothing referenced `name`.
    pub fn remove_tag(&mut self, name: &str) -> bool {
        let mut tags = self.tags.clone();
        tags.retain(|t| t != name);
        let registry_changed = tags.len() != self.tags.len();

        let mut colors = self.colors.clone();
        let color_changed = colors.remove(name).is_some();

        let mut fragments = self.fragments.clone();
        let mut touched = 0;
        for fragment in fragments.iter_mut().filter(|f| f.has_tag(name)) {
            fragment.tags.retain(|t| t != name);
            fragment.touch();
            touched += 1;
        }

        if !registry_changed && !color_changed && touched == 0 {
            return false;
        }

        self.tags = tags;
        self.colors = colors;
        self.fragments = fragments;
        debug!("Removed tag '{}' from {} fragments", name, touched);

        self.flush(Dirty::ALL);
        true
    }

    /// Rename tag `old_name` to `new_name` everywhere.
    ///
    /// `new_name` is trimmed; a blank or unchanged name is a no-op. If
    /// `new_name` is already registered the two tags are merged: the
    /// registry keeps the existing entry, the renamed tag's color (if any)
    /// wins, and fragments carrying both end up with one.
    pub fn rename_tag(&mut self, old_name: &str, new_name: &str) -> Result<RenameOutcome> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == old_name {
            return Ok(RenameOutcome::Unchanged);
        }
        if !self.tag_exists(old_name) {
            return Err(WalletError::TagNotFound(old_name.to_string()));
        }
        let merging = self.tag_exists(new_name);

        // 1. Registry
        let tags: Vec<String> = if merging {
            self.tags
                .iter()
                .filter(|t| *t != old_name)
                .cloned()
                .collect()
        } else {
            self.tags
                .iter()
                .map(|t| {
                    if t == old_name {
                        new_name.to_string()
                    } else {
                        t.clone()
                    }
                })
                .collect()
        };

        // 2. Colors
        let mut colors = self.colors.clone();
        if let Some(color) = colors.remove(old_name) {
            colors.insert(new_name.to_string(), color);
        }

        // 3. Fragments
        let mut fragments = self.fragments.clone();
        let mut touched = 0;
        for fragment in fragments.iter_mut().filter(|f| f.has_tag(old_name)) {
            let renamed = fragment.tags.iter().map(|t| {
                if t == old_name {
                    new_name
                } else {
                    t.as_str()
                }
            });
            fragment.tags = normalize_tag_list(renamed);
            fragment.touch();
            touched += 1;
        }

        self.tags = tags;
        self.colors = colors;
        self.fragments = fragments;
        info!(
            "{} tag '{}' to '{}' ({} fragments)",
            if merging { "Merged" } else { "Renamed" },
            old_name,
            new_name,
            touched
        );

        self.flush(Dirty::ALL);
        Ok(if merging {
            RenameOutcome::Merged { fragments: touched }
        } else {
            RenameOutcome::Renamed { fragments: touched }
        })
    }

    /// Set the color for `name`, registered or not.
    pub fn set_tag_color(&mut self, name: &str, color: &str) {
        self.colors.insert(name.to_string(), color.to_string());
        self.flush(Dirty {
            colors: true,
            ..Dirty::default()
        });
    }

    /// The stored color for `name`, or the default color.
    pub fn get_tag_color(&self, name: &str) -> String {
        self.colors
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default_color.clone())
    }

    /// Snapshot of the registry with resolved colors, registration order.
    pub fn list_tags(&self) -> Vec<Tag> {
        self.tags
            .iter()
            .map(|name| Tag::new(name.clone(), self.get_tag_color(name)))
            .collect()
    }

    pub fn tag_names(&self) -> &[String] {
        &self.tags
    }

    pub fn tag_exists(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    /// Number of fragments carrying `name`.
    pub fn tag_usage(&self, name: &str) -> usize {
        self.fragments.iter().filter(|f| f.has_tag(name)).count()
    }

    pub fn tag_summaries(&self) -> Vec<TagSummary> {
        self.list_tags()
            .into_iter()
            .map(|tag| {
                let usage = self.tag_usage(&tag.name);
                TagSummary { tag, usage }
            })
            .collect()
    }

    /// Registered tags whose name contains `term`, case-insensitively.
    pub fn filter_tags(&self, term: &str) -> Vec<Tag> {
        search::filter_names(&self.tags, term)
            .into_iter()
            .map(|name| Tag::new(name.clone(), self.get_tag_color(&name)))
            .collect()
    }

    /// Autocomplete candidates for `input`, skipping names in `exclude`.
    pub fn suggest_tags(&self, input: &str, exclude: &[String]) -> Vec<String> {
        search::suggest_names(&self.tags, input, exclude)
    }

    // --- Internals ---

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.fragments.iter().position(|f| &f.id == id)
    }

    /// Registers names missing from the registry. Returns how many were added.
    fn register_missing(&mut self, names: &[String]) -> usize {
        let mut added = 0;
        for name in names {
            if !self.tag_exists(name) {
                debug!("Auto-registering tag '{}'", name);
                self.tags.push(name.clone());
                added += 1;
            }
        }
        added
    }

    fn reconcile(&mut self, prune_colors: bool) -> (ReconcileReport, Dirty) {
        let mut report = ReconcileReport::default();
        let mut dirty = Dirty::default();

        // 1. Registry: drop blank and duplicate names
        let mut seen = HashSet::new();
        let before = self.tags.len();
        self.tags
            .retain(|t| !t.trim().is_empty() && seen.insert(t.clone()));
        report.dropped_duplicate_tags = before - self.tags.len();

        // 2. Fragment tag lists and timestamps
        for fragment in &mut self.fragments {
            let cleaned = normalize_tag_list(&fragment.tags);
            if cleaned != fragment.tags {
                fragment.tags = cleaned;
                fragment.touch();
                report.cleaned_fragment_tags += 1;
            }
            if fragment.updated_at < fragment.created_at {
                fragment.updated_at = fragment.created_at;
                report.fixed_timestamps += 1;
            }
        }

        // 3. Register tags used by fragments but missing from the registry
        let used: Vec<String> = self
            .fragments
            .iter()
            .flat_map(|f| f.tags.iter().cloned())
            .collect();
        report.registered_missing_tags = self.register_missing(&used);

        // 4. Drop colors of unregistered tags
        if prune_colors {
            let registry: HashSet<&String> = self.tags.iter().collect();
            let before = self.colors.len();
            self.colors.retain(|name, _| registry.contains(name));
            report.dropped_stale_colors = before - self.colors.len();
        }

        dirty.fragments = report.cleaned_fragment_tags > 0 || report.fixed_timestamps > 0;
        dirty.tags = report.dropped_duplicate_tags > 0 || report.registered_missing_tags > 0;
        dirty.colors = report.dropped_stale_colors > 0;
        (report, dirty)
    }

    fn flush(&self, dirty: Dirty) {
        if !dirty.any() {
            return;
        }
        let mut durable = true;
        if dirty.fragments {
            durable &= self.persistence.save(StorageKey::Fragments, &self.fragments);
        }
        if dirty.tags {
            durable &= self.persistence.save(StorageKey::Tags, &self.tags);
        }
        if dirty.colors {
            durable &= self.persistence.save(StorageKey::TagColors, &self.colors);
        }
        // a later record succeeding must not hide an earlier failure
        self.persistence.set_degraded(!durable);
    }
}
