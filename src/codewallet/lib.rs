//! # Codewallet Architecture
//!
//! Codewallet keeps a personal collection of short text records
//! ("fragments") labelled with free-form, colored tags. It is a library that
//! happens to have a CLI client: any UI drives it through [`api::WalletApi`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (indexes, ranges, UUIDs → selectors)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Operates on the stores, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores (store/fragment_store.rs, preferences.rs)           │
//! │  - Own fragments, tag registry, tag colors and the theme    │
//! │  - Enforce cross-references, run rename/remove cascades     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (store/mod.rs + StorageBackend)                │
//! │  - One JSON record per collection                           │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! The fragment store is the only writer of its three collections. Every
//! tag a fragment carries is registered; renaming or removing a tag rewrites
//! every fragment that carries it in the same step. Persistence is
//! best-effort: the in-memory state is authoritative, and a failed write
//! leaves the wallet running in a degraded, non-durable mode.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by all clients
//! - [`commands`]: one module per user-facing operation
//! - [`store`]: persistence adapter, backends and the fragment store
//! - [`search`]: substring search over fragments and tag names
//! - [`preferences`]: the dark/light theme with change notifications
//! - [`tags`]: tag types, normalization and validation
//! - [`index`]: display indexes and fragment selectors
//! - [`model`]: the fragment record
//! - [`config`]: layered configuration
//! - [`error`]: the crate error type

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod preferences;
pub mod search;
pub mod store;
pub mod tags;
