//! ContextIQ client core: the pieces of the workspace-assistant demo that
//! have actual state and contracts, plus a small terminal front-end.
//!
//! The crate is organized around three collaborators:
//! - [`core::settings`] owns the persisted user-preference record: load with
//!   default-fill merging, per-field setters, and intentionally best-effort
//!   persistence to a flat key-value store.
//! - [`api`] is a thin client for the optional remote backend. The base URL
//!   comes from the environment; its absence is a fully supported disabled
//!   mode in which every network operation fails fast.
//! - [`core::session`] drives one conversation's message list through the
//!   send lifecycle, reconciling the assistant placeholder with the eventual
//!   reply or error text.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`cli::run`], which dispatches subcommands onto the three layers.

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
