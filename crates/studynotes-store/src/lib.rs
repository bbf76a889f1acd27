//! studynotes-store: persisted user state and configuration.
//!
//! Keeps catalog edits, favorites, view history, and the selected subject in
//! a directory of JSON documents, and reads `studynotes.toml`.

pub mod config;
pub mod session;
pub mod store;

use anyhow::{Context, Result};

use studynotes_core::catalog::Catalog;
use studynotes_core::parser::load_catalog;

pub use config::{load_config, load_config_from, StudynotesConfig};
pub use session::Session;
pub use store::Store;

/// Open the session described by `config`.
///
/// The configured catalog, when set, replaces the built-in one as the base
/// that stored edits are layered over.
pub fn open_session(config: &StudynotesConfig) -> Result<Session> {
    let base = match &config.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin()?,
    };
    let mut session = Session::load_with(Store::open(&config.data_dir), base, config.history_limit)?;
    // Only applies until the user picks a subject themselves.
    if let Some(subject) = &config.default_subject {
        if !session.store().contains(store::SELECTED_SUBJECT_KEY) {
            if let Err(e) = session.select_subject(subject) {
                tracing::warn!("ignoring default_subject: {e}");
            }
        }
    }
    Ok(session)
}
