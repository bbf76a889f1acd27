//! The user's working state: catalog edits, favorites, view history, and the
//! selected subject, loaded from and saved to a [`Store`].

use anyhow::Result;
use chrono::Utc;

use studynotes_core::catalog::Catalog;
use studynotes_core::error::CatalogError;
use studynotes_core::model::{NewTopic, Subject, Topic};
use studynotes_core::overlay::{Favorites, ViewEntry, ViewHistory, DEFAULT_HISTORY_LIMIT};

use crate::store::{Store, FAVORITES_KEY, HISTORY_KEY, SELECTED_SUBJECT_KEY, TOPICS_KEY};

/// Everything a command needs to read or mutate.
#[derive(Debug)]
pub struct Session {
    store: Store,
    pub catalog: Catalog,
    pub favorites: Favorites,
    pub history: ViewHistory,
    selected_subject: Option<String>,
}

impl Session {
    /// Load state from `store`, falling back to the built-in catalog.
    pub fn load(store: Store) -> Result<Self> {
        Self::load_with(store, Catalog::builtin()?, DEFAULT_HISTORY_LIMIT)
    }

    /// Load state from `store`, using `base` when no edited catalog is stored.
    pub fn load_with(store: Store, base: Catalog, history_limit: usize) -> Result<Self> {
        let catalog = store.get::<Catalog>(TOPICS_KEY).unwrap_or(base);
        let favorites = store.get::<Favorites>(FAVORITES_KEY).unwrap_or_default();
        let entries = store.get::<Vec<ViewEntry>>(HISTORY_KEY).unwrap_or_default();
        let history = ViewHistory::from_entries(entries, history_limit);
        let selected_subject = store
            .get::<String>(SELECTED_SUBJECT_KEY)
            .filter(|id| catalog.subject(id).is_some());

        tracing::debug!(
            dir = %store.dir().display(),
            topics = catalog.topic_count(),
            favorites = favorites.len(),
            "session loaded"
        );

        Ok(Self {
            store,
            catalog,
            favorites,
            history,
            selected_subject,
        })
    }

    /// Write every piece of state back to the store.
    pub fn save(&self) -> Result<()> {
        self.store.set(TOPICS_KEY, &self.catalog)?;
        self.store.set(FAVORITES_KEY, &self.favorites)?;
        self.store.set(HISTORY_KEY, self.history.entries())?;
        match &self.selected_subject {
            Some(id) => self.store.set(SELECTED_SUBJECT_KEY, id)?,
            None => self.store.remove(SELECTED_SUBJECT_KEY)?,
        }
        Ok(())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The selected subject, or the first subject when none is selected.
    pub fn current_subject(&self) -> Option<&Subject> {
        self.selected_subject
            .as_deref()
            .and_then(|id| self.catalog.subject(id))
            .or_else(|| self.catalog.subjects.first())
    }

    pub fn select_subject(&mut self, subject_id: &str) -> Result<&Subject, CatalogError> {
        let subject = self
            .catalog
            .subject(subject_id)
            .ok_or_else(|| CatalogError::SubjectNotFound(subject_id.to_string()))?;
        self.selected_subject = Some(subject.id.clone());
        Ok(subject)
    }

    /// The topic sequence a listing of `subject` shows for `term`, optionally
    /// restricted to favorites. Order follows the catalog.
    pub fn displayed_topics(
        &self,
        subject_id: &str,
        term: &str,
        favorites_only: bool,
    ) -> Vec<&Topic> {
        let hits = self.catalog.search_topics_in_subject(subject_id, term);
        if favorites_only {
            self.favorites.filter(hits)
        } else {
            hits
        }
    }

    /// Note a view of topic `id` now.
    pub fn record_view(&mut self, id: u32) -> Result<(), CatalogError> {
        if self.catalog.topic(id).is_none() {
            return Err(CatalogError::TopicNotFound(id));
        }
        self.history.record(id, Utc::now());
        Ok(())
    }

    /// Flip the favorite flag of topic `id`. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: u32) -> Result<bool, CatalogError> {
        if self.catalog.topic(id).is_none() {
            return Err(CatalogError::TopicNotFound(id));
        }
        Ok(self.favorites.toggle(id))
    }

    pub fn create_topic(&mut self, subject_id: &str, new: NewTopic) -> Result<&Topic, CatalogError> {
        self.catalog.create_topic(subject_id, new)
    }

    /// Delete topic `id` and forget it in favorites and history.
    pub fn delete_topic(&mut self, id: u32) -> Result<Topic, CatalogError> {
        let removed = self.catalog.delete_topic(id)?;
        self.favorites.retain_existing(&self.catalog);
        self.history.retain_existing(&self.catalog);
        Ok(removed)
    }

    /// Drop every stored value, returning to the base catalog on next load.
    pub fn reset(&self) -> Result<()> {
        for key in [TOPICS_KEY, FAVORITES_KEY, HISTORY_KEY, SELECTED_SUBJECT_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(dir: &std::path::Path) -> Session {
        Session::load(Store::open(dir)).unwrap()
    }

    #[test]
    fn empty_store_uses_builtin_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        assert_eq!(session.catalog, Catalog::builtin().unwrap());
        assert!(session.favorites.is_empty());
        assert!(session.history.is_empty());
        assert_eq!(
            session.current_subject().map(|s| s.id.as_str()),
            Some("algoritmos-estruturas-dados")
        );
    }

    #[test]
    fn state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        let id = s
            .create_topic(
                "projeto-integrador-extensionista",
                NewTopic {
                    title: "Retrospectiva".into(),
                    ..Default::default()
                },
            )
            .unwrap()
            .id;
        s.toggle_favorite(id).unwrap();
        s.record_view(id).unwrap();
        s.select_subject("projeto-integrador-extensionista").unwrap();
        s.save().unwrap();

        let reloaded = session(dir.path());
        assert_eq!(reloaded.catalog.topic(id).unwrap().title, "Retrospectiva");
        assert!(reloaded.favorites.contains(id));
        assert_eq!(reloaded.history.entries()[0].id, id);
        assert_eq!(
            reloaded.current_subject().unwrap().id,
            "projeto-integrador-extensionista"
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("topics.json"), "[[[").unwrap();
        std::fs::write(dir.path().join("favorites.json"), "{\"oops\": true}").unwrap();
        std::fs::write(dir.path().join("viewHistory.json"), "null").unwrap();

        let s = session(dir.path());
        assert_eq!(s.catalog, Catalog::builtin().unwrap());
        assert!(s.favorites.is_empty());
        assert!(s.history.is_empty());
    }

    #[test]
    fn unknown_selected_subject_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        Store::open(dir.path())
            .set(SELECTED_SUBJECT_KEY, "gone")
            .unwrap();
        let s = session(dir.path());
        assert_eq!(s.current_subject().unwrap().id, "algoritmos-estruturas-dados");
    }

    #[test]
    fn delete_forgets_favorites_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.toggle_favorite(5).unwrap();
        s.record_view(5).unwrap();
        s.record_view(7).unwrap();

        s.delete_topic(5).unwrap();
        assert!(!s.favorites.contains(5));
        assert_eq!(s.history.entries().len(), 1);
        assert_eq!(s.history.entries()[0].id, 7);
    }

    #[test]
    fn unknown_topics_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        assert_eq!(s.record_view(999), Err(CatalogError::TopicNotFound(999)));
        assert_eq!(s.toggle_favorite(999), Err(CatalogError::TopicNotFound(999)));
        assert!(s.history.is_empty());
    }

    #[test]
    fn displayed_topics_respect_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path());
        s.toggle_favorite(17).unwrap();
        let shown: Vec<u32> = s
            .displayed_topics("algoritmos-estruturas-dados", "", true)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(shown, vec![17]);
    }
}
