//! The subject/topic catalog: lookup, search, navigation, and editing.
//!
//! Search is a case-insensitive substring test over title, description,
//! content, and tags. Results always keep the relative order of the source
//! sequence; there is no ranking.

use std::borrow::Borrow;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{Direction, NewTopic, Subject, Topic};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.toml");

/// The full subject/topic collection available to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
}

/// What `upsert_topic` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An existing topic with the same id was replaced in place.
    Replaced,
    /// The topic was appended to the subject.
    Inserted,
}

impl Catalog {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        crate::parser::parse_catalog_str(BUILTIN_CATALOG, Path::new("builtin-catalog.toml"))
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    /// Look up a topic by id across every subject.
    pub fn topic(&self, id: u32) -> Option<&Topic> {
        self.topics().find(|t| t.id == id)
    }

    /// The subject that owns the topic with the given id.
    pub fn subject_of(&self, topic_id: u32) -> Option<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.topics.iter().any(|t| t.id == topic_id))
    }

    /// Every topic in catalog order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.subjects.iter().flat_map(|s| s.topics.iter())
    }

    /// Fallback selection when the current one has gone stale.
    pub fn first_topic(&self) -> Option<&Topic> {
        self.topics().next()
    }

    pub fn topic_count(&self) -> usize {
        self.subjects.iter().map(|s| s.topics.len()).sum()
    }

    /// Search the topics of one subject.
    ///
    /// An unknown subject yields an empty result; a blank term yields the
    /// subject's topics unfiltered.
    pub fn search_topics_in_subject(&self, subject_id: &str, term: &str) -> Vec<&Topic> {
        match self.subject(subject_id) {
            Some(subject) => search_topics(&subject.topics, term),
            None => Vec::new(),
        }
    }

    /// Search every topic in the catalog.
    pub fn search(&self, term: &str) -> Vec<&Topic> {
        if term.trim().is_empty() {
            return self.topics().collect();
        }
        let needle = term.to_lowercase();
        self.topics().filter(|t| topic_matches(t, &needle)).collect()
    }

    /// Id the next created topic will receive, `None` once `u32::MAX` is taken.
    pub fn next_topic_id(&self) -> Option<u32> {
        self.topics().map(|t| t.id).max().unwrap_or(0).checked_add(1)
    }

    /// Replace the topic with the same id, or append it to `subject_id`.
    pub fn upsert_topic(&mut self, subject_id: &str, topic: Topic) -> Result<Upsert, CatalogError> {
        if let Some(existing) = self.topic_mut(topic.id) {
            tracing::debug!(id = topic.id, "replacing topic");
            *existing = topic;
            return Ok(Upsert::Replaced);
        }

        let subject = self
            .subject_mut(subject_id)
            .ok_or_else(|| CatalogError::SubjectNotFound(subject_id.to_string()))?;
        tracing::debug!(id = topic.id, subject = subject_id, "inserting topic");
        subject.topics.push(topic);
        Ok(Upsert::Inserted)
    }

    /// Create a topic in `subject_id` with a freshly allocated id.
    pub fn create_topic(&mut self, subject_id: &str, new: NewTopic) -> Result<&Topic, CatalogError> {
        let id = self.next_topic_id().ok_or(CatalogError::IdsExhausted)?;
        let subject = self
            .subject_mut(subject_id)
            .ok_or_else(|| CatalogError::SubjectNotFound(subject_id.to_string()))?;
        tracing::debug!(id, subject = subject_id, "creating topic");
        subject.topics.push(new.with_id(id));
        Ok(&subject.topics[subject.topics.len() - 1])
    }

    /// Edit the display fields of a topic, leaving its content alone.
    pub fn update_topic_metadata(
        &mut self,
        id: u32,
        title: String,
        description: String,
        tags: Vec<String>,
    ) -> Result<&Topic, CatalogError> {
        let topic = self.topic_mut(id).ok_or(CatalogError::TopicNotFound(id))?;
        topic.title = title;
        topic.description = description;
        topic.tags = tags;
        Ok(topic)
    }

    /// Replace the markdown body of a topic.
    pub fn update_topic_content(&mut self, id: u32, content: String) -> Result<&Topic, CatalogError> {
        let topic = self.topic_mut(id).ok_or(CatalogError::TopicNotFound(id))?;
        topic.content = content;
        Ok(topic)
    }

    /// Remove a topic.
    ///
    /// Refuses to remove the last topic of a subject; the catalog is left
    /// untouched in that case.
    pub fn delete_topic(&mut self, id: u32) -> Result<Topic, CatalogError> {
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.topics.iter().any(|t| t.id == id))
            .ok_or(CatalogError::TopicNotFound(id))?;

        if subject.topics.len() == 1 {
            return Err(CatalogError::LastTopic(id));
        }

        let index = subject
            .topics
            .iter()
            .position(|t| t.id == id)
            .ok_or(CatalogError::TopicNotFound(id))?;
        tracing::debug!(id, subject = %subject.id, "deleting topic");
        Ok(subject.topics.remove(index))
    }

    fn subject_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }

    fn topic_mut(&mut self, id: u32) -> Option<&mut Topic> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.topics.iter_mut())
            .find(|t| t.id == id)
    }
}

/// Filter a topic sequence by a search term.
///
/// A blank or whitespace-only term returns every topic. Otherwise a topic is
/// kept when the lowercased term, surrounding spaces included, occurs in its
/// lowercased title, description, content, or any tag. Accents are not folded.
pub fn search_topics<'a>(topics: &'a [Topic], term: &str) -> Vec<&'a Topic> {
    if term.trim().is_empty() {
        return topics.iter().collect();
    }
    let needle = term.to_lowercase();
    topics.iter().filter(|t| topic_matches(t, &needle)).collect()
}

fn topic_matches(topic: &Topic, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(topic.title.as_str())
        || hit(topic.description.as_str())
        || hit(topic.content.as_str())
        || topic.tags.iter().any(|tag| hit(tag.as_str()))
}

/// The neighbor of `current_id` within the displayed sequence.
///
/// Returns `None` at either end, or when `current_id` is not displayed.
pub fn adjacent_topic<T: Borrow<Topic>>(
    displayed: &[T],
    current_id: u32,
    direction: Direction,
) -> Option<&Topic> {
    let index = position_of(displayed, current_id)?;
    let neighbor = match direction {
        Direction::Previous => index.checked_sub(1)?,
        Direction::Next => index + 1,
    };
    displayed.get(neighbor).map(as_topic)
}

/// Position of `current_id` in the displayed sequence, 0-based.
pub fn position_of<T: Borrow<Topic>>(displayed: &[T], current_id: u32) -> Option<usize> {
    displayed.iter().position(|t| as_topic(t).id == current_id)
}

fn as_topic<T: Borrow<Topic>>(t: &T) -> &Topic {
    <T as Borrow<Topic>>::borrow(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: u32, title: &str, description: &str, content: &str, tags: &[&str]) -> Topic {
        Topic {
            id,
            title: title.into(),
            description: description.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            Subject {
                id: "algo".into(),
                name: "Algoritmos".into(),
                description: String::new(),
                topics: vec![
                    topic(5, "Algoritmos", "Introdução aos algoritmos", "# Passos", &["lógica"]),
                    topic(7, "Variáveis", "Definição e uso", "let x = 1;", &["dados"]),
                    topic(17, "Constantes", "Valores fixos", "const X: u32 = 1;", &["dados"]),
                ],
            },
            Subject {
                id: "web".into(),
                name: "Web".into(),
                description: String::new(),
                topics: vec![topic(20, "API REST", "Verbos HTTP", "GET /produtos", &["http"])],
            },
        ])
    }

    #[test]
    fn subject_lookup() {
        let catalog = sample();
        assert_eq!(catalog.subject("web").unwrap().name, "Web");
        assert!(catalog.subject("missing").is_none());
    }

    #[test]
    fn topic_lookup_crosses_subjects() {
        let catalog = sample();
        assert_eq!(catalog.topic(20).unwrap().title, "API REST");
        assert_eq!(catalog.subject_of(17).unwrap().id, "algo");
        assert!(catalog.topic(99).is_none());
    }

    #[test]
    fn search_unknown_subject_is_empty() {
        assert!(sample().search_topics_in_subject("nope", "").is_empty());
    }

    #[test]
    fn search_blank_term_returns_everything_in_order() {
        let catalog = sample();
        for term in ["", "   ", "\t"] {
            let ids: Vec<u32> = catalog
                .search_topics_in_subject("algo", term)
                .iter()
                .map(|t| t.id)
                .collect();
            assert_eq!(ids, vec![5, 7, 17]);
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = sample();
        let by_title = catalog.search_topics_in_subject("algo", "VARIÁVEIS");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 7);

        let by_description = catalog.search_topics_in_subject("algo", "valores");
        assert_eq!(by_description[0].id, 17);

        let by_content = catalog.search_topics_in_subject("algo", "CONST x");
        assert_eq!(by_content[0].id, 17);
    }

    #[test]
    fn search_matches_tags() {
        let catalog = sample();
        let ids: Vec<u32> = catalog
            .search_topics_in_subject("algo", "dados")
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![7, 17]);
    }

    #[test]
    fn search_preserves_diacritics() {
        let catalog = sample();
        assert!(catalog.search_topics_in_subject("algo", "variaveis").is_empty());
        assert_eq!(catalog.search_topics_in_subject("algo", "lógica").len(), 1);
    }

    #[test]
    fn search_result_is_ordered_subsequence() {
        let catalog = sample();
        let source: Vec<u32> = catalog.subject("algo").unwrap().topics.iter().map(|t| t.id).collect();
        for term in ["a", "o", "x", "1", "zzz"] {
            let hits: Vec<u32> = catalog
                .search_topics_in_subject("algo", term)
                .iter()
                .map(|t| t.id)
                .collect();
            let mut cursor = source.iter();
            assert!(hits.iter().all(|h| cursor.any(|s| s == h)), "term {term:?}");
        }
    }

    #[test]
    fn catalog_wide_search() {
        let catalog = sample();
        let ids: Vec<u32> = catalog.search("http").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![20]);
        assert_eq!(catalog.search("").len(), 4);
    }

    #[test]
    fn adjacent_topic_boundaries() {
        let catalog = sample();
        let displayed = &catalog.subject("algo").unwrap().topics;
        assert!(adjacent_topic(displayed, 5, Direction::Previous).is_none());
        assert_eq!(adjacent_topic(displayed, 5, Direction::Next).unwrap().id, 7);
        assert_eq!(adjacent_topic(displayed, 17, Direction::Previous).unwrap().id, 7);
        assert!(adjacent_topic(displayed, 17, Direction::Next).is_none());
        assert!(adjacent_topic(displayed, 99, Direction::Next).is_none());
    }

    #[test]
    fn adjacent_topic_follows_filtered_sequence() {
        let catalog = sample();
        let displayed = catalog.search_topics_in_subject("algo", "dados");
        assert_eq!(adjacent_topic(&displayed, 7, Direction::Next).unwrap().id, 17);
        assert!(adjacent_topic(&displayed, 7, Direction::Previous).is_none());
        assert_eq!(position_of(&displayed, 17), Some(1));
    }

    #[test]
    fn create_topic_allocates_max_plus_one() {
        let mut catalog = Catalog::new(vec![Subject {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            topics: vec![topic(1, "a", "", "", &[]), topic(3, "b", "", "", &[]), topic(7, "c", "", "", &[])],
        }]);
        let created = catalog
            .create_topic("s", NewTopic { title: "d".into(), ..Default::default() })
            .unwrap();
        assert_eq!(created.id, 8);
        assert_eq!(catalog.subject("s").unwrap().topics.last().unwrap().title, "d");
    }

    #[test]
    fn create_topic_in_empty_catalog_starts_at_one() {
        let mut catalog = Catalog::new(vec![Subject {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            topics: vec![],
        }]);
        assert_eq!(catalog.create_topic("s", NewTopic::default()).unwrap().id, 1);
    }

    #[test]
    fn create_topic_unknown_subject() {
        let mut catalog = sample();
        let err = catalog.create_topic("nope", NewTopic::default()).unwrap_err();
        assert_eq!(err, CatalogError::SubjectNotFound("nope".into()));
        assert_eq!(catalog.topic_count(), 4);
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut catalog = sample();
        let outcome = catalog
            .upsert_topic("algo", topic(7, "Variáveis 2", "", "", &[]))
            .unwrap();
        assert_eq!(outcome, Upsert::Replaced);
        assert_eq!(catalog.subject("algo").unwrap().topics[1].title, "Variáveis 2");

        let outcome = catalog.upsert_topic("web", topic(30, "JWT", "", "", &[])).unwrap();
        assert_eq!(outcome, Upsert::Inserted);
        assert_eq!(catalog.subject("web").unwrap().topics.len(), 2);
    }

    #[test]
    fn metadata_and_content_edits() {
        let mut catalog = sample();
        catalog
            .update_topic_metadata(5, "Algoritmos I".into(), "Intro".into(), vec!["base".into()])
            .unwrap();
        catalog.update_topic_content(5, "novo".into()).unwrap();
        let t = catalog.topic(5).unwrap();
        assert_eq!(t.title, "Algoritmos I");
        assert_eq!(t.tags, vec!["base"]);
        assert_eq!(t.content, "novo");
        assert_eq!(
            catalog.update_topic_content(99, String::new()).unwrap_err(),
            CatalogError::TopicNotFound(99)
        );
    }

    #[test]
    fn delete_topic_removes_it() {
        let mut catalog = sample();
        let removed = catalog.delete_topic(7).unwrap();
        assert_eq!(removed.id, 7);
        assert!(catalog.topic(7).is_none());
        assert_eq!(catalog.delete_topic(7).unwrap_err(), CatalogError::TopicNotFound(7));
    }

    #[test]
    fn delete_last_topic_is_refused() {
        let mut catalog = Catalog::new(vec![Subject {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            topics: vec![topic(1, "only", "", "", &[])],
        }]);
        let before = catalog.clone();
        assert_eq!(catalog.delete_topic(1).unwrap_err(), CatalogError::LastTopic(1));
        assert_eq!(catalog, before);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        let topics = [topic(1, "ab", "", "", &[]), topic(2, "a b", "", "", &[])];
        let ids = |term| search_topics(&topics, term).iter().map(|t| t.id).collect::<Vec<_>>();
        assert!(ids("b ").is_empty());
        assert_eq!(ids(" b"), vec![2]);
        assert_eq!(ids("AB"), vec![1]);
    }

    #[test]
    fn catalog_search_keeps_spaces_too() {
        let catalog = sample();
        assert!(catalog.search("rest ").is_empty());
        assert_eq!(catalog.search("api rest").len(), 1);
        assert_eq!(catalog.search("  ").len(), catalog.topic_count());
    }

    #[test]
    fn create_topic_refuses_when_ids_are_exhausted() {
        let mut catalog = Catalog::new(vec![Subject {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            topics: vec![topic(u32::MAX, "last", "", "", &[])],
        }]);
        assert_eq!(catalog.next_topic_id(), None);
        let before = catalog.clone();
        let err = catalog
            .create_topic("s", NewTopic { title: "x".into(), ..Default::default() })
            .unwrap_err();
        assert_eq!(err, CatalogError::IdsExhausted);
        assert_eq!(catalog, before);
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.subjects.is_empty());
        assert!(catalog.first_topic().is_some());
    }
}
