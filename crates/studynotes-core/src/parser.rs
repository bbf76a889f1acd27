//! TOML catalog and quiz parser.
//!
//! Loads catalogs and quizzes from TOML files and directories, and validates
//! catalogs for authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{QuizQuestion, Subject, Topic};
use crate::quiz::Quiz;

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    topics: Vec<TomlTopic>,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let subjects = parsed
        .subjects
        .into_iter()
        .map(|s| Subject {
            id: s.id,
            name: s.name,
            description: s.description,
            topics: s
                .topics
                .into_iter()
                .map(|t| Topic {
                    id: t.id,
                    title: t.title,
                    description: t.description,
                    content: t.content,
                    tags: t.tags,
                })
                .collect(),
        })
        .collect();

    Ok(Catalog::new(subjects))
}

/// Parse a single TOML file into a validated `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a validated `Quiz`.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| QuizQuestion {
            id: q.id,
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
        })
        .collect();

    Quiz::new(parsed.quiz.id, parsed.quiz.title, questions)
        .with_context(|| format!("invalid quiz: {}", source_path.display()))
}

/// Recursively load every `.toml` catalog under `dir` and merge them.
///
/// Files that fail to parse are skipped with a warning. Files are visited in
/// name order so the merged subject order is stable.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    let mut subjects = Vec::new();
    for path in paths {
        if path.is_dir() {
            subjects.extend(load_catalog_directory(&path)?.subjects);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => subjects.extend(catalog.subjects),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(Catalog::new(subjects))
}

/// Load a catalog from a file or a directory of files.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The subject id (if applicable).
    pub subject_id: Option<String>,
    /// The topic id (if applicable).
    pub topic_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate subject ids
    let mut seen_subjects = HashSet::new();
    for subject in &catalog.subjects {
        if !seen_subjects.insert(subject.id.as_str()) {
            warnings.push(ValidationWarning {
                subject_id: Some(subject.id.clone()),
                topic_id: None,
                message: format!("duplicate subject ID: {}", subject.id),
            });
        }
    }

    // Topic ids must be unique across the whole catalog
    let mut seen_topics = HashSet::new();
    for subject in &catalog.subjects {
        for topic in &subject.topics {
            if !seen_topics.insert(topic.id) {
                warnings.push(ValidationWarning {
                    subject_id: Some(subject.id.clone()),
                    topic_id: Some(topic.id),
                    message: format!("duplicate topic ID: {}", topic.id),
                });
            }
        }
    }

    for subject in &catalog.subjects {
        if subject.topics.is_empty() {
            warnings.push(ValidationWarning {
                subject_id: Some(subject.id.clone()),
                topic_id: None,
                message: "subject has no topics".into(),
            });
        }

        for topic in &subject.topics {
            if topic.title.trim().is_empty() {
                warnings.push(ValidationWarning {
                    subject_id: Some(subject.id.clone()),
                    topic_id: Some(topic.id),
                    message: "title is empty".into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_CATALOG: &str = r#"
[[subjects]]
id = "algoritmos"
name = "Algoritmos"
description = "Fundamentos"

[[subjects.topics]]
id = 5
title = "Algoritmos"
description = "Introdução aos algoritmos"
content = """
# Algoritmos

Uma sequência finita de passos.
"""
tags = ["algoritmos", "lógica"]

[[subjects.topics]]
id = 7
title = "Variáveis"
"#;

    const VALID_QUIZ: &str = r#"
[quiz]
id = "pie"
title = "Projeto Integrador"

[[questions]]
id = 1
question = "Qual verbo HTTP busca dados?"
options = ["POST", "PUT", "GET", "DELETE"]
correct_answer = 2
explanation = "GET é usado para leitura."
"#;

    #[test]
    fn parse_valid_catalog() {
        let catalog = parse_catalog_str(VALID_CATALOG, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.subjects.len(), 1);
        let subject = &catalog.subjects[0];
        assert_eq!(subject.id, "algoritmos");
        assert_eq!(subject.topics.len(), 2);
        assert!(subject.topics[0].content.contains("sequência finita"));
        assert_eq!(subject.topics[0].tags, vec!["algoritmos", "lógica"]);
        assert!(subject.topics[1].tags.is_empty());
    }

    #[test]
    fn parse_valid_quiz() {
        let quiz = parse_quiz_str(VALID_QUIZ, &PathBuf::from("quiz.toml")).unwrap();
        assert_eq!(quiz.id, "pie");
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions()[0].correct_answer, 2);
    }

    #[test]
    fn parse_quiz_rejects_bad_correct_answer() {
        let bad = VALID_QUIZ.replace("correct_answer = 2", "correct_answer = 9");
        let err = parse_quiz_str(&bad, &PathBuf::from("quiz.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("out of range"));
    }

    #[test]
    fn parse_quiz_without_questions_is_rejected() {
        let toml = "[quiz]\nid = \"empty\"\ntitle = \"Empty\"\n";
        assert!(parse_quiz_str(toml, &PathBuf::from("quiz.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_catalog_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_duplicate_topic_ids_across_subjects() {
        let toml = r#"
[[subjects]]
id = "a"
name = "A"
[[subjects.topics]]
id = 1
title = "One"

[[subjects]]
id = "b"
name = "B"
[[subjects.topics]]
id = 1
title = "Also one"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate topic")));
    }

    #[test]
    fn validate_empty_subject_and_title() {
        let toml = r#"
[[subjects]]
id = "a"
name = "A"

[[subjects]]
id = "b"
name = "B"
[[subjects.topics]]
id = 1
title = "  "
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message == "subject has no topics"));
        assert!(warnings.iter().any(|w| w.message == "title is empty" && w.topic_id == Some(1)));
    }

    #[test]
    fn valid_catalog_has_no_warnings() {
        let catalog = parse_catalog_str(VALID_CATALOG, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn load_directory_merges_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_CATALOG).unwrap();
        std::fs::write(dir.path().join("b.toml"), "not [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalog.subjects.len(), 1);
        assert_eq!(catalog.subjects[0].id, "algoritmos");
    }

    #[test]
    fn load_directory_rejects_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.toml");
        std::fs::write(&file, VALID_CATALOG).unwrap();
        assert!(load_catalog_directory(&file).is_err());
        assert_eq!(load_catalog(&file).unwrap().subjects.len(), 1);
    }
}
