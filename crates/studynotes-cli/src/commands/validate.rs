//! The `studynotes validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalog = studynotes_core::parser::load_catalog(&catalog_path)?;

    for subject in &catalog.subjects {
        println!("Subject: {} ({} topics)", subject.name, subject.topics.len());
    }

    let warnings = studynotes_core::parser::validate_catalog(&catalog);
    for w in &warnings {
        let prefix = match (&w.subject_id, w.topic_id) {
            (Some(subject), Some(topic)) => format!("  [{subject}/{topic}]"),
            (Some(subject), None) => format!("  [{subject}]"),
            _ => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
