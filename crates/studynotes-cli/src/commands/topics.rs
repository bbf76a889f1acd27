//! The `studynotes topics` command.

use anyhow::{Context as _, Result};
use comfy_table::{Cell, Table};

use super::Context;

pub fn execute(
    ctx: &Context,
    subject: Option<String>,
    search: Option<String>,
    favorites_only: bool,
) -> Result<()> {
    let session = ctx.open_session()?;

    let subject = match subject {
        Some(id) => session
            .catalog
            .subject(&id)
            .with_context(|| format!("subject not found: {id}"))?,
        None => session
            .current_subject()
            .context("the catalog has no subjects")?,
    };

    let term = search.unwrap_or_default();
    let topics = session.displayed_topics(&subject.id, &term, favorites_only);

    println!("{} ({} of {} topics)", subject.name, topics.len(), subject.topics.len());
    if topics.is_empty() {
        println!("No topics found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["", "Id", "Title", "Description", "Tags"]);
    for topic in topics {
        let marker = if session.favorites.contains(topic.id) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(topic.id),
            Cell::new(&topic.title),
            Cell::new(&topic.description),
            Cell::new(topic.tags.join(", ")),
        ]);
    }

    println!("{table}");
    Ok(())
}
