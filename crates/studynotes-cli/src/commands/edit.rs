//! The `studynotes new`, `edit`, and `delete` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use studynotes_core::error::CatalogError;
use studynotes_core::model::NewTopic;

use super::{parse_tags, Context};

fn read_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))
}

pub fn create(
    ctx: &Context,
    subject: String,
    title: String,
    description: String,
    tags: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<()> {
    let content = content_file.as_deref().map(read_content).transpose()?;
    let mut session = ctx.open_session()?;

    let topic = session.create_topic(
        &subject,
        NewTopic {
            title,
            description,
            content: content.unwrap_or_default(),
            tags: tags.as_deref().map(parse_tags).unwrap_or_default(),
        },
    )?;
    println!("Created topic {}: {}", topic.id, topic.title);

    session.save()?;
    Ok(())
}

pub fn update(
    ctx: &Context,
    id: u32,
    title: Option<String>,
    description: Option<String>,
    tags: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<()> {
    let content = content_file.as_deref().map(read_content).transpose()?;
    let mut session = ctx.open_session()?;

    let current = session
        .catalog
        .topic(id)
        .ok_or(CatalogError::TopicNotFound(id))?
        .clone();

    if title.is_some() || description.is_some() || tags.is_some() {
        session.catalog.update_topic_metadata(
            id,
            title.unwrap_or(current.title),
            description.unwrap_or(current.description),
            tags.as_deref().map(parse_tags).unwrap_or(current.tags),
        )?;
    }
    if let Some(content) = content {
        session.catalog.update_topic_content(id, content)?;
    }

    println!("Updated topic {id}");
    session.save()?;
    Ok(())
}

pub fn delete(ctx: &Context, id: u32) -> Result<()> {
    let mut session = ctx.open_session()?;
    let removed = session.delete_topic(id)?;
    println!("Deleted topic {}: {}", removed.id, removed.title);
    session.save()?;
    Ok(())
}
