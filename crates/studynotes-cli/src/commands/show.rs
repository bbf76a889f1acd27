//! The `studynotes show` command.

use anyhow::{Context as _, Result};

use studynotes_core::catalog::adjacent_topic;
use studynotes_core::error::CatalogError;
use studynotes_core::model::Direction;

use super::Context;

pub fn execute(
    ctx: &Context,
    id: u32,
    subject: Option<String>,
    search: Option<String>,
    favorites_only: bool,
) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.record_view(id)?;

    {
        let topic = session
            .catalog
            .topic(id)
            .ok_or(CatalogError::TopicNotFound(id))?;
        let subject_id = match &subject {
            Some(s) => s.clone(),
            None => session
                .catalog
                .subject_of(id)
                .map(|s| s.id.clone())
                .context("topic has no subject")?,
        };
        let displayed = session.displayed_topics(
            &subject_id,
            search.as_deref().unwrap_or(""),
            favorites_only,
        );

        println!("# {} ({})", topic.title, topic.id);
        if !topic.description.is_empty() {
            println!("{}", topic.description);
        }
        if !topic.tags.is_empty() {
            println!("Tags: {}", topic.tags.join(", "));
        }
        if session.favorites.contains(id) {
            println!("Favorite");
        }
        println!();
        println!("{}", topic.content.trim_end());
        println!();

        for direction in [Direction::Previous, Direction::Next] {
            if let Some(t) = adjacent_topic(&displayed, id, direction) {
                println!("{direction}: {} ({})", t.title, t.id);
            }
        }
    }

    session.save()?;
    Ok(())
}
