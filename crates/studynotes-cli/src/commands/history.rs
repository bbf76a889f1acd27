//! The `studynotes history` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let recent = session.history.recent_topics(&session.catalog);

    if recent.is_empty() {
        println!("No topics viewed yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Viewed"]);
    for (topic, at) in recent {
        table.add_row(vec![
            Cell::new(topic.id),
            Cell::new(&topic.title),
            Cell::new(at.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);
    }

    println!("{table}");
    Ok(())
}
