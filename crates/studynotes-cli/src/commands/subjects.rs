//! The `studynotes subjects` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Context;

pub fn execute(ctx: &Context, select: Option<String>) -> Result<()> {
    let mut session = ctx.open_session()?;

    if let Some(id) = select {
        let name = session.select_subject(&id)?.name.clone();
        session.save()?;
        println!("Selected subject: {name}");
        return Ok(());
    }

    let current = session.current_subject().map(|s| s.id.clone());

    let mut table = Table::new();
    table.set_header(vec!["", "Id", "Name", "Topics", "Description"]);
    for subject in &session.catalog.subjects {
        let marker = if current.as_deref() == Some(subject.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(&subject.id),
            Cell::new(&subject.name),
            Cell::new(subject.topics.len()),
            Cell::new(&subject.description),
        ]);
    }

    println!("{table}");
    Ok(())
}
