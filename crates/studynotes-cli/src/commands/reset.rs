//! The `studynotes reset` command.

use anyhow::Result;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    session.reset()?;
    println!("Cleared saved state in {}", session.store().dir().display());
    Ok(())
}
