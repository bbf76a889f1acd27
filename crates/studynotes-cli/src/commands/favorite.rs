//! The `studynotes favorite` command.

use anyhow::Result;

use super::Context;

pub fn execute(ctx: &Context, id: u32) -> Result<()> {
    let mut session = ctx.open_session()?;
    if session.toggle_favorite(id)? {
        println!("Added topic {id} to favorites");
    } else {
        println!("Removed topic {id} from favorites");
    }
    session.save()?;
    Ok(())
}
