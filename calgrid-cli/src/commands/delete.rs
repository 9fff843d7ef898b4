use anyhow::Result;
use calgrid_core::event::EventId;
use calgrid_core::session::Session;
use calgrid_core::state::Intent;
use calgrid_core::storage::KeyValueStore;
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(session: &mut Session<S>, id: EventId) -> Result<()> {
    let title = session.state().events.get(id).map(|e| e.title.clone());

    session.dispatch(Intent::Delete(id))?;

    match title {
        Some(title) => println!("{}", format!("  Deleted: {title}").red()),
        None => println!("{}", format!("  No event with id {id}").dimmed()),
    }

    Ok(())
}
