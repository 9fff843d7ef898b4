use anyhow::Result;
use calgrid_core::event::EventDraft;
use calgrid_core::format::display_key;
use calgrid_core::session::Session;
use calgrid_core::state::Intent;
use calgrid_core::storage::KeyValueStore;
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(
    session: &mut Session<S>,
    title: String,
    date: String,
    time: String,
    location: String,
    description: String,
) -> Result<()> {
    let draft = EventDraft::new(title, date)
        .with_time(time)
        .with_location(location)
        .with_description(description);

    session.dispatch(Intent::Create(draft))?;

    // New events are always appended
    if let Some(event) = session.state().events.iter().last() {
        let when = match event.time {
            Some(_) => format!("{} {}", display_key(event.date), event.time_label()),
            None => format!("{} (all day)", display_key(event.date)),
        };
        println!(
            "{} {}",
            format!("  Created: {} on {}", event.title, when).green(),
            format!("#{}", event.id).dimmed()
        );
    }

    Ok(())
}
