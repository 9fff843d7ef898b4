use anyhow::Result;
use calgrid_core::session::Session;
use calgrid_core::state::{Intent, Theme};
use calgrid_core::storage::KeyValueStore;

pub fn run<S: KeyValueStore>(session: &mut Session<S>) -> Result<()> {
    session.dispatch(Intent::ToggleTheme)?;

    let name = match session.state().view.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    println!("  Theme: {name}");

    Ok(())
}
