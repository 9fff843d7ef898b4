use anyhow::Result;
use calgrid_core::session::Session;
use calgrid_core::state::{Intent, ViewMode};
use calgrid_core::storage::KeyValueStore;

pub fn run<S: KeyValueStore>(session: &mut Session<S>, mode: ViewMode) -> Result<()> {
    session.dispatch(Intent::SetViewMode(mode))?;
    println!("  Default view: {mode}");
    Ok(())
}
