use anyhow::Result;
use calgrid_core::session::Session;
use calgrid_core::storage::KeyValueStore;
use chrono::NaiveDate;

use crate::render::Render;

pub fn run<S: KeyValueStore>(session: &Session<S>, date: NaiveDate) -> Result<()> {
    let theme = session.state().view.theme;
    println!("{}", session.day_view(date).render(theme));
    Ok(())
}
