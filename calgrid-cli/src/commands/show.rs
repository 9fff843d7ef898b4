use anyhow::Result;
use calgrid_core::grid::Month;
use calgrid_core::session::Session;
use calgrid_core::state::{Intent, ViewMode};
use calgrid_core::storage::KeyValueStore;

use crate::render::Render;

pub fn run<S: KeyValueStore>(
    session: &mut Session<S>,
    month: Option<Month>,
    offset: i32,
    view: Option<ViewMode>,
    preview_limit: usize,
) -> Result<()> {
    if let Some(month) = month {
        session.dispatch(Intent::JumpTo(month.first_day()))?;
    }
    if offset != 0 {
        session.dispatch(Intent::Navigate(offset))?;
    }

    let theme = session.state().view.theme;
    let mode = view.unwrap_or(session.state().view.view_mode);

    let output = match mode {
        ViewMode::Grid => session.grid_view(preview_limit).render(theme),
        ViewMode::List => session.list_view().render(theme),
    };
    println!("{output}");

    Ok(())
}
