//! Terminal rendering for calgrid view models.
//!
//! Text is padded and truncated first and colored last, so ANSI escapes never
//! throw the columns off.

use calgrid_core::format::storage_key;
use calgrid_core::state::Theme;
use calgrid_core::view::{DayCell, DayView, GridCell, GridView, ListView};
use owo_colors::OwoColorize;

/// Width of one grid column, including the gap to the next.
const CELL_WIDTH: usize = 14;

/// Extension trait for themed terminal output.
pub trait Render {
    fn render(&self, theme: Theme) -> String;
}

/// Event text color for the active theme
fn accent(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Light => text.blue().to_string(),
        Theme::Dark => text.bright_cyan().to_string(),
    }
}

/// Pad or cut `text` to exactly `width` columns, keeping the last one free.
fn fit(text: &str, width: usize) -> String {
    let max = width.saturating_sub(1);
    let fitted: String = if text.chars().count() > max {
        text.chars()
            .take(max.saturating_sub(1))
            .chain(std::iter::once('…'))
            .collect()
    } else {
        text.to_string()
    };
    format!("{fitted:<width$}")
}

fn day_number(cell: &DayCell) -> String {
    let text = fit(&cell.day.to_string(), CELL_WIDTH);
    if cell.is_selected {
        text.reversed().to_string()
    } else if cell.is_today {
        text.bold().underline().to_string()
    } else {
        text
    }
}

impl Render for GridView {
    fn render(&self, theme: Theme) -> String {
        let mut lines = vec![self.title.bold().to_string()];

        let header: String = self.weekdays.iter().map(|d| fit(d, CELL_WIDTH)).collect();
        lines.push(header.dimmed().to_string());

        for week in self.weeks() {
            let days = week.iter().filter_map(|cell| match cell {
                GridCell::Day(day) => Some(day),
                GridCell::Blank => None,
            });
            let label_rows = days.clone().map(|d| d.labels.len()).max().unwrap_or(0);
            let has_overflow = days.clone().any(|d| d.overflow > 0);

            lines.push(
                week.iter()
                    .map(|cell| match cell {
                        GridCell::Day(day) => day_number(day),
                        GridCell::Blank => " ".repeat(CELL_WIDTH),
                    })
                    .collect(),
            );

            for row in 0..label_rows {
                lines.push(
                    week.iter()
                        .map(|cell| match cell {
                            GridCell::Day(day) => match day.labels.get(row) {
                                Some(label) => accent(&fit(label, CELL_WIDTH), theme),
                                None => " ".repeat(CELL_WIDTH),
                            },
                            GridCell::Blank => " ".repeat(CELL_WIDTH),
                        })
                        .collect(),
                );
            }

            if has_overflow {
                lines.push(
                    week.iter()
                        .map(|cell| match cell {
                            GridCell::Day(day) => match day.more_label() {
                                Some(more) => fit(&more, CELL_WIDTH).dimmed().to_string(),
                                None => " ".repeat(CELL_WIDTH),
                            },
                            GridCell::Blank => " ".repeat(CELL_WIDTH),
                        })
                        .collect(),
                );
            }

            lines.push(String::new());
        }

        lines.join("\n").trim_end().to_string()
    }
}

impl Render for ListView {
    fn render(&self, theme: Theme) -> String {
        let mut lines = vec![self.title.bold().to_string()];

        for row in &self.rows {
            let prefix = format!("{:>2} {}  ", row.day, row.weekday);
            let indent = " ".repeat(prefix.chars().count());
            let prefix = if row.is_selected {
                prefix.reversed().to_string()
            } else {
                prefix
            };

            if row.entries.is_empty() {
                lines.push(format!("{}{}", prefix, "No events".dimmed()));
                continue;
            }

            for (i, entry) in row.entries.iter().enumerate() {
                let lead = if i == 0 { prefix.as_str() } else { indent.as_str() };
                let marker = if entry.timed { "◷" } else { "•" };
                let id = format!("#{}", entry.id);
                lines.push(format!(
                    "{}{} {} {}",
                    lead,
                    marker,
                    accent(&entry.label, theme),
                    id.dimmed()
                ));

                if let Some(location) = &entry.location {
                    lines.push(format!("{}  {}", indent, format!("@ {location}").dimmed()));
                }
            }
        }

        lines.join("\n")
    }
}

impl Render for DayView {
    fn render(&self, theme: Theme) -> String {
        let mut lines = vec![self.heading.bold().to_string()];

        if self.is_empty() {
            lines.push(format!("  {}", "No events for this date".dimmed()));
        }

        for event in &self.events {
            let id = format!("#{}", event.id);
            lines.push(String::new());
            lines.push(format!("  {} {}", accent(&event.title, theme).bold(), id.dimmed()));

            if let Some(time) = &event.time {
                lines.push(format!("    ◷ {time}"));
            }
            if let Some(location) = &event.location {
                lines.push(format!("    @ {location}"));
            }
            if let Some(description) = &event.description {
                lines.push(format!("    {}", description.dimmed()));
            }
        }

        let hint = format!(
            "{}: calgrid add <title> --date {}",
            self.create_label,
            storage_key(self.date)
        );
        lines.push(String::new());
        lines.push(hint.dimmed().to_string());

        lines.join("\n")
    }
}
