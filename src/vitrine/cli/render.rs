//! # Rendering
//!
//! Everything here returns a `String`; callers decide where it goes (stdout for
//! one-shot commands, the session writer for the kiosk). Layout math is
//! Unicode-width aware so names in any script line up.

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitrine::api::{CmdMessage, ItemDetail, ListedItem, MessageLevel};
use vitrine::config::{VitrineConfig, CONFIG_KEYS};
use vitrine::era::{self, EraSet};
use vitrine::model::CatalogItem;
use vitrine::options::FilterOptions;
use vitrine::position::Position;
use vitrine::projector::FilteredResult;

pub const LINE_WIDTH: usize = 100;
const SCULPTOR_WIDTH: usize = 18;
const CURSOR_MARKER: &str = "▸";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// One list row: marker, 1-based position, label, sculptor, era tags.
fn item_line(selected: bool, position: usize, item: &CatalogItem, eras: &EraSet) -> String {
    let marker = if selected { CURSOR_MARKER } else { " " };
    let index = format!("{:>3}. ", position);
    let sculptor = truncate_to_width(item.sculptor.as_deref().unwrap_or("—"), SCULPTOR_WIDTH);
    let sculptor = pad_to_width(&sculptor, SCULPTOR_WIDTH);
    let tags = eras
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>()
        .join(", ");

    let fixed = 2 + index.width() + SCULPTOR_WIDTH + 2 + tags.width();
    let available = LINE_WIDTH.saturating_sub(fixed).max(8);
    let label = pad_to_width(&truncate_to_width(item.label(), available), available);

    let index = if selected {
        index.yellow()
    } else {
        index.normal()
    };
    format!(
        "{} {}{}  {}{}\n",
        marker,
        index,
        if selected { label.bold() } else { label.normal() },
        sculptor,
        tags.dimmed()
    )
}

pub fn render_item_list(items: &[ListedItem]) -> String {
    if items.is_empty() {
        return "No items found.\n".to_string();
    }
    items
        .iter()
        .map(|listed| item_line(false, listed.position, &listed.item, &listed.eras))
        .collect()
}

/// The catalog page with its cursor.
pub fn render_catalog(result: &FilteredResult, cursor: Option<usize>) -> String {
    if result.is_empty() {
        return "No items found.\n".to_string();
    }
    result
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let eras = era::classify(item.creation_time.as_deref());
            item_line(cursor == Some(i), i + 1, item, &eras)
        })
        .collect()
}

pub fn render_item(item: &CatalogItem, eras: &EraSet) -> String {
    let mut out = format!("{} {}\n", item.id.to_string().yellow(), item.label().bold());
    out.push_str(&format!("{}\n", "-".repeat(32)));

    let fields = [
        ("Title", item.title.as_deref()),
        ("Sculptor", item.sculptor.as_deref()),
        ("Created", item.creation_time.as_deref()),
        ("Material", item.material.as_deref()),
        ("Location", item.location.as_deref()),
    ];
    for (name, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push_str(&format!("{:<10}{}\n", format!("{}:", name).dimmed(), value));
        }
    }
    if !eras.is_empty() {
        let tags: Vec<_> = eras.iter().map(|e| e.label()).collect();
        out.push_str(&format!("{:<10}{}\n", "Eras:".dimmed(), tags.join(", ")));
    }
    out
}

pub fn render_detail(detail: &ItemDetail) -> String {
    let mut out = render_item(&detail.item, &detail.eras);
    if let Some(description) = detail.item.description.as_deref() {
        out.push_str(&format!("\n{}\n", description));
    }
    out.push('\n');
    out.push_str(&render_position(detail.position, detail.shown));
    out.push_str(&format!(
        "previous: {}  next: {}\n",
        detail
            .previous
            .map(|id| id.to_string())
            .unwrap_or_else(|| "—".into()),
        detail
            .next
            .map(|id| id.to_string())
            .unwrap_or_else(|| "—".into()),
    ));
    out
}

pub fn render_position(position: Position, shown: usize) -> String {
    match position {
        Position::Found(index) => format!("{} of {} in current selection\n", index + 1, shown),
        Position::NotFound => format!("{}\n", "not in current selection".dimmed()),
    }
}

pub fn render_options(options: &FilterOptions) -> String {
    let eras: Vec<_> = options.eras.iter().map(|e| e.label()).collect();
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Sculptors:".bold()));
    for sculptor in &options.sculptors {
        out.push_str(&format!("  {}\n", sculptor));
    }
    out.push_str(&format!("{}\n  {}\n", "Eras:".bold(), eras.join("\n  ")));
    out.push_str(&format!(
        "{}\n  {}\n",
        "Materials:".bold(),
        options.materials.join("\n  ")
    ));
    out
}

pub fn render_config(config: &VitrineConfig) -> String {
    CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).ok().map(|v| format!("{} = {}\n", key, v)))
        .collect()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}
