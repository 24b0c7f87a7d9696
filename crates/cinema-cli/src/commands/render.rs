use crate::output::{Document, Output};
use cinema_client::{CatalogApi, CatalogClient};
use cinema_core::{ActivityFeed, ListView, PageControls};
use cinema_models::{FilterState, Session, Title};
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;

const DESCRIPTION_WIDTH: usize = 48;

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// One-line description of the active filters, or `None` when unfiltered.
pub fn filter_summary(filters: &FilterState) -> Option<String> {
    if filters.is_unfiltered() {
        return None;
    }

    let mut parts = Vec::new();
    let search = filters.search.trim();
    if !search.is_empty() {
        parts.push(format!("search \"{}\"", search));
    }
    match (filters.min_year, filters.max_year) {
        (Some(min), Some(max)) => parts.push(format!("years {}–{}", min, max)),
        (Some(min), None) => parts.push(format!("from {}", min)),
        (None, Some(max)) => parts.push(format!("until {}", max)),
        (None, None) => {}
    }
    if !filters.genres.is_empty() {
        let genres: Vec<&str> = filters.genres.iter().map(String::as_str).collect();
        parts.push(format!("genres {}", genres.join(", ")));
    }
    Some(parts.join(" · "))
}

/// Pagination bar; a disabled Prev is shown in brackets.
pub fn controls_line(controls: &PageControls) -> String {
    let prev = if controls.prev_enabled { "◀ Prev" } else { "(◀ Prev)" };
    format!("{}   Page {}   Next ▶", prev, controls.page)
}

pub fn print_welcome(session: &Session, output: &Output) {
    if output.is_human() {
        output.println(format!("Welcome, {}", session.display_name().bold()));
        output.println("");
    }
}

fn titles_table(titles: &[Title], client: &CatalogClient) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
        Cell::new("★").add_attribute(Attribute::Bold),
        Cell::new("Later").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Image").add_attribute(Attribute::Bold),
    ]);

    for title in titles {
        let favorite = if title.favorited {
            Cell::new("★").fg(Color::Yellow)
        } else {
            Cell::new("☆").fg(Color::Yellow)
        };
        let later = if title.watch_later {
            Cell::new("⏰").fg(Color::Blue)
        } else {
            Cell::new("·").fg(Color::Grey)
        };

        table.add_row(vec![
            Cell::new(&title.id),
            Cell::new(&title.title).add_attribute(Attribute::Bold),
            Cell::new(title.year.map(|y| y.to_string()).unwrap_or_else(|| "—".to_string())),
            Cell::new(title.genre_label()).fg(Color::Cyan),
            favorite,
            later,
            Cell::new(truncate(&title.description, DESCRIPTION_WIDTH)),
            Cell::new(client.image_url(&title.image)),
        ]);
    }

    table
}

pub fn print_list<A: CatalogApi>(view: &ListView<A>, client: &CatalogClient, output: &Output) {
    if !output.is_human() {
        let titles = view
            .titles()
            .iter()
            .map(|t| Title {
                image: client.image_url(&t.image),
                ..t.clone()
            })
            .collect();
        output.document(&Document::List {
            collection: view.collection(),
            state: view.state(),
            filters: view.filters(),
            controls: view.controls(),
            message: view.status_message(),
            titles,
        });
        return;
    }

    output.println(format!("🎬 {}", view.collection().label().bold()));
    if let Some(summary) = filter_summary(view.filters()) {
        output.println(format!("Filters: {}", summary.dimmed()));
    }

    match view.status_message() {
        Some(message) => output.println(message.dimmed().to_string()),
        None => output.println(titles_table(view.titles(), client).to_string()),
    }

    output.println(controls_line(&view.controls()));
}

pub fn print_feed<A: CatalogApi>(feed: &ActivityFeed<A>, output: &Output) {
    let entries = feed.entries();

    if !output.is_human() {
        output.document(&Document::Activity {
            state: feed.state(),
            message: feed.message(),
            entries,
        });
        return;
    }

    output.println("");
    output.println(format!("{}", "Recent Activity".cyan().bold()));

    if let Some(message) = feed.message() {
        output.println(message.dimmed().to_string());
        return;
    }

    for entry in entries {
        output.println(format!(
            "  {:<12} {}  {}",
            entry.label.cyan(),
            entry.title,
            entry.when.dimmed()
        ));
    }
}
