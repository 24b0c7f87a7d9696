use super::{loading, prompts, render};
use crate::output::Output;
use cinema_client::{CatalogApi, CatalogClient};
use cinema_core::ListView;
use color_eyre::Result;

/// One entry of the interactive menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    NextPage,
    PrevPage,
    Search,
    MinYear,
    MaxYear,
    ToggleGenre,
    ToggleFavorite,
    ToggleWatchLater,
    Reload,
    Quit,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::NextPage => "Next page ▶",
            MenuAction::PrevPage => "◀ Previous page",
            MenuAction::Search => "Search by title",
            MenuAction::MinYear => "Set minimum year",
            MenuAction::MaxYear => "Set maximum year",
            MenuAction::ToggleGenre => "Toggle a genre",
            MenuAction::ToggleFavorite => "Toggle favorite on a title",
            MenuAction::ToggleWatchLater => "Toggle watch later on a title",
            MenuAction::Reload => "Reload",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Actions that make sense for the view as it is right now.
///
/// Prev is only offered past the first page, filters only on the catalog,
/// and toggles only when there is a row to toggle.
pub fn menu_actions<A: CatalogApi>(view: &ListView<A>) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::NextPage];
    if view.controls().prev_enabled {
        actions.push(MenuAction::PrevPage);
    }
    if view.collection().supports_filters() {
        actions.extend([
            MenuAction::Search,
            MenuAction::MinYear,
            MenuAction::MaxYear,
            MenuAction::ToggleGenre,
        ]);
    }
    if !view.titles().is_empty() {
        actions.push(MenuAction::ToggleFavorite);
        actions.push(MenuAction::ToggleWatchLater);
    }
    actions.push(MenuAction::Reload);
    actions.push(MenuAction::Quit);
    actions
}

/// Pick a row of the current page; returns its id and both flags.
fn pick_title<A: CatalogApi>(view: &ListView<A>, prompt: &str) -> Result<Option<(String, bool, bool)>> {
    let mut labels: Vec<String> = view
        .titles()
        .iter()
        .map(|t| {
            format!(
                "{} {} {}",
                if t.favorited { "★" } else { "☆" },
                if t.watch_later { "⏰" } else { "  " },
                t.title
            )
        })
        .collect();
    labels.push("Cancel".to_string());

    let choice = prompts::prompt_select(prompt, &labels, 0)?;
    Ok(view
        .titles()
        .get(choice)
        .map(|t| (t.id.clone(), t.favorited, t.watch_later)))
}

pub async fn run_interactive(
    view: &mut ListView<CatalogClient>,
    client: &CatalogClient,
    genre_options: &[String],
    output: &Output,
) -> Result<()> {
    if !output.is_human() {
        return Err(color_eyre::eyre::eyre!("Interactive mode requires --output human"));
    }

    loop {
        output.println("");
        let actions = menu_actions(view);
        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
        let choice = prompts::prompt_select("What next?", &labels, 0)?;
        let loading_message = "Loading...";

        match actions[choice] {
            MenuAction::NextPage => loading::while_loading(output, loading_message, view.next_page()).await,
            MenuAction::PrevPage => loading::while_loading(output, loading_message, view.prev_page()).await,
            MenuAction::Search => {
                let current = view.filters().search.clone();
                let search = prompts::prompt_string("Search by title (blank clears)", None)?;
                if search.trim() == current.trim() {
                    continue;
                }
                loading::while_loading(output, loading_message, view.set_search(search)).await;
            }
            MenuAction::MinYear => {
                let year = prompts::prompt_optional_year("Minimum year", view.filters().min_year)?;
                loading::while_loading(output, loading_message, view.set_min_year(year)).await;
            }
            MenuAction::MaxYear => {
                let year = prompts::prompt_optional_year("Maximum year", view.filters().max_year)?;
                loading::while_loading(output, loading_message, view.set_max_year(year)).await;
            }
            MenuAction::ToggleGenre => {
                let labels: Vec<String> = genre_options
                    .iter()
                    .map(|g| format!("[{}] {}", if view.filters().has_genre(g) { "x" } else { " " }, g))
                    .collect();
                let choice = prompts::prompt_select("Genre", &labels, 0)?;
                let genre = genre_options[choice].clone();
                loading::while_loading(output, loading_message, view.toggle_genre(&genre)).await;
            }
            MenuAction::ToggleFavorite => {
                if let Some((id, favorited, _)) = pick_title(view, "Toggle favorite on")? {
                    loading::while_loading(output, "Updating favorites...", view.toggle_favorite(&id, favorited)).await;
                } else {
                    continue;
                }
            }
            MenuAction::ToggleWatchLater => {
                if let Some((id, _, watch_later)) = pick_title(view, "Toggle watch later on")? {
                    loading::while_loading(output, "Updating watch later...", view.toggle_watch_later(&id, watch_later)).await;
                } else {
                    continue;
                }
            }
            MenuAction::Reload => loading::while_loading(output, loading_message, view.load()).await,
            MenuAction::Quit => return Ok(()),
        }

        output.println("");
        render::print_list(view, client, output);
    }
}
