use super::browse::initial_filters;
use super::context::{require_session, AppContext};
use super::{loading, render};
use crate::output::Output;
use crate::FilterArgs;
use cinema_core::{ListView, LoadState};
use cinema_models::{Collection, Flag};
use color_eyre::Result;

pub async fn run_toggle(
    flag: Flag,
    id: &str,
    collection: Collection,
    page: u32,
    filters: FilterArgs,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = ctx.client()?;

    if require_session(&ctx, &client, output).await.is_none() {
        return Ok(());
    }

    let mut view = ListView::new(client.clone(), collection)
        .with_options(&ctx.config.browse)
        .with_filters(initial_filters(&filters, page));

    loading::while_loading(output, "Loading movies...", view.load()).await;
    if view.state() == LoadState::Failed {
        return Err(color_eyre::eyre::eyre!("Could not load {} page {}", collection.label(), page));
    }

    // The current flag comes from the server's copy, never from the caller
    let current = match view.find(id) {
        Some(title) => match flag {
            Flag::Favorite => title.favorited,
            Flag::WatchLater => title.watch_later,
        },
        None => {
            return Err(color_eyre::eyre::eyre!(
                "Title '{}' is not on {} page {}; pass --page (and the same filters) to find it",
                id,
                collection.label(),
                page
            ));
        }
    };
    let name = view.find(id).map(|t| t.title.clone()).unwrap_or_default();

    loading::while_loading(output, "Updating...", async {
        match flag {
            Flag::Favorite => view.toggle_favorite(id, current).await,
            Flag::WatchLater => view.toggle_watch_later(id, current).await,
        }
    })
    .await;

    // Without a reloaded page there is nothing to confirm the change against
    if view.state() == LoadState::Failed {
        render::print_list(&view, &client, output);
        return Err(color_eyre::eyre::eyre!(
            "Could not reload {} page {} after updating '{}'; the change may not have been applied",
            collection.label(),
            page,
            name
        ));
    }

    // Report what the refetch says, not what was requested
    let now = view.find(id).map(|t| match flag {
        Flag::Favorite => t.favorited,
        Flag::WatchLater => t.watch_later,
    });
    match now {
        Some(now) if now != current => {
            let verb = if now { "Added" } else { "Removed" };
            let preposition = if now { "to" } else { "from" };
            output.success(format!("{} '{}' {} {}", verb, name, preposition, flag_list_name(flag)));
        }
        Some(_) => output.warn(format!("'{}' is unchanged; the server did not accept the update", name)),
        None => output.success(format!("'{}' is no longer on this page", name)),
    }

    render::print_list(&view, &client, output);
    Ok(())
}

fn flag_list_name(flag: Flag) -> &'static str {
    match flag {
        Flag::Favorite => "favorites",
        Flag::WatchLater => "watch later",
    }
}
