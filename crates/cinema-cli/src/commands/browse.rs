use super::context::{require_session, AppContext};
use super::{interactive, loading, render};
use crate::output::Output;
use crate::FilterArgs;
use cinema_core::{ActivityFeed, ListView};
use cinema_models::{Collection, FilterState};
use color_eyre::Result;

pub struct BrowseArgs {
    pub collection: Collection,
    pub filters: FilterArgs,
    pub page: u32,
    pub interactive: bool,
    pub show_activity: bool,
}

impl BrowseArgs {
    /// Favorites or watch-later: paged, no filters, no activity feed.
    pub fn personal(collection: Collection, page: u32, interactive: bool) -> Self {
        Self {
            collection,
            filters: FilterArgs::default(),
            page,
            interactive,
            show_activity: false,
        }
    }
}

/// Build the initial filter state from command-line flags.
pub fn initial_filters(args: &FilterArgs, page: u32) -> FilterState {
    let mut filters = FilterState::new().with_page(page);
    if let Some(search) = &args.search {
        filters.set_search(search.clone());
    }
    filters.set_min_year(args.min_year);
    filters.set_max_year(args.max_year);
    for genre in &args.genres {
        if !filters.has_genre(genre) {
            filters.toggle_genre(genre);
        }
    }
    filters
}

pub async fn run_browse(args: BrowseArgs, output: &Output) -> Result<()> {
    tracing::debug!(collection = ?args.collection, page = args.page, "Browse command started");

    let ctx = AppContext::load()?;
    let client = ctx.client()?;

    let session = match loading::while_loading(output, "Checking session...", require_session(&ctx, &client, output)).await {
        Some(session) => session,
        None => return Ok(()),
    };
    render::print_welcome(&session, output);

    let mut view = ListView::new(client.clone(), args.collection)
        .with_options(&ctx.config.browse)
        .with_filters(initial_filters(&args.filters, args.page));

    let show_activity = args.show_activity && ctx.config.browse.show_activity;
    let mut feed = ActivityFeed::new(client.clone());

    let loading_message = view.status_message().unwrap_or("Loading...");
    if show_activity {
        // The list and the feed share no state, so fetch them together
        loading::while_loading(output, loading_message, async {
            futures::join!(view.load(), feed.mount());
        })
        .await;
    } else {
        loading::while_loading(output, loading_message, view.load()).await;
    }

    render::print_list(&view, &client, output);
    if show_activity {
        render::print_feed(&feed, output);
    }

    if args.interactive {
        interactive::run_interactive(&mut view, &client, &ctx.config.browse.genre_options, output).await?;
    }

    Ok(())
}
