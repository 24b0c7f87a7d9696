use super::context::{require_session, AppContext};
use super::{loading, render};
use crate::output::Output;
use cinema_core::ActivityFeed;
use color_eyre::Result;

pub async fn run_activity(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = ctx.client()?;

    if require_session(&ctx, &client, output).await.is_none() {
        return Ok(());
    }

    let mut feed = ActivityFeed::new(client);
    loading::while_loading(output, "Loading activity...", feed.mount()).await;
    render::print_feed(&feed, output);

    Ok(())
}
