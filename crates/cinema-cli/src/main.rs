use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use cinema_config::PathManager;
use cinema_models::{Collection, Flag};
use commands::{activity, browse, clear, config, session, toggle};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinema")]
#[command(about = "Cinema Guru - browse the movie catalog, favorites and watch later from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr; without PATH
    /// they go to the logs directory that `clear --logs` empties
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Filters accepted by the catalog listing.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only titles whose name contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Earliest release year
    #[arg(long, value_name = "YEAR")]
    pub min_year: Option<u32>,

    /// Latest release year
    #[arg(long, value_name = "YEAR")]
    pub max_year: Option<u32>,

    /// Genre to include (repeatable)
    #[arg(long = "genre", value_name = "GENRE")]
    pub genres: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalog (default)
    #[command(long_about = "Show one page of the movie catalog with optional search, year and genre filters, followed by the recent-activity feed. Use --interactive to page, filter and toggle flags from a menu.")]
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page, filter and toggle from an interactive menu
        #[arg(short, long, action = ArgAction::SetTrue)]
        interactive: bool,

        /// Do not show the recent-activity feed
        #[arg(long, action = ArgAction::SetTrue)]
        no_activity: bool,
    },
    /// List your favorite titles
    Favorites {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page and toggle from an interactive menu
        #[arg(short, long, action = ArgAction::SetTrue)]
        interactive: bool,
    },
    /// List titles saved for later
    WatchLater {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page and toggle from an interactive menu
        #[arg(short, long, action = ArgAction::SetTrue)]
        interactive: bool,
    },
    /// Toggle a flag on a title
    #[command(long_about = "Load the page containing the title, read its current favorite or watch-later flag, flip it, and show the refreshed list.")]
    Toggle {
        /// Which flag to flip
        #[arg(value_enum)]
        flag: FlagArg,

        /// Title ID
        id: String,

        /// List the title is on
        #[arg(long, value_enum, default_value = "titles")]
        from: CollectionArg,

        /// Page the title is on
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the recent-activity feed
    Activity,
    /// Store a session token and verify it
    #[command(long_about = "Sign in through the web sign-in page, copy the session cookie value and store it here. The token is verified against the session endpoint before it is saved.")]
    Login {
        /// Session token (if not provided, will prompt)
        #[arg(long)]
        token: Option<String>,
    },
    /// Sign out and forget the stored session token
    Logout,
    /// Show who is signed in
    Whoami,
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Remove stored credentials or logs
    Clear {
        /// Clear credentials and logs
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the stored session token
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Clear log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the session token)
    Show {
        /// Show the session token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Change configuration values
    Set {
        /// Base URL of the Cinema Guru web app
        #[arg(long)]
        base_url: Option<String>,

        /// Name of the session cookie
        #[arg(long)]
        session_cookie: Option<String>,

        /// Request timeout in seconds (0 removes the timeout)
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,

        /// Go back to page 1 whenever a filter changes
        #[arg(long)]
        reset_page_on_filter_change: Option<bool>,

        /// Show the activity feed under the dashboard
        #[arg(long)]
        show_activity: Option<bool>,

        /// Genre choices offered in interactive mode (comma-separated)
        #[arg(long, value_delimiter = ',')]
        genres: Option<Vec<String>>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlagArg {
    Favorite,
    WatchLater,
}

impl From<FlagArg> for Flag {
    fn from(arg: FlagArg) -> Self {
        match arg {
            FlagArg::Favorite => Flag::Favorite,
            FlagArg::WatchLater => Flag::WatchLater,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollectionArg {
    Titles,
    Favorites,
    WatchLater,
}

impl From<CollectionArg> for Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Titles => Collection::Titles,
            CollectionArg::Favorites => Collection::Favorites,
            CollectionArg::WatchLater => Collection::WatchLater,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = logging::resolve_log_file(cli.log_file.clone(), &PathManager::default());
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let command = cli.command.unwrap_or(Commands::Dashboard {
        filters: FilterArgs::default(),
        page: 1,
        interactive: false,
        no_activity: false,
    });

    match command {
        Commands::Dashboard { filters, page, interactive, no_activity } => {
            let args = browse::BrowseArgs {
                collection: Collection::Titles,
                filters,
                page,
                interactive,
                show_activity: !no_activity,
            };
            browse::run_browse(args, &output).await
        }
        Commands::Favorites { page, interactive } => {
            browse::run_browse(browse::BrowseArgs::personal(Collection::Favorites, page, interactive), &output).await
        }
        Commands::WatchLater { page, interactive } => {
            browse::run_browse(browse::BrowseArgs::personal(Collection::WatchLater, page, interactive), &output).await
        }
        Commands::Toggle { flag, id, from, page, filters } => {
            toggle::run_toggle(flag.into(), &id, from.into(), page, filters, &output).await
        }
        Commands::Activity => activity::run_activity(&output).await,
        Commands::Login { token } => session::run_login(token, &output).await,
        Commands::Logout => session::run_logout(&output).await,
        Commands::Whoami => session::run_whoami(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, credentials, logs } => clear::run_clear(all, credentials, logs, &output).await,
    }
}
