//! `brain` CLI - Terminal client for a second-brain service

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use second_brain::{Brain, Config};

use cmd::output::Output;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable cards and messages
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser)]
#[command(name = "brain")]
#[command(about = "Save links and notes to your second brain, search them, share them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Terminal width in characters (default: from config)
    #[arg(long, global = true)]
    width: Option<u16>,

    /// API base URL (overrides config and BRAIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the landing banner
    Home {
        /// Typewriter passes over all phrases
        #[arg(long, default_value = "1")]
        cycles: usize,

        /// Print the phrases once without animation
        #[arg(long)]
        no_animate: bool,
    },

    /// Sign in and keep the session for later commands
    Signin {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Signout,

    /// List your saved content as cards
    List {
        /// Also load favicons and embed metadata
        #[arg(long)]
        previews: bool,
    },

    /// Add a link or a note
    Add {
        #[command(subcommand)]
        content: AddContent,
    },

    /// Delete an item by id
    Delete { id: String },

    /// Show the full text of one item
    View { id: String },

    /// Ask a question across your content
    Search { query: Vec<String> },

    /// Turn sharing of your collection on or off
    Share {
        #[arg(value_enum)]
        state: ShareState,
    },

    /// Browse a shared collection by hash or share link
    Shared { hash: String },

    /// Show which platform a URL belongs to
    Classify { urls: Vec<String> },
}

#[derive(Subcommand)]
pub enum AddContent {
    /// Save a link
    Url { title: String, link: String },
    /// Save a note
    Note { title: String, text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShareState {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    let out = Output::new(cli.format, cli.width.unwrap_or(config.viewport_width));

    // Commands that never touch the API.
    match &cli.command {
        Commands::Home { cycles, no_animate } => return cmd::cmd_home(*cycles, *no_animate).await,
        Commands::Classify { urls } => return cmd::cmd_classify(urls, &out),
        _ => {}
    }

    let brain = Brain::open(&config)?;

    match cli.command {
        Commands::Signin { username, password } => {
            cmd::cmd_signin(&brain, &username, password).await?;
        }
        Commands::Signup { username, password } => {
            cmd::cmd_signup(&brain, &username, password).await?;
        }
        Commands::Signout => cmd::cmd_signout(&brain).await?,
        Commands::List { previews } => cmd::cmd_list(&brain, &out, previews).await?,
        Commands::Add { content } => cmd::cmd_add(&brain, &out, content).await?,
        Commands::Delete { id } => cmd::cmd_delete(&brain, &out, &id).await?,
        Commands::View { id } => cmd::cmd_view(&brain, &out, &id).await?,
        Commands::Search { query } => cmd::cmd_search(&brain, &out, &query.join(" ")).await?,
        Commands::Share { state } => cmd::cmd_share(&brain, &out, state == ShareState::On).await?,
        Commands::Shared { hash } => cmd::cmd_shared(&brain, &out, &hash).await?,
        Commands::Home { .. } | Commands::Classify { .. } => {}
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--format json`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
