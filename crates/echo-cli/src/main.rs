use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use echo_application::AppContext;
use echo_core::clock::SystemClock;
use echo_core::wellness::TimeWindow;
use echo_infrastructure::EchoPaths;
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "echowhisper")]
#[command(about = "EchoWhisper - a wellness companion in your terminal", long_about = None)]
struct Cli {
    /// Data directory (defaults to the platform config directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also write daily rolling logs under <data-dir>/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the companion personalities
    Personas,
    /// Chat with a companion
    Chat {
        /// Personality to start with
        #[arg(long)]
        personality: Option<String>,
        /// Caller identity used for request throttling
        #[arg(long, default_value = "local")]
        token: String,
    },
    /// Record a mood check-in
    Mood {
        /// Overall mood (1-5)
        #[arg(long)]
        mood: u8,
        #[arg(long)]
        energy: Option<u8>,
        #[arg(long)]
        anxiety: Option<u8>,
        #[arg(long)]
        sleep: Option<u8>,
        #[arg(long)]
        note: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show recent mood check-ins
    History {
        #[arg(long, default_value_t = echo_application::RECENT_ENTRY_COUNT)]
        limit: usize,
    },
    /// Show wellness insights
    Insights {
        /// week, month or quarter
        #[arg(long, default_value = "week")]
        window: TimeWindow,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage the Pro trial
    Trial {
        #[command(subcommand)]
        action: TrialAction,
    },
    /// Guided breathing exercise
    Breathe {
        #[arg(long, default_value_t = 3)]
        cycles: u32,
        /// Do not wait a real second between ticks
        #[arg(long)]
        fast: bool,
    },
    /// Crisis hotlines and grounding techniques
    Resources,
    /// Write the default config.toml if none exists
    Init,
}

#[derive(Subcommand)]
enum TrialAction {
    /// Start the 30-day trial (once per device)
    Start,
    /// Show trial status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => EchoPaths::with_root(dir),
        None => EchoPaths::resolve().context("Failed to resolve data directory")?,
    };
    let _log_guard = logging::init(cli.log_file.then(|| paths.logs_dir()));

    let agent = match cli.command {
        Commands::Chat { .. } => AppContext::agent_from_env(),
        _ => None,
    };
    let context = AppContext::bootstrap(paths, agent, Arc::new(SystemClock)).await?;

    match cli.command {
        Commands::Personas => commands::personas::run(&context).await?,
        Commands::Chat { personality, token } => {
            commands::chat::run(&context, personality.as_deref(), &token).await?
        }
        Commands::Mood {
            mood,
            energy,
            anxiety,
            sleep,
            note,
            tags,
        } => {
            let submission = echo_core::mood::MoodSubmission {
                mood,
                energy,
                anxiety,
                sleep,
                note,
                tags,
            };
            commands::mood::record(&context, submission).await?
        }
        Commands::History { limit } => commands::mood::history(&context, limit).await?,
        Commands::Insights { window, json } => commands::insights::run(&context, window, json).await?,
        Commands::Trial { action } => match action {
            TrialAction::Start => commands::trial::start(&context).await?,
            TrialAction::Status => commands::trial::status(&context).await?,
        },
        Commands::Breathe { cycles, fast } => commands::breathe::run(cycles, fast).await?,
        Commands::Resources => commands::resources::run(),
        Commands::Init => commands::init::run(context.paths())?,
    }

    Ok(())
}
