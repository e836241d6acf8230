use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gitlab_share::config::Config;
use gitlab_share::gitlab::{format_gitlab_error, GitLabClient};
use gitlab_share::resource::share_group::{ACCESS_LEVEL, GROUP_ID, PROJECT_ID};
use gitlab_share::resource::{
    self, ProjectShareGroup, ReadOutcome, Resource, ResourceData, ResourceError,
};
use gitlab_share::state::{StateFile, DEFAULT_STATE_FILE};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "GLSHARE_LOG";

/// Share GitLab projects with groups
#[derive(Parser, Debug)]
#[command(name = "glshare", version, about, long_about = None)]
struct Args {
    /// State file tracking the managed share
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    /// GitLab API root (default: https://gitlab.com/api/v4)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// GitLab access token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, global = true, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, update or replace the share to match the given settings
    Apply {
        /// Project ID or namespace/path
        #[arg(long)]
        project_id: String,
        /// Group ID
        #[arg(long)]
        group_id: i64,
        /// guest, reporter, developer or maintainer
        #[arg(long)]
        access_level: String,
    },
    /// Refresh state from GitLab
    Refresh,
    /// Revoke the share and forget it
    Destroy,
    /// Adopt an existing share by its "<project_id>:<group_id>" ID
    Import { id: String },
    /// Print the recorded state
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match (EnvFilter::try_from_env(LOG_ENV), level.to_tracing_level()) {
        (Ok(filter), _) => filter,
        (Err(_), Some(level)) => {
            EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
        }
        (Err(_), None) => return None,
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("glshare started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("glshare").join("glshare.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".glshare").join("glshare.log");
    }
    PathBuf::from("glshare.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            match err.downcast_ref::<ResourceError>() {
                Some(ResourceError::Api(api)) => {
                    eprintln!("Error: {}", format_gitlab_error(api));
                    eprintln!("  {}", api);
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Build the share resource from CLI flags, environment and config file
fn share_resource(args: &Args) -> Result<ProjectShareGroup<GitLabClient>> {
    let config = Config::load();
    let base_url = config.effective_base_url(args.base_url.as_deref())?;
    let token = config.effective_token(args.token.as_deref())?;
    tracing::info!("Using GitLab API at {}", base_url);

    let client = GitLabClient::new(&base_url, &token).context("Failed to create GitLab client")?;
    Ok(ProjectShareGroup::new(client))
}

async fn run(args: Args) -> Result<()> {
    let mut state = StateFile::load(&args.state)?;

    match &args.command {
        Command::Apply {
            project_id,
            group_id,
            access_level,
        } => {
            let share = share_resource(&args)?;
            let desired = ResourceData::from_attributes([
                (PROJECT_ID, json!(project_id)),
                (GROUP_ID, json!(group_id)),
                (ACCESS_LEVEL, json!(access_level)),
            ]);
            let prior = resource::refresh_prior(&share, state.resource.take()).await?;
            let plan = resource::plan(share.schema(), prior.as_ref(), &desired)?;
            println!("Plan: {}", plan.describe());

            let applied = resource::apply(&share, &plan, prior, desired).await?;
            state.set_resource(share.resource_type(), applied);
            state.save(&args.state)?;
            print_state(state.resource.as_ref())?;
        }
        Command::Refresh => {
            let Some(mut current) = state.resource.clone() else {
                println!("Nothing to refresh.");
                return Ok(());
            };
            let share = share_resource(&args)?;
            if share.read(&mut current).await? == ReadOutcome::NotFound {
                eprintln!(
                    "Warning: {} is no longer shared upstream; state kept as is",
                    current.id()
                );
            }
            state.set_resource(share.resource_type(), current);
            state.save(&args.state)?;
            print_state(state.resource.as_ref())?;
        }
        Command::Destroy => {
            let Some(current) = state.resource.as_ref() else {
                println!("Nothing to destroy.");
                return Ok(());
            };
            let share = share_resource(&args)?;
            resource::destroy(&share, current).await?;
            println!("Destroyed {}", current.id());
            state.clear();
            state.save(&args.state)?;
        }
        Command::Import { id } => {
            if let Some(existing) = state.resource.as_ref() {
                anyhow::bail!(
                    "State already tracks {}; destroy it or use another --state file",
                    existing.id()
                );
            }
            let share = share_resource(&args)?;
            let (imported, outcome) = share.import(id).await?;
            if outcome == ReadOutcome::NotFound {
                anyhow::bail!("Cannot import non-existent share {}", id);
            }
            state.set_resource(share.resource_type(), imported);
            state.save(&args.state)?;
            print_state(state.resource.as_ref())?;
        }
        Command::Show => print_state(state.resource.as_ref())?,
    }

    Ok(())
}

fn print_state(resource: Option<&ResourceData>) -> Result<()> {
    match resource {
        Some(data) => println!("{}", serde_json::to_string_pretty(data)?),
        None => println!("No share recorded."),
    }
    Ok(())
}
