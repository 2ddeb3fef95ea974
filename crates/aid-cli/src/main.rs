// Rust guideline compliant 2026-10-16

//! aid CLI Application
//!
//! Operator command line for the mutual aid platform core. Commands act on
//! JSONL snapshot files and print decisions, rankings and plans.

use aid_app::{init_tracing, AppError, LogOptions};
use aid_cli::commands;
use aid_cli::commands::approve::ApprovalRequest;
use aid_cli::commands::check::CheckTarget;
use aid_cli::commands::config::ConfigAction;
use aid_cli::commands::nearby::NearbyQuery;
use aid_cli::commands::reply::ReplyRequest;
use aid_cli::commands::transition::TransitionRequest;
use aid_cli::{create_formatter, should_use_color, CallerArgs, OutputFormatter};
use aid_core::Config;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "aid",
    version,
    about = "Mutual aid platform: access policy, status transitions and proximity search",
    long_about = "Runs the platform's decision logic against JSONL snapshot files: who may do what, which status changes are legal, and which open help posts lie near a point.",
    after_help = "Examples:\n  aid --user u1 nearby --posts posts.jsonl --lat 40.0 --lon=-75.0 --radius-km 10\n  aid --user u1 check support_ticket read --records tickets.jsonl --id tkt-1\n  aid --user admin --admin transition ticket tkt-1 resolved --records tickets.jsonl --write\n  aid --user u1 reply tkt-1 \"Any update?\" --tickets tickets.jsonl\n  aid --user admin --admin approve u2 approved --role user --profiles profiles.jsonl\n  aid config show\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Directory holding config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    caller: CallerArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Find open help posts near a point
    Nearby {
        /// Help post snapshot (JSONL)
        #[arg(long)]
        posts: PathBuf,

        /// Origin latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Origin longitude
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in kilometers
        #[arg(long)]
        radius_km: Option<f64>,

        /// Only posts of this type (need_help, offer_help)
        #[arg(long = "type")]
        post_type: Option<String>,

        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Ask the access policy for a decision
    Check {
        /// Resource kind (help_post, grievance, support_ticket, ticket_message, rating, profile)
        kind: String,

        /// Action (read, create, update_own_fields, update_status, delete, assign)
        action: String,

        /// Snapshot holding the record; tickets for ticket_message
        #[arg(long)]
        records: Option<PathBuf>,

        /// Record id within the snapshot
        #[arg(long)]
        id: Option<String>,

        /// Member to be rated, for rating create
        #[arg(long)]
        rated_user: Option<String>,

        /// Score, for rating create
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i64>,
    },

    /// Change the status of a help post, grievance or ticket
    Transition {
        /// Resource kind (help_post, grievance, support_ticket)
        kind: String,

        /// Record id
        id: String,

        /// Target status
        status: String,

        /// Snapshot holding the record
        #[arg(long)]
        records: PathBuf,

        /// Store the result in the snapshot
        #[arg(long)]
        write: bool,
    },

    /// Post a message on a ticket thread
    Reply {
        /// Ticket id
        ticket_id: String,

        /// Message text
        message: String,

        /// Ticket snapshot
        #[arg(long)]
        tickets: PathBuf,

        /// Mark the message as internal
        #[arg(long)]
        internal: bool,

        /// Store the ticket status cascade in the snapshot
        #[arg(long)]
        write: bool,
    },

    /// Show the ratings a member received
    Ratings {
        /// Member id
        user_id: String,

        /// Rating snapshot
        #[arg(long)]
        ratings: PathBuf,
    },

    /// Approve, reject or suspend a member
    Approve {
        /// Member id
        user_id: String,

        /// New status (approved, rejected, suspended)
        status: String,

        /// Role granted on approval
        #[arg(long)]
        role: Option<String>,

        /// Profile snapshot
        #[arg(long)]
        profiles: PathBuf,

        /// Store the new status in the snapshot
        #[arg(long)]
        write: bool,
    },

    /// Inspect or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let use_color = !cli.no_color && should_use_color();
    let config_dir = cli.config.clone().unwrap_or_else(|| PathBuf::from("."));

    let config = match Config::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            let formatter = create_formatter(format_name(&cli, None), use_color);
            eprintln!("{}", formatter.format_error(&anyhow::Error::from(AppError::from(err))));
            return ExitCode::FAILURE;
        }
    };
    let formatter = create_formatter(format_name(&cli, Some(&config)), use_color);

    let log_options = LogOptions {
        log_level: cli.log_level.clone().unwrap_or_else(|| config.log_level.clone()),
        log_file: cli.log_file.clone(),
    };
    let _log_guard = match init_tracing(&log_options) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", formatter.format_error(&anyhow::Error::from(err)));
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &config, &config_dir, formatter.as_ref(), use_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            eprintln!("{}", formatter.format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn format_name(cli: &Cli, config: Option<&Config>) -> &'static str {
    match cli.format {
        Some(OutputFormat::Json) => "json",
        Some(OutputFormat::Table) => "table",
        Some(OutputFormat::Plain) => "plain",
        None if cli.json => "json",
        None => match config.map(|c| c.output_format) {
            Some(aid_core::OutputFormat::Json) => "json",
            Some(aid_core::OutputFormat::Plain) => "plain",
            _ => "table",
        },
    }
}

fn run(
    cli: Cli,
    config: &Config,
    config_dir: &Path,
    formatter: &dyn OutputFormatter,
    use_color: bool,
) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Nearby {
            posts,
            lat,
            lon,
            radius_km,
            post_type,
            category,
        }) => {
            let query = NearbyQuery {
                latitude: lat,
                longitude: lon,
                radius_km,
                post_type,
                category,
            };
            commands::nearby::execute(&cli.caller.identity()?, config, &posts, &query, formatter)?;
        }
        Some(Commands::Check {
            kind,
            action,
            records,
            id,
            rated_user,
            rating,
        }) => {
            let target = CheckTarget {
                records: records.as_deref(),
                id: id.as_deref(),
                rated_user: rated_user.as_deref(),
                rating,
            };
            commands::check::execute(&cli.caller.identity()?, &kind, &action, &target, formatter)?;
        }
        Some(Commands::Transition {
            kind,
            id,
            status,
            records,
            write,
        }) => {
            let request = TransitionRequest {
                kind: &kind,
                records: &records,
                id: &id,
                status: &status,
                write,
            };
            commands::transition::execute(&cli.caller.identity()?, &request, formatter)?;
        }
        Some(Commands::Reply {
            ticket_id,
            message,
            tickets,
            internal,
            write,
        }) => {
            let request = ReplyRequest {
                tickets: &tickets,
                ticket_id: &ticket_id,
                message: &message,
                internal,
                write,
            };
            commands::reply::execute(&cli.caller.identity()?, &request, formatter)?;
        }
        Some(Commands::Ratings { user_id, ratings }) => {
            commands::ratings::execute(&cli.caller.identity()?, &ratings, &user_id, formatter)?;
        }
        Some(Commands::Approve {
            user_id,
            status,
            role,
            profiles,
            write,
        }) => {
            let request = ApprovalRequest {
                profiles: &profiles,
                user_id: &user_id,
                status: &status,
                role: role.as_deref(),
                write,
            };
            commands::approve::execute(&cli.caller.identity()?, &request, formatter)?;
        }
        Some(Commands::Config { action }) => {
            commands::config::execute(action, config_dir, config, formatter, use_color)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
