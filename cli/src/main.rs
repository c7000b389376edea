//! CLI for the Jira toolkit.
//!
//! Mirrors tickets into another project, propagates due dates over issue
//! links, and lists board and TODO issues.

use clap::{Parser, Subcommand};
use jira_toolkit::{
    board_issues, render_description, todo_issues, BatchSummary, BoardMetrics, IssueKey,
    JiraConfig, Operation, ProjectKey, Runner, RunnerError, Settings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Jira toolkit - mirror tickets, sync due dates, inspect boards.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Jira site, e.g. `acme.atlassian.net` or a full base URL.
    #[arg(long, env = "JIRA_DOMAIN")]
    domain: String,

    /// Account email used for basic authentication.
    #[arg(long, env = "JIRA_EMAIL")]
    email: String,

    /// Jira API token.
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Path to an optional TOML settings file.
    #[arg(long, env = "JIRA_TOOLKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds. Overrides the settings file.
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create mirror tickets in another project.
    Mirror {
        /// Target board/project key (e.g. DEV).
        #[arg(short, long)]
        board: ProjectKey,

        /// Labels to add to mirror tickets. Repeat or separate with commas.
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,

        /// Ticket keys to mirror.
        #[arg(required = true)]
        tickets: Vec<IssueKey>,
    },

    /// Copy due dates to related tickets that have none.
    SyncDueDates {
        /// Ticket keys to process.
        #[arg(required = true)]
        tickets: Vec<IssueKey>,
    },

    /// Print a ticket's summary and description.
    Show {
        /// Ticket key.
        ticket: IssueKey,
    },

    /// List your TODO tickets on a board.
    Todos {
        /// Board id.
        board_id: u64,
    },

    /// List the issues on a board with simple metrics.
    BoardIssues {
        /// Board id.
        board_id: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ExitCode, RunnerError> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let timeout = args
        .timeout_secs
        .map(Duration::from_secs)
        .or_else(|| settings.timeout());
    let config =
        JiraConfig::new(&args.domain, &args.email, &args.api_token)?.with_timeout(timeout);
    let runner = Runner::new(&config, settings)?;

    let code = match args.command {
        Command::Mirror {
            board,
            labels,
            tickets,
        } => {
            let operation = Operation::Mirror {
                target_project: board,
                labels,
            };
            run_batch(&runner, &tickets, &operation).await
        }
        Command::SyncDueDates { tickets } => {
            run_batch(&runner, &tickets, &Operation::SyncDueDates).await
        }
        Command::Show { ticket } => show(&runner, &ticket).await,
        Command::Todos { board_id } => todos(&runner, board_id).await,
        Command::BoardIssues { board_id } => list_board(&runner, board_id).await,
    };

    Ok(code)
}

async fn run_batch(runner: &Runner, tickets: &[IssueKey], operation: &Operation) -> ExitCode {
    let summary = runner.run(tickets, operation).await;
    print_summary(&summary);

    if summary.all_fetches_failed() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints the final batch summary.
fn print_summary(summary: &BatchSummary) {
    println!("\nSummary:");
    println!("{}", "-".repeat(50));
    for result in summary.results() {
        println!(
            "{}: {} {}",
            result.key,
            result.outcome.marker().symbol(),
            result.outcome
        );
    }
    println!(
        "\n{} succeeded, {} skipped, {} failed",
        summary.succeeded, summary.skipped, summary.failed
    );
}

async fn show(runner: &Runner, ticket: &IssueKey) -> ExitCode {
    match runner.client().fetch_issue(ticket.as_str()).await {
        Ok(issue) => {
            println!("{}", render_description(&issue));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(key = %ticket, error = %e, "Failed to fetch ticket");
            eprintln!("Could not find ticket {ticket}");
            ExitCode::from(1)
        }
    }
}

async fn todos(runner: &Runner, board_id: u64) -> ExitCode {
    match todo_issues(runner.client(), board_id, runner.settings()).await {
        Ok(todos) if todos.issues.is_empty() => {
            eprintln!(
                "No TODO issues found in project {} (query: {})",
                todos.project_key, todos.jql
            );
            ExitCode::SUCCESS
        }
        Ok(todos) => {
            eprintln!(
                "Found {} TODO issue(s) in project {}",
                todos.issues.len(),
                todos.project_key
            );
            let keys: Vec<&str> = todos.issues.iter().map(|i| i.key.as_str()).collect();
            println!("{}", keys.join(" "));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(board_id, error = %e, "Failed to list TODO issues");
            ExitCode::from(1)
        }
    }
}

async fn list_board(runner: &Runner, board_id: u64) -> ExitCode {
    let issues = match board_issues(runner.client(), board_id).await {
        Ok(issues) => issues,
        Err(e) => {
            error!(board_id, error = %e, "Failed to list board issues");
            return ExitCode::from(1);
        }
    };

    println!("Issues on board {board_id}:");
    for issue in &issues {
        println!("- {}: {}", issue.key, issue.fields.summary);
    }

    let metrics = BoardMetrics::collect(&issues, &runner.settings().story_points_field);
    println!("\nTotal issues: {}", metrics.issue_count);
    for (status, count) in &metrics.by_status {
        println!("  {status}: {count}");
    }
    println!(
        "Story points: {} across {} estimated issue(s)",
        metrics.story_points, metrics.estimated_issues
    );

    ExitCode::SUCCESS
}
