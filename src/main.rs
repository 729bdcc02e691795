use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::info;

use duty_roster_client::config::{parse_api_base, parse_timeout};
use duty_roster_client::display::{render_roster_board, render_staff_directory};
use duty_roster_client::download::DirectorySink;
use duty_roster_client::form::{AssignForm, StaffForm};
use duty_roster_client::{BackendClient, Config, Period, ReqwestTransport, RosterBoard, StaffDirectory};

#[derive(Parser)]
#[command(name = "roster", about = "Duty roster client: staff, assignments, auto-scheduling and CSV export")]
struct Cli {
    /// Backend base URL (overrides ROSTER_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Request timeout in seconds (overrides ROSTER_HTTP_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<String>,
    /// Where exported files are saved (overrides ROSTER_EXPORT_DIR)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone)]
struct PeriodArgs {
    /// First day, YYYY-MM-DD (defaults to this week's Monday)
    #[arg(long)]
    start: Option<String>,
    /// Last day, YYYY-MM-DD (defaults to this week's Sunday)
    #[arg(long)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Manage staff records
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Show roster, coverage and staff load
    Board {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Assign a staff member to a shift
    Assign {
        staff_id: String,
        #[arg(long)]
        shift_id: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        shift_type: Option<String>,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Remove an assignment
    Unassign {
        assignment_id: i64,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Let the backend fill the period's shifts
    Auto {
        #[command(flatten)]
        period: PeriodArgs,
        /// Shift types to fill (repeatable; defaults to morning, afternoon, night)
        #[arg(long = "shift-type")]
        shift_types: Vec<String>,
        #[arg(long, default_value_t = 1)]
        min_per_shift: u32,
    },
    /// Download the period's roster as CSV
    Export {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    List,
    Add {
        name: String,
        age: String,
        #[arg(default_value = "")]
        position: String,
    },
    Delete {
        id: i64,
    },
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(raw) = &cli.api_base {
        config.api_base = parse_api_base(raw)?;
    }
    if let Some(raw) = &cli.timeout {
        config.timeout = parse_timeout(raw)?;
    }
    if let Some(dir) = &cli.export_dir {
        config.export_dir = dir.clone();
    }
    Ok(config)
}

fn period_of(args: &PeriodArgs) -> Result<Period, Box<dyn std::error::Error>> {
    Ok(Period::from_bounds(args.start.as_deref(), args.end.as_deref())?)
}

/// Fails the process when the last action left an error behind.
fn check(error: Option<&String>) -> Result<(), Box<dyn std::error::Error>> {
    match error {
        Some(msg) => Err(msg.clone().into()),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!("Using backend at {}", config.api_base);

    let client = BackendClient::new(Arc::new(ReqwestTransport::new(&config)?));
    let sink = Box::new(DirectorySink::new(config.export_dir.clone()));

    match cli.command {
        Command::Staff { action } => {
            let mut directory = StaffDirectory::new(client);
            directory.mount().await;
            match action {
                StaffAction::List => {}
                StaffAction::Add { name, age, position } => {
                    directory.form = StaffForm::new(name, age, position);
                    directory.create_staff().await;
                }
                StaffAction::Delete { id } => directory.delete_staff(id).await,
            }
            print!("{}", render_staff_directory(&directory));
            check(directory.staff.last_error.as_ref())?;
        }
        Command::Board { period } => {
            let mut board = RosterBoard::new(client, sink, period_of(&period)?);
            board.mount().await;
            print!("{}", render_roster_board(&board));
            check(board.roster.last_error.as_ref())?;
        }
        Command::Assign {
            staff_id,
            shift_id,
            date,
            shift_type,
            period,
        } => {
            let mut board = RosterBoard::new(client, sink, period_of(&period)?);
            board.mount().await;
            board.form = match shift_id {
                Some(shift_id) => AssignForm::by_shift_id(staff_id, shift_id),
                None => AssignForm::by_slot(
                    staff_id,
                    date.unwrap_or_default(),
                    shift_type.unwrap_or_default(),
                ),
            };
            board.assign().await;
            board.refresh_stats().await;
            print!("{}", render_roster_board(&board));
            check(board.roster.last_error.as_ref())?;
        }
        Command::Unassign {
            assignment_id,
            period,
        } => {
            let mut board = RosterBoard::new(client, sink, period_of(&period)?);
            board.mount().await;
            board.unassign(assignment_id).await;
            board.refresh_stats().await;
            print!("{}", render_roster_board(&board));
            check(board.roster.last_error.as_ref())?;
        }
        Command::Auto {
            period,
            shift_types,
            min_per_shift,
        } => {
            let mut board = RosterBoard::new(client, sink, period_of(&period)?);
            if !shift_types.is_empty() {
                board.shift_types = shift_types;
            }
            board.min_per_shift = min_per_shift;
            board.auto_schedule().await;
            board.refresh_stats().await;
            print!("{}", render_roster_board(&board));
            check(board.roster.last_error.as_ref())?;
        }
        Command::Export { period } => {
            let mut board = RosterBoard::new(client, sink, period_of(&period)?);
            let saved = board.export_csv().await;
            if let Some(path) = saved {
                println!("Saved {}", path.display());
            }
            check(board.export_error.as_ref())?;
        }
    }

    Ok(())
}
