//! Leave engine command line.
//!
//! `process` runs one leave roster workbook through the parser and the
//! deduction calculator and writes the result CSV files; `serve` exposes the
//! same pipeline over HTTP.
//!
//! Exit codes: 0 on success, 3 when the workbook is not a leave roster (no
//! period title or no header row) and 1 for every other failure.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::{LeaveDeductionCalculator, ShiftClassLookup};
use leave_engine::config::ConfigLoader;
use leave_engine::error::EngineError;
use leave_engine::parsing::LeaveSheetParser;
use leave_engine::workbook::{
    export_report, load_driver_accounts, load_shift_classes, read_leave_sheet,
};

/// Exit code for a workbook that is not a leave roster.
const NOT_A_ROSTER_EXIT: u8 = 3;

#[derive(Parser)]
#[command(name = "leave-engine")]
#[command(about = "Leave roster parsing and leave deduction engine")]
#[command(version)]
struct Cli {
    /// Configuration directory holding deduction.yaml and leave_types.yaml
    #[arg(long, global = true, default_value = "config/default")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a leave roster workbook and write deduction reports
    Process {
        /// The leave roster workbook (.xlsx or .xls)
        file: PathBuf,

        /// Shift-class roster CSV
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Driver list CSV
        #[arg(long)]
        drivers: Option<PathBuf>,

        /// Directory the result CSV files are written to
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "leave-engine failed");
            eprintln!("{}", failure_message(e.as_ref()));
            ExitCode::from(exit_code_for(e.as_ref()))
        }
    }
}

fn as_format_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a EngineError> {
    err.downcast_ref::<EngineError>()
        .filter(|e| e.is_format_error())
}

fn exit_code_for(err: &(dyn Error + 'static)) -> u8 {
    if as_format_error(err).is_some() {
        NOT_A_ROSTER_EXIT
    } else {
        1
    }
}

fn failure_message(err: &(dyn Error + 'static)) -> String {
    match as_format_error(err) {
        Some(e) => format!("Not a leave roster: {}", e),
        None => format!("Error: {}", err),
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = ConfigLoader::load(&cli.config)?;

    match cli.command {
        Commands::Process {
            file,
            roster,
            drivers,
            output_dir,
        } => {
            let sheet = read_leave_sheet(&file)?;
            let parsed = LeaveSheetParser::new(config.config().leave_types()).parse(&sheet)?;

            let shift_classes = match roster {
                Some(path) => load_shift_classes(path)?,
                None => ShiftClassLookup::new(),
            };
            let driver_accounts = drivers.map(load_driver_accounts).unwrap_or_default();

            let report = LeaveDeductionCalculator::new(config.config().deduction())
                .with_shift_classes(shift_classes)
                .with_drivers(driver_accounts)
                .calculate(parsed.parsed);
            let files = export_report(&output_dir, &report, &parsed.unparsed)?;

            info!(
                file = %file.display(),
                year = parsed.period.year,
                month = parsed.period.month,
                records = report.records.len(),
                unparsed = parsed.unparsed.len(),
                employees = report.totals.employee_count,
                sick_deduction = report.totals.sick_deduction,
                personal_deduction = report.totals.personal_deduction,
                total_deduction = report.totals.total_deduction,
                output = %files.leave_basic.display(),
                "Leave roster processed"
            );
        }
        Commands::Serve { addr } => {
            let app = create_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "Leave engine API listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
