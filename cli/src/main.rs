use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tickgate_cli::commands::{self, Flow, Skip};
use tickgate_cli::{CliContext, logging, readline};

#[derive(Parser)]
#[command(version, about = "Cooldown timer host loop")]
struct Args {
    /// Timer definitions file to load at startup
    #[arg(short, long)]
    definitions: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();
    let mut ctx = CliContext::new();

    let startup = match args.definitions.as_deref() {
        Some(path) => Some(path.to_string()),
        None if Path::new(&ctx.config.definitions_path).is_file() => {
            Some(ctx.config.definitions_path.clone())
        }
        None => None,
    };
    if let Some(path) = startup {
        match commands::load_definitions(Some(&path), &mut ctx) {
            Ok(Flow::Fatal(reason)) => return fatal(&reason),
            Ok(_) => {}
            Err(err) => println!("{err}"),
        }
    }

    loop {
        let line = match readline() {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = %err, "Failed to read input");
                return ExitCode::FAILURE;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Ok(Flow::Fatal(reason)) => return fatal(&reason),
            Err(err) => {
                let mut stdout = std::io::stdout();
                let _ = writeln!(stdout, "{err}");
                let _ = stdout.flush();
            }
        }
    }

    ExitCode::SUCCESS
}

fn fatal(reason: &str) -> ExitCode {
    tracing::error!(reason, "Fatal timer error, ending session");
    ExitCode::FAILURE
}

#[derive(Parser)]
#[command(version, about = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load timer definitions (defaults to the configured path)
    Load {
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Advance the loop immediately
    Tick {
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
    /// Advance the loop at the configured pace
    Run {
        #[arg(short, long)]
        ticks: u32,
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },
    Status,
    Reset {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        all: bool,
    },
    /// Fire a timer while skipping one of its gates
    Force {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, value_enum)]
        skip: Skip,
    },
    Config,
    SetPath {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<Flow, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "tickgate".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => return commands::load_definitions(path.as_deref(), ctx),
        Some(Commands::Tick { count }) => commands::tick(ctx, *count),
        Some(Commands::Run { ticks, interval_ms }) => commands::run(ctx, *ticks, *interval_ms).await,
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Reset { name, all }) => commands::reset(ctx, name.as_deref(), *all)?,
        Some(Commands::Force { name, skip }) => commands::force(ctx, name, *skip)?,
        Some(Commands::Config) => commands::show_settings(ctx),
        Some(Commands::SetPath { path }) => commands::set_path(path, ctx)?,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(Flow::Quit);
        }
        None => {}
    }
    Ok(Flow::Continue)
}
