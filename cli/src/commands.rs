use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use tickgate_core::TimerError;
use tickgate_core::context::HostConfigExt;

use crate::context::{CliContext, CycleReport};

/// What the REPL should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    /// A fatal timer error; the session must end
    Fatal(String),
}

/// Gate skipped by `force`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Skip {
    Guard,
    Cooldown,
}

pub fn load_definitions(path: Option<&str>, ctx: &mut CliContext) -> Result<Flow, String> {
    let path = match path {
        Some(p) => PathBuf::from(p),
        None if ctx.config.has_definitions_path() => PathBuf::from(&ctx.config.definitions_path),
        None => return Err("no definitions path given or configured".to_string()),
    };

    let result = ctx.load_definitions(&path);
    load_flow(result, &path)
}

/// Map a load result onto the REPL flow. Fatal timer errors end the session.
fn load_flow(result: Result<usize, TimerError>, path: &Path) -> Result<Flow, String> {
    match result {
        Ok(count) => {
            println!("Loaded {} timers from {}", count, path.display());
            Ok(Flow::Continue)
        }
        Err(e) if e.is_fatal() => Ok(Flow::Fatal(e.to_string())),
        Err(e) => Err(error_chain(&e)),
    }
}

pub fn tick(ctx: &mut CliContext, count: u32) {
    for _ in 0..count {
        let report = ctx.run_cycle();
        print_report(&report);
    }
}

/// Same as `tick`, paced by a tokio interval
pub async fn run(ctx: &mut CliContext, ticks: u32, interval_ms: Option<u64>) {
    let interval_ms = interval_ms.unwrap_or(ctx.config.tick_interval_ms).max(1);
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));

    for _ in 0..ticks {
        interval.tick().await;
        let report = ctx.run_cycle();
        print_report(&report);
    }
}

pub fn show_status(ctx: &CliContext) {
    if ctx.timers.is_empty() {
        println!("No timers loaded");
        return;
    }

    println!(
        "tick {}  energy {}/{}",
        ctx.state.tick, ctx.state.energy, ctx.state.max_energy
    );
    println!(
        "{:<24} {:<11} {:>10} {:>10} {:>10}",
        "Timer", "Basis", "Cooldown", "Last", "Remaining"
    );
    println!("{}", "-".repeat(69));

    for timer in &ctx.timers {
        let unit = timer.basis().unit();
        let last = if timer.has_triggered() {
            format!("{}{}", timer.last_triggered_at(), unit)
        } else {
            "never".to_string()
        };
        println!(
            "{:<24} {:<11} {:>10} {:>10} {:>10}",
            timer.name(),
            timer.basis().to_string(),
            format!("{}{}", timer.cooldown(), unit),
            last,
            format!("{}{}", timer.remaining(), unit),
        );
    }

    if !ctx.state.journal.is_empty() {
        println!("\nRecent:");
        for line in ctx.state.journal.iter().rev().take(5) {
            println!("  {}", line);
        }
    }
}

pub fn reset(ctx: &mut CliContext, name: Option<&str>, all: bool) -> Result<(), String> {
    if all {
        ctx.timers.iter_mut().for_each(|t| t.reset());
        println!("Reset {} timers", ctx.timers.len());
        return Ok(());
    }

    let name = name.ok_or("reset needs --name or --all")?;
    let timer = ctx
        .timer_mut(name)
        .ok_or_else(|| format!("no timer named '{}'", name))?;
    timer.reset();
    println!("Reset {}", name);
    Ok(())
}

pub fn force(ctx: &mut CliContext, name: &str, skip: Skip) -> Result<(), String> {
    let CliContext { timers, state, .. } = ctx;
    let timer = timers
        .iter_mut()
        .find(|t| t.name() == name)
        .ok_or_else(|| format!("no timer named '{}'", name))?;

    let fired = match skip {
        Skip::Guard => timer.trigger_ignoring_guard(state),
        Skip::Cooldown => timer.trigger_ignoring_cooldown(state),
    };

    if fired {
        println!("{} fired", name);
    } else {
        println!("{} did not fire", name);
    }
    Ok(())
}

pub fn show_settings(ctx: &CliContext) {
    let config = &ctx.config;
    println!("definitions_path = {}", config.definitions_path);
    println!("tick_interval_ms = {}", config.tick_interval_ms);
    println!("energy_regen     = {}", config.energy_regen);
    println!("max_energy       = {}", config.max_energy);
}

pub fn set_path(path: &str, ctx: &mut CliContext) -> Result<(), String> {
    let filepath = PathBuf::from(path);
    if !filepath.is_file() {
        return Err(format!("Update failed. {} is not a file.", path));
    }

    ctx.config.definitions_path = path.to_string();
    ctx.config.save().map_err(|e| e.to_string())?;
    println!("Definitions path set to {}", path);
    Ok(())
}

pub fn exit() -> Result<(), String> {
    writeln!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

fn print_report(report: &CycleReport) {
    if report.fired.is_empty() && report.pending.is_empty() && report.failed.is_empty() {
        return;
    }

    let mut parts = Vec::new();
    if !report.fired.is_empty() {
        parts.push(format!("fired: {}", report.fired.join(", ")));
    }
    if !report.pending.is_empty() {
        parts.push(format!("pending: {}", report.pending.join(", ")));
    }
    if !report.failed.is_empty() {
        parts.push(format!("failed: {}", report.failed.join(", ")));
    }
    println!("[tick {}] {}", report.tick, parts.join(" | "));
}

/// "outer: cause: root cause"
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut causes = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes.join(": ")
}
