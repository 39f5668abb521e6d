//! ---
//! mv_section: "05-networking-external-interfaces"
//! mv_subsection: "binary"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "Apply, reset and plan subcommands of the control CLI."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use megaverse_common::config::AppConfig;
use megaverse_core::{plan as plan_walk, GridWalker, Plan, WalkMode, WalkReport};
use tokio::runtime::Runtime;

/// Options for `apply` and `reset`.
#[derive(Debug, Args)]
pub struct WalkOptions {
    /// Fetch the goal map and print the calls without issuing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Options for `plan`.
#[derive(Debug, Args)]
pub struct PlanOptions {
    /// Walk direction to plan for.
    #[arg(long, value_enum, default_value_t = ModeArg::Apply)]
    pub mode: ModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Apply,
    Reset,
}

impl From<ModeArg> for WalkMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Apply => WalkMode::Apply,
            ModeArg::Reset => WalkMode::Reset,
        }
    }
}

/// Run a full walk, or only print its plan when `--dry-run` is set.
pub fn run(mode: WalkMode, options: &WalkOptions, config: &AppConfig) -> Result<()> {
    if options.dry_run {
        return print_plan(mode, config);
    }
    let client = crate::build_client(config)?;
    let runtime = Runtime::new()?;
    let walker = GridWalker::new(&client);
    let report = runtime
        .block_on(walker.run(mode))
        .context("error fetching goal map")?;
    render_report(&report);
    Ok(())
}

/// Print the calls a walk would issue.
pub fn plan(options: &PlanOptions, config: &AppConfig) -> Result<()> {
    print_plan(options.mode.into(), config)
}

fn print_plan(mode: WalkMode, config: &AppConfig) -> Result<()> {
    let client = crate::build_client(config)?;
    let runtime = Runtime::new()?;
    let goal = runtime
        .block_on(GridWalker::new(&client).fetch_goal(mode))
        .context("error fetching goal map")?;
    render_plan(&plan_walk(&goal, mode));
    Ok(())
}

fn render_plan(plan: &Plan) {
    for action in &plan.actions {
        println!("{}", action.describe(plan.mode));
    }
    for skipped in &plan.unrecognised {
        println!("skip {}: {}", skipped.position, skipped.reason);
    }
    println!();
    for (kind, count) in plan.counts() {
        println!("{}: {}", kind.plural(), count);
    }
    println!(
        "{} calls over {} cells ({} unrecognised)",
        plan.actions.len(),
        plan.cells,
        plan.unrecognised.len()
    );
}

fn render_report(report: &WalkReport) {
    for line in report.summary_lines() {
        println!("{}", line);
    }
    for failure in &report.failures {
        match failure.status {
            Some(status) => println!(
                "  {} {} ({}): {}",
                failure.kind, failure.position, status, failure.message
            ),
            None => println!("  {} {}: {}", failure.kind, failure.position, failure.message),
        }
    }
}
