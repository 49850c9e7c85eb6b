mod cli;
mod input;
mod period;
mod prelude;
mod quantity;
mod report;
mod solver;
mod tables;
mod timeline;

use std::fs;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::Args,
    input::PlanRequest,
    period::Periods,
    prelude::*,
    report::PlanReport,
    solver::Solver,
};

fn main() -> Result {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let contents = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read `{}`", args.input.display()))?;
    let request: PlanRequest =
        serde_json::from_str(&contents).context("malformed input document")?;
    let periods = args.periods.as_deref().map_or_else(|| Ok(Periods::default()), Periods::load)?;

    let plan = Solver::builder()
        .request(&request)
        .periods(&periods)
        .search_budget(args.search_budget)
        .build()
        .solve()?;
    info!(cost = %plan.cost, "planned");

    let report = PlanReport::build(&plan, &request);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", tables::build_schedule_table(&plan, &request));
        println!("{}", tables::build_charges_table(&report, &request));
    }
    Ok(())
}
