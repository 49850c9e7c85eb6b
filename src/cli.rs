use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the input document with rates, devices, and the power ceiling.
    pub input: PathBuf,

    /// Print the plan as JSON instead of tables.
    #[clap(long)]
    pub json: bool,

    /// TOML file overriding the built-in day/night period windows.
    #[clap(long, env = "WATTPLAN_PERIODS")]
    pub periods: Option<PathBuf>,

    /// Upper bound on placements examined before the search gives up.
    #[clap(long, env = "WATTPLAN_SEARCH_BUDGET", default_value_t = 10_000_000)]
    pub search_budget: u64,
}
