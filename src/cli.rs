//! Command line arguments of the `pandaquery` search tool.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pandaquery")]
#[command(about = "Search the red panda lineage from the command line")]
#[command(version)]
pub struct Args {
    /// Dataset export to search, overriding the configured graph
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,
    /// Settings file layered over the built-in defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Search words; without any, queries are read from stdin one per line
    pub query: Vec<String>,
}

impl Args {
    /// The search words joined into one query, if any were given.
    pub fn query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}
