use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    about = "Command-line client for the todo server",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL, e.g. "http://localhost:8888" (overrides config.toml)
    #[arg(long, global = true, env = "TODO_URL")]
    pub url: Option<String>,

    /// More log output; repeat for debug
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every todo
    List,

    /// Print one todo
    Get { id: Uuid },

    /// Create a todo
    Add {
        title: String,

        /// Create it already completed
        #[arg(long)]
        completed: bool,
    },

    /// Change a todo's title or completion flag.
    /// Fields left out keep their current value.
    Update {
        id: Uuid,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        completed: Option<bool>,
    },

    /// Delete a todo
    Delete { id: Uuid },

    /// Mark a todo completed
    Complete { id: Uuid },

    /// Mark a todo not completed
    Reset { id: Uuid },

    /// Mirror the live list and print it after every change
    Watch,
}

impl Cli {
    /// Default tracing filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
