use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "DESKMATE_HOME";

#[derive(Parser, Debug)]
#[command(name = "deskmate", bin_name = "deskmate", version)]
#[command(
    about = "Personal assistant for the command line: contacts, birthdays and notes",
    long_about = "Without a command, starts an interactive session (type 'help' inside it). \
                  With one, runs it once and exits, e.g. `deskmate add John 0671234567`."
)]
pub struct Cli {
    /// Where contacts, notes and config live [default: $DESKMATE_HOME, then the platform data dir]
    #[arg(long, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, help_heading = "Options")]
    pub yes: bool,

    /// Disable coloured output
    #[arg(long, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, help_heading = "Options")]
    pub verbose: bool,

    /// A single command to run, with its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}
