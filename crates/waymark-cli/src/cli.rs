use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "waymark", version, about = "Interactive configuration wizards")]
pub struct Cli {
    /// Settings file (default: $WAYMARK_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr; repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Run a wizard by name or path
    Run {
        /// Wizard name (looked up in the wizard directories) or file path
        wizard: String,

        /// Theme to render with
        #[arg(long)]
        theme: Option<String>,

        /// Answer file; runs without prompting
        #[arg(long, value_name = "FILE")]
        answers: Option<PathBuf>,

        /// Print the final variables as JSON on stdout
        #[arg(long)]
        print_variables: bool,
    },
    /// List wizards found in the wizard directories
    List,
    /// Load and lint a wizard file
    Validate { path: PathBuf },
    /// Write a starter wizard
    Create {
        name: String,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// List available themes
    Themes,
}
