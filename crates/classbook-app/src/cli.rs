//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueHint};

/// Expand class schedules, check new classes for booking conflicts and list
/// occurrences. Each command reads one JSON request and prints one JSON
/// response.
#[derive(Parser, Debug, Clone)]
#[command(name = "classbook", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Expand one class over a query window.
    Expand(RequestArgs),
    /// Check a candidate class against existing classes. Exits with 2 on a conflict.
    Check(RequestArgs),
    /// List the occurrences of many classes over a window, one page at a time.
    List(RequestArgs),
}

/// Where the request document comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct RequestArgs {
    /// JSON request file; reads stdin when omitted or `-`.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Expand(_) => "expand",
            Self::Check(_) => "check",
            Self::List(_) => "list",
        }
    }

    /// The request file, or `None` for stdin.
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        let (Self::Expand(args) | Self::Check(args) | Self::List(args)) = self;
        args.file.as_deref().filter(|path| *path != Path::new("-"))
    }
}
