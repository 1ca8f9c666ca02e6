//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use notesync_content::Format;
use notesync_core::Policy;
use std::path::PathBuf;

/// notesync - Keep a directory of text files in sync with a notebook
#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Verbose mode: also print log events to the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the log file. Default is notesync.log in the home directory
    #[arg(short, long, global = true)]
    pub logpath: Option<PathBuf>,

    /// Config file. Default is notesync/config.toml in the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the note store
    #[arg(long, global = true, env = "NOTESYNC_STORE")]
    pub store: Option<PathBuf>,

    /// Access token of the note store
    #[arg(long, global = true, env = "NOTESYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub sync: SyncArgs,

    /// Maintenance commands. Without one, a sync pass runs
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments of a sync run
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncArgs {
    /// Path to the directory to synchronize
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Mask of files to synchronize. Default is "*.*"
    #[arg(short, long)]
    pub mask: Option<String>,

    /// Format of the file contents
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Notebook to synchronize with. Default is the directory name
    #[arg(short, long, conflicts_with = "all")]
    pub notebook: Option<String>,

    /// Two-way sync: upload changes first, then download. Overrides --one-way
    #[arg(short, long)]
    pub two_way: bool,

    /// One-way sync direction
    #[arg(short = 'w', long, value_enum, default_value = "up")]
    pub one_way: Direction,

    /// Synchronize every notebook into a subdirectory of --path
    #[arg(short, long)]
    pub all: bool,

    /// Upload notes in conflict. Use only after merging every reported
    /// conflict into the local files
    #[arg(short = 'M', long)]
    pub merged: bool,

    /// Report what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print pass reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Effective policy: --two-way wins over --one-way.
    pub fn policy(&self) -> Policy {
        if self.two_way {
            Policy::TwoWay
        } else {
            match self.one_way {
                Direction::Up => Policy::Up,
                Direction::Down => Policy::Down,
            }
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Up,
    Down,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Plain,
    Markdown,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Format::Plain,
            FormatArg::Markdown => Format::Markdown,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create an empty note store protected by the access token
    ///
    /// Examples:
    ///   notesync init-store --store ~/notes-store --token s3cret
    InitStore,

    /// List the notebooks of the note store
    Notebooks {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("notesync").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_policy_is_upload() {
        let cli = parse(&["--path", "/notes"]);
        assert_eq!(cli.sync.policy(), Policy::Up);
        assert!(cli.command.is_none());
    }

    #[test]
    fn two_way_overrides_one_way() {
        let cli = parse(&["-p", "/notes", "-w", "down", "-t"]);
        assert_eq!(cli.sync.policy(), Policy::TwoWay);
    }

    #[test]
    fn one_way_down() {
        let cli = parse(&["-p", "/notes", "--one-way", "down"]);
        assert_eq!(cli.sync.policy(), Policy::Down);
    }

    #[test]
    fn short_flags_match_long_flags() {
        let cli = parse(&["-p", "/n", "-m", "*.md", "-f", "markdown", "-n", "Work", "-M", "-v"]);
        assert_eq!(cli.sync.mask.as_deref(), Some("*.md"));
        assert_eq!(cli.sync.format, Some(FormatArg::Markdown));
        assert_eq!(cli.sync.notebook.as_deref(), Some("Work"));
        assert!(cli.sync.merged);
        assert!(cli.verbose);
    }

    #[test]
    fn notebook_conflicts_with_all() {
        let result = Cli::try_parse_from(["notesync", "-p", "/n", "-n", "Work", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_format_is_rejected() {
        let result = Cli::try_parse_from(["notesync", "-p", "/n", "-f", "rtf"]);
        assert!(result.is_err());
    }

    #[test]
    fn subcommands_parse() {
        let cli = parse(&["init-store", "--store", "/srv/notes", "--token", "t"]);
        assert_eq!(cli.command, Some(Commands::InitStore));
        assert_eq!(cli.store, Some(PathBuf::from("/srv/notes")));

        let cli = parse(&["notebooks", "--json"]);
        assert_eq!(cli.command, Some(Commands::Notebooks { json: true }));
    }
}
