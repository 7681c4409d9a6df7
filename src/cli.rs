// src/cli.rs

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mindtick",
    version,
    about = "mindtick - tagged one-line notes for the command line",
    long_about = "mindtick keeps short tagged notes (wins, notes, fixes, tasks...) in a store.mindtick file next to your project. Commands look for the store in the current directory and its parents."
)]
pub struct Cli {
    /// Print debug logs to stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable ANSI colors in the output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates a new store.mindtick file in the current directory.
    New,

    /// Deletes the nearest store.mindtick file.
    Delete {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Displays messages, optionally filtered by tag and/or time range.
    #[command(verbatim_doc_comment)]
    View {
        /// At most one tag and one range, in any order.
        /// Examples:
        ///   mindtick view
        ///   mindtick view task
        ///   mindtick view yesterday task
        #[arg(value_name = "FILTER")]
        filters: Vec<String>,
    },

    /// Lists the available tags.
    Tags,

    /// Lists the available time ranges.
    Ranges,

    /// Adds a win message, e.g. `mindtick win -shipped the release`.
    Win(MessageArgs),
    /// Adds a note message.
    Note(MessageArgs),
    /// Adds a fix message.
    Fix(MessageArgs),
    /// Adds a task message.
    Task(MessageArgs),
    /// Adds a url message.
    Url(MessageArgs),
    /// Adds a work message.
    Work(MessageArgs),
}

#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Message text; the first word must start with the message prefix (default `-`).
    #[arg(
        value_name = "MESSAGE",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub words: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_words_keep_leading_prefix() {
        let cli = Cli::try_parse_from(["mindtick", "win", "-deployed", "to", "prod"]).unwrap();
        match cli.command {
            Commands::Win(args) => assert_eq!(args.words, vec!["-deployed", "to", "prod"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn view_accepts_two_filters() {
        let cli = Cli::try_parse_from(["mindtick", "view", "yesterday", "task"]).unwrap();
        match cli.command {
            Commands::View { filters } => assert_eq!(filters, vec!["yesterday", "task"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["mindtick", "view", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::View { .. }));
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
