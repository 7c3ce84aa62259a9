//! Command-line interface definition.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deck")]
#[command(about = "Work with Nextcloud Deck boards, stacks and cards")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one operation and print its result envelope
    Exec {
        /// Resource kind: board, stack, card, label, comment, attachment
        resource: String,
        /// Operation tag, e.g. getAll, get, create, update, delete
        operation: String,
        /// Operation parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List boards as picker options
    Boards {
        /// Case-insensitive title filter
        #[arg(long)]
        filter: Option<String>,
    },
    /// List the stacks of a board as picker options
    Stacks {
        #[arg(long)]
        board: String,
        #[arg(long)]
        filter: Option<String>,
    },
    /// List the cards of a stack as picker options
    Cards {
        #[arg(long)]
        board: String,
        #[arg(long)]
        stack: String,
        #[arg(long)]
        filter: Option<String>,
    },
    /// List the labels of a board as picker options
    Labels {
        #[arg(long)]
        board: String,
        #[arg(long)]
        filter: Option<String>,
    },
    /// List assignable users as picker options
    Users {
        #[arg(long)]
        filter: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exec_defaults_to_empty_params() {
        let cli = Cli::parse_from(["deck", "exec", "board", "getAll"]);
        match cli.command {
            Commands::Exec {
                resource,
                operation,
                params,
            } => {
                assert_eq!(resource, "board");
                assert_eq!(operation, "getAll");
                assert_eq!(params, "{}");
            }
            _ => panic!("expected exec command"),
        }
    }
}
