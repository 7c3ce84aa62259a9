//! Command-line host for the Deck connector.
//!
//! Credentials come from `NEXTCLOUD_SERVER_URL`, `NEXTCLOUD_USERNAME`
//! and `NEXTCLOUD_PASSWORD`. Results are printed as pretty JSON on
//! stdout; logs go to stderr so output stays pipeable.

mod cli;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use nextcloud_deck::{
    dispatch_str, load_boards, load_cards, load_labels, load_stacks, load_users, DeckClient,
    DeckConfig, OptionItem, Params,
};

use cli::{Cli, Commands};

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("deck_cli=debug,nextcloud_deck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_options(options: Vec<OptionItem>) {
    let listing: Vec<Value> = options
        .into_iter()
        .map(|option| json!({ "name": option.name, "value": option.value }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&listing).unwrap_or_default());
}

async fn run(cli: Cli) -> nextcloud_deck::Result<()> {
    let client = DeckClient::new(DeckConfig::from_env()?);

    match cli.command {
        Commands::Exec {
            resource,
            operation,
            params,
        } => {
            let params = Params::from_value(serde_json::from_str(&params)?)?;
            let envelope = dispatch_str(&client, &resource, &operation, &params).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Boards { filter } => {
            print_options(load_boards(&client, filter.as_deref()).await);
        }
        Commands::Stacks { board, filter } => {
            let board = Value::String(board);
            print_options(load_stacks(&client, Some(&board), filter.as_deref()).await);
        }
        Commands::Cards {
            board,
            stack,
            filter,
        } => {
            let board = Value::String(board);
            let stack = Value::String(stack);
            print_options(load_cards(&client, Some(&board), Some(&stack), filter.as_deref()).await);
        }
        Commands::Labels { board, filter } => {
            let board = Value::String(board);
            print_options(load_labels(&client, Some(&board), filter.as_deref()).await);
        }
        Commands::Users { filter } => {
            print_options(load_users(&client, filter.as_deref()).await);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
