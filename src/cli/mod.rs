pub mod api_client;
mod commands;
pub mod error;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::PageParams;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Self-hosted DSE portfolio tracker", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: FOLIO_API_URL env or http://localhost:3737)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server (REST API + WebSocket + embedded frontend)
    Api {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value = "3737")]
        port: u16,

        /// Database file path (defaults to XDG data directory: ~/.local/share/folio/folio.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Broker API key (default: DSE_API_KEY env)
        #[arg(long)]
        api_key: Option<String>,

        /// Serve interactive API docs at /docs
        #[arg(long)]
        docs: bool,
    },
    /// Broker sync commands
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
    /// Account commands
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Activity commands
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
}

#[derive(Subcommand)]
enum SyncCommands {
    /// Start a broker sync run
    Run,
    /// Show the status of the most recent sync run
    Status,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// List synced accounts
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List an account's open positions
    Positions {
        /// Broker account id
        account_id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// List an account's activities
    List {
        /// Broker account id
        account_id: String,
        /// Maximum number of items to return
        #[arg(long)]
        limit: Option<u32>,
        /// Number of items to skip
        #[arg(long)]
        offset: Option<u32>,
        /// Field to sort by (trade_date, settlement_date, activity_type, amount)
        #[arg(long)]
        sort: Option<String>,
        /// Sort order (asc, desc)
        #[arg(long)]
        order: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    match cli.command {
        Some(Commands::Api {
            host,
            port,
            db,
            api_key,
            docs,
        }) => {
            commands::api::run(host, port, db, api_key, docs).await?;
        }
        Some(Commands::Sync { command }) => match command {
            SyncCommands::Run => {
                println!("{}", commands::sync::run(&api_client).await?);
            }
            SyncCommands::Status => {
                println!("{}", commands::sync::status(&api_client).await?);
            }
        },
        Some(Commands::Account { command }) => match command {
            AccountCommands::List { format } => {
                println!(
                    "{}",
                    commands::account::list_accounts(&api_client, &format).await?
                );
            }
            AccountCommands::Positions { account_id, format } => {
                println!(
                    "{}",
                    commands::account::list_positions(&api_client, &account_id, &format).await?
                );
            }
        },
        Some(Commands::Activity { command }) => match command {
            ActivityCommands::List {
                account_id,
                limit,
                offset,
                sort,
                order,
                format,
            } => {
                let page = PageParams {
                    limit,
                    offset,
                    sort: sort.as_deref(),
                    order: order.as_deref(),
                };
                println!(
                    "{}",
                    commands::activity::list_activities(&api_client, &account_id, page, &format)
                        .await?
                );
            }
        },
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["folio", "--help"]);
        }
    }

    Ok(())
}
