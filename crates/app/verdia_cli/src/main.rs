// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use std::sync::Arc;

use clap::Parser;
use cli::{CartCommand, ChatCommand, Cli, Commands, ProductsCommand};
use verdia_client::realtime::{ChatChannel, MessageLog};
use verdia_client::{ApiClient, ClientConfig};
use verdia_core::session::{FileStore, SessionStore};

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();
    let config = ClientConfig::from_env();
    let store = Arc::new(FileStore::new()?);
    let client = ApiClient::new(&config, store as Arc<dyn SessionStore>).on_session_expired(|| {
        log::warn!("session expired — run `verdia login` to sign in again");
    });

    match &args.command {
        Commands::Login { email, password } => {
            let user = client.login(email, password).await?;
            println!("signed in as {} ({})", user.name, user.role);
        }
        Commands::Logout => {
            client.logout()?;
            println!("signed out");
        }
        Commands::Whoami => match client.current_user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
            None => println!("not signed in"),
        },
        Commands::Products { command } => match command {
            ProductsCommand::List => {
                for product in client.products().await? {
                    println!("{}  {}  {:.2}", product.id, product.name, product.price);
                }
            }
            ProductsCommand::Get { id } => {
                let product = client.product(id).await?;
                println!("{}", serde_json::to_string_pretty(&product)?);
            }
        },
        Commands::Cart { command } => match command {
            CartCommand::Show => {
                for item in client.cart().await? {
                    println!("{} x{}", item.product_id, item.quantity);
                }
            }
            CartCommand::Add {
                product_id,
                quantity,
            } => {
                client.add_to_cart(product_id, *quantity).await?;
                println!("added {product_id} x{quantity}");
            }
        },
        Commands::Orders => {
            for order in client.orders().await? {
                println!("{}  {}  {:.2}", order.id, order.status, order.total);
            }
        }
        Commands::Chat { command } => match command {
            ChatCommand::Conversations => {
                for conversation in client.conversations().await? {
                    println!(
                        "{}  [{}]",
                        conversation.id,
                        conversation.participant_ids.join(", ")
                    );
                }
            }
            ChatCommand::Watch { conversation_id } => {
                watch_conversation(&client, &config, conversation_id).await?;
            }
        },
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Print history, then follow pushed messages until the channel closes.
async fn watch_conversation(
    client: &ApiClient,
    config: &ClientConfig,
    conversation_id: &str,
) -> Result<()> {
    let history = client.messages(conversation_id).await?;
    let mut log = MessageLog::from_history(history);
    for message in log.messages() {
        println!("[{}] {}: {}", message.created_at, message.sender_id, message.text);
    }

    let mut channel = ChatChannel::connect(&config.ws_url)
        .await
        .map_err(|e| Error::Custom(e.to_string()))?;
    channel
        .join(conversation_id)
        .map_err(|e| Error::Custom(e.to_string()))?;

    while let Some(message) = channel.next_message().await {
        // Redeliveries are dropped, late arrivals still print.
        if log.insert(message.clone()) {
            println!("[{}] {}: {}", message.created_at, message.sender_id, message.text);
        }
    }
    Ok(())
}
