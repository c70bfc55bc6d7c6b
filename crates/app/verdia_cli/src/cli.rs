use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "verdia", about = "Verdia plant marketplace client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session.
    Login {
        email: String,
        password: String,
    },
    /// Drop the persisted session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Browse the product catalog.
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    /// Inspect or modify the cart.
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// List your orders.
    Orders,
    /// Chat with sellers.
    Chat {
        #[command(subcommand)]
        command: ChatCommand,
    },
    /// Print the version.
    Version,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all products.
    List,
    /// Show one product.
    Get { id: String },
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents.
    Show,
    /// Add a product to the cart.
    Add {
        product_id: String,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },
}

#[derive(Subcommand)]
pub enum ChatCommand {
    /// List your conversations.
    Conversations,
    /// Follow a conversation live.
    Watch { conversation_id: String },
}
