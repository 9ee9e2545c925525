//! Storefront CLI - drive the session cart and delivery location from a shell.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "storefront-cli",
    version,
    about = "Storefront cart and location toolkit"
)]
struct Cli {
    #[command(flatten)]
    connection: storefront_cmd::Connection,

    #[command(subcommand)]
    command: storefront_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    storefront_cmd::run(cli.connection, cli.command).await
}
