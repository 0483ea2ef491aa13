use clap::Parser;
use ratesync_server::cli::{dispatch, Cli};
use ratesync_server::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli.command, Config::from_env).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
