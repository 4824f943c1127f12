use clap::Parser;
use sip::api::{Cli, Command, run_http_server, run_project_command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Project { args, json } => match run_project_command(args, json) {
            Ok(report) => print!("{report}"),
            Err(msg) => {
                tracing::error!("{msg}");
                std::process::exit(2);
            }
        },
    }
}
