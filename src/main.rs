use clap::Parser;
use financecalc::cli::{Cli, Command, render_report, simulate};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = financecalc::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Report(args) => match render_report(&args) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        Command::Simulate(args) => {
            if let Err(e) = simulate(&args).await {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        }
    }
}
