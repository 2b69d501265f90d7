use clap::Parser;
use trawl::cli::Args;
use trawl::error::CliError;
use trawl::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with result output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = args.execute().await {
        output::print_error(&e.to_string());
        if matches!(e, CliError::Target(_)) {
            eprintln!("Usage: trawl <TARGET> (e.g. 10.10.10.0/24); see --help");
        }
        std::process::exit(1);
    }
}
