//! swagger-prune CLI binary

use anyhow::Result;

use swagger_prune::cli::CliApp;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = CliApp::app().get_matches();

    // Initialize logging
    let default_filter = match matches.get_count("verbose") {
        0 => "swagger_prune=info,swagger_transform=info",
        _ => "swagger_prune=debug,swagger_transform=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the CLI application
    CliApp::run(&matches)
}
