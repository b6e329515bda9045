// ABOUTME: CLI binary for the Glimpse preview engine.
// ABOUTME: Renders a single URL in a headless browser and prints the extracted preview.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use glimpse_preview::{BrowserSession, Client};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(about = "Generate a link preview for a URL")]
struct Args {
    /// URL to preview
    #[arg(long = "url")]
    url: String,

    /// Output the preview as JSON instead of text
    #[arg(long = "json")]
    json: bool,

    /// Per-render deadline in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Reject bad input before paying for a browser launch.
    if url::Url::parse(&args.url).is_err() {
        eprintln!("error: invalid url: {}", args.url);
        return ExitCode::from(1);
    }

    let session = match BrowserSession::open().await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            eprintln!("error: failed to open browser session: {}", e);
            return ExitCode::from(1);
        }
    };

    let client = Client::builder()
        .session(session.clone())
        .timeout(Duration::from_secs(args.timeout))
        .build();

    let result = client.build(&args.url).await;
    session.close().await;

    match result {
        Ok(preview) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&preview).unwrap());
            } else {
                println!("{}", preview);
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_not_found() => {
            eprintln!("no preview available for {}", args.url);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
