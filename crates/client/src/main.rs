//! `summarise` command line client
//!
//! Fetches, summarises and saves one blog through a running gateway, then
//! prints the English summary, the Urdu summary and the full text.

use blogsum_client::{BlogClient, Summariser, SummaryView};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise a blog with an Urdu translation and save the result", long_about = None)]
struct Cli {
    /// Blog URL to summarise
    #[arg(required = true)]
    url: String,

    /// Gateway base URL
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let summariser = Summariser::new(BlogClient::new(&cli.server)?);

    match summariser.summarise(&cli.url).await {
        Ok(view) if cli.json => println!("{}", serde_json::to_string_pretty(&view)?),
        Ok(view) => print_view(&view),
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_view(view: &SummaryView) {
    println!("English Summary");
    println!("  {}", view.summary);
    println!();
    println!("اردو خلاصہ");
    println!("  {}", view.urdu_summary);
    println!();
    println!("Full Blog Text");
    println!("  {}", view.full_text);
    println!();
    println!("Summary generated and saved!");
}
