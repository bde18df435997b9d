use anyhow::Result;
use transcript_search::download_transcript;

#[tokio::main]
async fn main() -> Result<()> {
    // Get the search query from command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Please provide a search query as an argument");
        eprintln!("Usage: cargo run --bin download_transcript <SEARCH QUERY>");
        eprintln!("Example: cargo run --bin download_transcript \"House of Assembly Tuesday 19 August 2025\"");
        std::process::exit(1);
    }

    download_transcript(&args[1]).await?;

    Ok(())
}
