use anyhow::Result;
use chrono::NaiveDate;
use contribution_fetcher::fetch_txt_for_date;

fn main() -> Result<()> {
    // Get the date from command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Please provide a date as an argument");
        eprintln!("Usage: cargo run --bin fetch_contributions <YYYY-MM-DD>");
        eprintln!("Example: cargo run --bin fetch_contributions 2024-03-01");
        std::process::exit(1);
    }

    let date = &args[1];

    // Validate the date format before touching the network
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        eprintln!("Date must be in YYYY-MM-DD format (e.g., 2024-03-01)");
        std::process::exit(1);
    }

    let saved = fetch_txt_for_date(date)?;
    println!("\nDownloaded {} new file(s) for {}", saved.len(), date);

    Ok(())
}
