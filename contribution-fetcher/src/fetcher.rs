use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Contributions search endpoint; takes startDate/endDate query parameters.
pub const SEARCH_URL: &str = "https://hansard.parliament.uk/search/Contributions";

/// Root of the per-date output directories.
pub const OUTPUT_ROOT: &str = "data";

/// Used when a link's URL path has no final segment to name the file after.
const FALLBACK_FILENAME: &str = "download.txt";

/// Collect the absolute URLs of every text-file link on a results page.
/// Hrefs resolve against `base`; duplicate anchors pointing at the same
/// target collapse to a single entry. Order is not significant.
pub fn collect_txt_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let href = match anchor.value().attr("href") {
            Some(href) if href.contains(".txt") => href,
            _ => continue,
        };
        // Anchors with unresolvable hrefs are skipped rather than fatal.
        if let Ok(resolved) = base.join(href) {
            if seen.insert(resolved.to_string()) {
                links.push(resolved);
            }
        }
    }

    links
}

/// Derive the local filename from a link's URL path.
pub fn filename_for(link: &Url) -> String {
    let name = Path::new(link.path())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    }
}

/// Download all contribution text files for a given date (`YYYY-MM-DD`)
/// into `data/<date>/`, skipping files already present. Returns the paths
/// written by this run.
pub fn fetch_txt_for_date(date: &str) -> Result<Vec<PathBuf>> {
    fetch_txt_for_date_into(SEARCH_URL, date, Path::new(OUTPUT_ROOT))
}

/// Run the fetch against an explicit search endpoint and output root.
pub fn fetch_txt_for_date_into(
    search_url: &str,
    date: &str,
    output_root: &Path,
) -> Result<Vec<PathBuf>> {
    let base = Url::parse(search_url)
        .with_context(|| format!("Invalid search endpoint: {}", search_url))?;
    let client = Client::new();

    println!("Searching contributions for {}...", date);
    let response = client
        .get(base.clone())
        .query(&[("startDate", date), ("endDate", date)])
        .send()
        .context("Failed to send search request")?
        .error_for_status()
        .context("Search request failed")?;
    let html = response.text().context("Failed to read search response")?;

    let links = collect_txt_links(&html, &base);
    println!("Found {} transcript link(s) for {}", links.len(), date);

    let output_dir = output_root.join(date);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut saved = Vec::new();

    for link in links {
        let filepath = output_dir.join(filename_for(&link));
        if filepath.exists() {
            println!("Skipping {} (already downloaded)", filepath.display());
            continue;
        }

        let file_response = client
            .get(link.clone())
            .send()
            .with_context(|| format!("Failed to fetch {}", link))?
            .error_for_status()
            .with_context(|| format!("Download failed for {}", link))?;
        let bytes = file_response
            .bytes()
            .with_context(|| format!("Failed to read {}", link))?;

        fs::write(&filepath, &bytes)
            .with_context(|| format!("Failed to write {}", filepath.display()))?;
        println!("Saved {}", filepath.display());
        saved.push(filepath);
    }

    Ok(saved)
}
