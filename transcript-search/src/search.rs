use anyhow::{bail, Context, Result};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hansard advanced search page for the House of Assembly.
pub const SEARCH_URL: &str = "https://search.parliament.tas.gov.au/adv/hahansard";

/// Directory the saved transcripts land in, relative to the working directory.
pub const DOWNLOAD_DIR: &str = "transcripts";

/// Candidate selectors for the search input, site-specific first, generic
/// fallbacks after. The page markup has changed before; each candidate gets
/// its own bounded wait.
pub const SEARCH_INPUT_SELECTORS: &[&str] = &[
    "#full-query",
    "input[name='q[full-query]']",
    "input[name='q-full-query']",
    "input[name='q']",
    "input[name='Query']",
    "input[type='search']",
    "#search",
];

const SELECTOR_WAIT: Duration = Duration::from_secs(10);
const RESULT_WAIT: Duration = Duration::from_secs(15);
const DOWNLOAD_WAIT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Return a safe filename derived from the search query.
pub fn sanitise_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.txt", safe)
}

/// Search the Hansard site for `query` and save the transcript under
/// `transcripts/`, named after the query. Returns the saved path.
pub async fn download_transcript(query: &str) -> Result<PathBuf> {
    download_transcript_from(SEARCH_URL, query, Path::new(DOWNLOAD_DIR)).await
}

/// Run the search against an explicit search page URL and download directory.
pub async fn download_transcript_from(
    search_url: &str,
    query: &str,
    download_dir: &Path,
) -> Result<PathBuf> {
    let output_path = download_dir.join(sanitise_filename(query));
    fs::create_dir_all(download_dir).with_context(|| {
        format!("Failed to create download directory: {}", download_dir.display())
    })?;

    let config = BrowserConfig::builder()
        .no_sandbox()
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to configure browser: {}", e))?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    // Drain CDP events for the lifetime of the run.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = run_search(&browser, search_url, query, &output_path).await;

    // Release the browser whether the search succeeded or not.
    browser.close().await.ok();
    let _ = handler_task.await;

    let saved = result?;
    println!("Saved to {}", saved.display());
    Ok(saved)
}

async fn run_search(
    browser: &Browser,
    search_url: &str,
    query: &str,
    output_path: &Path,
) -> Result<PathBuf> {
    let page = browser
        .new_page("about:blank")
        .await
        .context("Failed to open a browser page")?;

    println!("Navigating to {}...", search_url);
    page.goto(search_url)
        .await
        .with_context(|| format!("Failed to load {}", search_url))?;

    let input = find_search_input(&page).await?;
    input.click().await.context("Failed to focus the search input")?;
    input
        .type_str(query)
        .await
        .context("Failed to enter the search query")?;

    // Submit with Enter; the page has no reliable submit button.
    input
        .press_key("Enter")
        .await
        .context("Failed to submit the search")?;

    let link = find_txt_link(&page).await?;

    // Chromium writes downloads where Browser.setDownloadBehavior points it,
    // under the server's filename. Stage the download in a scratch directory
    // and copy the bytes to the query-derived path.
    let staging = tempfile::tempdir().context("Failed to create download staging directory")?;
    let behavior = SetDownloadBehaviorParams::builder()
        .behavior(SetDownloadBehaviorBehavior::Allow)
        .download_path(staging.path().to_string_lossy().to_string())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build download settings: {}", e))?;
    page.execute(behavior)
        .await
        .context("Failed to enable downloads")?;

    link.click().await.context("Failed to click the download link")?;
    let downloaded = wait_for_download(staging.path()).await?;

    let bytes = fs::read(&downloaded)
        .with_context(|| format!("Failed to read downloaded file: {}", downloaded.display()))?;
    fs::write(output_path, bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(output_path.to_path_buf())
}

/// Try each candidate selector in order, giving each its own wait window.
async fn find_search_input(page: &Page) -> Result<Element> {
    for selector in SEARCH_INPUT_SELECTORS {
        if let Some(input) = wait_for_element(page, selector, SELECTOR_WAIT).await {
            return Ok(input);
        }
    }
    bail!("search input not found; update selectors");
}

/// Poll for a selector until it appears or the wait window elapses.
async fn wait_for_element(page: &Page, selector: &str, wait: Duration) -> Option<Element> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Some(element);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for a results link whose visible text mentions TXT.
async fn find_txt_link(page: &Page) -> Result<Element> {
    let deadline = tokio::time::Instant::now() + RESULT_WAIT;
    loop {
        if let Ok(anchors) = page.find_elements("a").await {
            for anchor in anchors {
                if let Ok(Some(text)) = anchor.inner_text().await {
                    if text.contains("TXT") {
                        return Ok(anchor);
                    }
                }
            }
        }
        if tokio::time::Instant::now() >= deadline {
            bail!("timed out waiting for a TXT download link");
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for Chromium to finish writing into the staging directory.
/// In-progress downloads carry a `.crdownload` suffix until complete.
async fn wait_for_download(dir: &Path) -> Result<PathBuf> {
    let deadline = tokio::time::Instant::now() + DOWNLOAD_WAIT;
    loop {
        let mut in_progress = false;
        let mut finished = None;
        for entry in fs::read_dir(dir).context("Failed to read download staging directory")? {
            let path = entry
                .context("Failed to read download staging directory")?
                .path();
            if path.extension().map_or(false, |ext| ext == "crdownload") {
                in_progress = true;
            } else if path.is_file() {
                finished = Some(path);
            }
        }
        if !in_progress {
            if let Some(path) = finished {
                return Ok(path);
            }
        }
        if tokio::time::Instant::now() >= deadline {
            bail!("timed out waiting for the transcript download");
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
