use crate::search::{download_transcript_from, sanitise_filename};

#[test]
fn test_sanitise_spaces() {
    assert_eq!(
        sanitise_filename("House of Assembly Tuesday 19 August 2025"),
        "House_of_Assembly_Tuesday_19_August_2025.txt"
    );
}

#[test]
fn test_sanitise_keeps_allowed_characters() {
    assert_eq!(
        sanitise_filename("estimates-2024.part_2"),
        "estimates-2024.part_2.txt"
    );
}

#[test]
fn test_sanitise_replaces_one_for_one() {
    // Every disallowed character becomes a single underscore; length is
    // preserved apart from the extension.
    let query = "a/b\\c:d \"e\"";
    let sanitised = sanitise_filename(query);
    assert_eq!(sanitised, "a_b_c_d__e_.txt");
    assert_eq!(
        sanitised.chars().count(),
        query.chars().count() + ".txt".len()
    );
}

#[test]
fn test_sanitise_non_ascii() {
    assert_eq!(sanitise_filename("séance café"), "s_ance_caf_.txt");
}

#[test]
fn test_sanitise_output_charset() {
    let queries = [
        "House of Assembly Tuesday 19 August 2025",
        "question time?!",
        "<script>alert('x')</script>",
        "日本語のクエリ",
    ];
    for query in queries {
        let sanitised = sanitise_filename(query);
        assert!(
            sanitised.ends_with(".txt"),
            "expected .txt suffix: {}",
            sanitised
        );
        assert!(
            sanitised
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')),
            "unexpected character in filename: {}",
            sanitised
        );
    }
}

// Browser end-to-end: a page without any of the candidate search inputs must
// fail with the selector diagnostic and leave the download directory empty.
// Needs a local Chromium, so it only runs when asked for by name.
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires a local Chromium install"]
async fn test_search_input_not_found() {
    let download_dir = tempfile::tempdir().unwrap();
    let page = "data:text/html,<html><body><p>no search form here</p></body></html>";

    let result = download_transcript_from(page, "missing input", download_dir.path()).await;

    let error = result.expect_err("expected the selector fallback to be exhausted");
    assert!(
        error.to_string().contains("search input not found"),
        "unexpected error: {:#}",
        error
    );
    assert_eq!(
        std::fs::read_dir(download_dir.path()).unwrap().count(),
        0,
        "no file should be written on failure"
    );
}
