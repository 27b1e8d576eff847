//! Fixed settings for a pipeline run.

use std::{path::PathBuf, time::Duration};

const SEARCH_URL: &str = "https://openlibrary.org/search.json";
const QUERY: &str = "python";
const PAGE_LIMIT: u32 = 100;
const MAX_BOOKS: usize = 50;
const YEAR_THRESHOLD: i64 = 2000;
const OUTPUT_FILE: &str = "books_after_2000.csv";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Everything a pipeline run needs to know, passed explicitly to each step.
///
/// The [`Default`] value is the configuration the `booksift` binary runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The search endpoint the single GET request is sent to.
    pub search_url: String,
    /// Value of the `q` query parameter.
    pub query: String,
    /// Value of the `limit` query parameter, the size of the single page requested.
    pub page_limit: u32,
    /// The most books kept, applied while accumulating in response order.
    pub max_books: usize,
    /// Only books first published strictly after this year are kept.
    pub year_threshold: i64,
    /// Where the CSV file is written.
    pub output: PathBuf,
    /// Timeout applied to the whole request.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.to_owned(),
            query: QUERY.to_owned(),
            page_limit: PAGE_LIMIT,
            max_books: MAX_BOOKS,
            year_threshold: YEAR_THRESHOLD,
            output: PathBuf::from(OUTPUT_FILE),
            timeout: TIMEOUT,
        }
    }
}

#[test]
fn default_config_matches_open_library_search() {
    let config = Config::default();

    assert_eq!("https://openlibrary.org/search.json", config.search_url);
    assert_eq!("python", config.query);
    assert_eq!(100, config.page_limit);
    assert_eq!(50, config.max_books);
    assert_eq!(2000, config.year_threshold);
    assert_eq!(PathBuf::from("books_after_2000.csv"), config.output);
    assert_eq!(Duration::from_secs(10), config.timeout);
}
