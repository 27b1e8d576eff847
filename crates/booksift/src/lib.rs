#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # booksift
//!
//! booksift searches the Open Library API, keeps the books first published after a given year
//! and writes them to a CSV file.
//!
//! The pipeline is three steps run once, in order:
//! - [`api::fetch_records`] performs a single search request,
//! - [`book::filter_books`] filters, normalizes, caps and sorts the records,
//! - [`output::CsvWriter`] writes the result.
//!
//! [`run`] performs all three with a [`Config`].

pub mod api;
pub mod book;
mod config;
mod error;
pub mod output;

use book::{filter_books, Book};
pub use config::Config;
pub use error::{Error, ErrorKind};

use api::Client;
use log::trace;
use output::CsvWriter;

/// Fetch the search results and keep the books first published after the configured year.
///
/// # Errors
///
/// An `Err` of kind [`ErrorKind::Fetch`] is returned when the search request fails.
#[inline]
pub fn books_after(config: &Config) -> Result<Vec<Book>, Error> {
    books_after_with::<reqwest::blocking::Client>(config)
}

/// Run the whole pipeline and return the number of books written to [`Config::output`].
///
/// Nothing is written when the search request fails.
///
/// # Errors
///
/// An `Err` of kind [`ErrorKind::Fetch`] is returned when the search request fails.
/// An `Err` of kind [`ErrorKind::Write`] is returned when the output file cannot be created or
/// written, in which case a partially written file may be left behind.
#[inline]
pub fn run(config: &Config) -> Result<usize, Error> {
    run_with::<reqwest::blocking::Client>(config)
}

fn books_after_with<C: Client>(config: &Config) -> Result<Vec<Book>, Error> {
    let records = api::open_library::get_records::<C>(config)?;
    let books = filter_books(records, config.year_threshold, config.max_books);
    trace!("{} books first published after {}", books.len(), config.year_threshold);
    Ok(books)
}

fn run_with<C: Client>(config: &Config) -> Result<usize, Error> {
    let books = books_after_with::<C>(config)?;
    trace!("Writing books to '{}'", config.output.display());
    CsvWriter::create(&config.output)?.write_books(&books)?;
    Ok(books.len())
}
