//! The Writer: persisting [`Book`]s as CSV.
//!
//! A [`CsvWriter`] can wrap any [`std::io::Write`] sink, [`CsvWriter::create`] is the shortcut
//! for writing to a file on the filesystem.

use std::{fs::File, io, path::Path};

use log::{info, trace};

use crate::{book::Book, Error, ErrorKind};

/// The header row, in the order the columns are written.
pub const HEADER: [&str; 4] = ["title", "author", "first_publish_year", "edition_count"];

/// Writes [`Book`]s as CSV rows after a fixed [`HEADER`] row.
pub struct CsvWriter<W: io::Write> {
    inner: csv::Writer<W>,
}

impl CsvWriter<File> {
    /// Creates the file at `path`, truncating it if it already exists.
    ///
    /// # Errors
    /// An `Err` of kind [`ErrorKind::Write`] is returned when the file cannot be created, for
    /// example when the parent directory does not exist or permission is denied.
    ///
    /// # Examples
    /// ```no_run
    /// use booksift::output::CsvWriter;
    ///
    /// fn main() -> Result<(), booksift::Error> {
    ///     let writer = CsvWriter::create("books.csv")?;
    ///     writer.write_books(&[])?;
    ///     Ok(())
    /// }
    /// ```
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        trace!("Creating '{}'", path.display());
        File::create(path)
            .map(Self::from_writer)
            .map_err(|e| {
                Error::wrap_with(
                    ErrorKind::Write,
                    format!("Cannot create the '{}' file", path.display()),
                    e,
                )
            })
    }
}

impl<W: io::Write> CsvWriter<W> {
    /// Wraps an existing sink.
    pub fn from_writer(writer: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { inner }
    }

    /// Writes the header row followed by one row per book, in order, and flushes the sink.
    ///
    /// The header is written even when `books` is empty. A failure part way through leaves the
    /// rows written so far in the sink.
    ///
    /// # Errors
    /// An `Err` of kind [`ErrorKind::Write`] is returned when the sink cannot be written to.
    pub fn write_books(mut self, books: &[Book]) -> Result<W, Error> {
        let wrap = |e: csv::Error| Error::wrap(ErrorKind::Write, e);

        self.inner.write_record(HEADER).map_err(wrap)?;
        for book in books {
            self.inner.serialize(book).map_err(wrap)?;
        }

        let writer = self
            .inner
            .into_inner()
            .map_err(|e| Error::wrap(ErrorKind::Write, e.into_error()))?;

        info!("Wrote {} books", books.len());
        Ok(writer)
    }
}
