//! Records as returned by the search API and the normalized [`Book`] built from them.

use log::{debug, trace};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";

/// An unvalidated search result.
///
/// Every field is optional. A key that is present but holds a value of the wrong JSON type is
/// treated the same as a missing key, so a single odd record never fails the whole response.
/// Integer fields also accept whole-number floats such as `2005.0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Title of the work.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Authors of the work, in the order the API lists them.
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<Vec<String>>,
    /// Year the work was first published.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub first_publish_year: Option<i64>,
    /// Number of known editions, kept as given even when negative.
    #[serde(default, deserialize_with = "lenient_integer")]
    pub edition_count: Option<i64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// Floats beyond this can no longer represent every whole number exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Number(number) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
            .map(|f| f as i64)
    }))
}

impl RawRecord {
    /// Normalize this record into a [`Book`], or `None` when there is no first publish year.
    #[must_use]
    pub fn into_book(self) -> Option<Book> {
        let Self {
            title,
            author_name,
            first_publish_year,
            edition_count,
        } = self;

        Some(Book {
            first_publish_year: first_publish_year?,
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            author: author_name.map_or_else(|| NOT_AVAILABLE.to_owned(), |names| names.join(", ")),
            edition_count: edition_count.unwrap_or_default(),
        })
    }
}

/// A normalized record ready to be written out.
///
/// The field order is the column order of the CSV output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    first_publish_year: i64,
    edition_count: i64,
}

impl Book {
    /// Title, or "N/A" when the record had none.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Authors joined with ", ", or "N/A" when the record had none.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Year the work was first published, always after the threshold it was filtered with.
    #[must_use]
    pub const fn first_publish_year(&self) -> i64 {
        self.first_publish_year
    }

    /// Number of known editions, 0 when the record had none.
    #[must_use]
    pub const fn edition_count(&self) -> i64 {
        self.edition_count
    }
}

/// Keep the records first published after `year_threshold`, at most `max_books` of them, sorted
/// by first publish year.
///
/// Records are taken in the order given and accumulation stops as soon as `max_books` books have
/// been kept, so the result is the first qualifying records in input order rather than the
/// oldest ones. The final sort is stable: books sharing a year keep their input order.
#[must_use]
pub fn filter_books<I>(records: I, year_threshold: i64, max_books: usize) -> Vec<Book>
where
    I: IntoIterator<Item = RawRecord>,
{
    trace!("Filtering records first published after {year_threshold}");
    let mut books = Vec::new();

    for record in records {
        if books.len() >= max_books {
            debug!("Reached {max_books} books - remaining records are not evaluated");
            break;
        }

        match record.first_publish_year {
            Some(year) if year > year_threshold => books.extend(record.into_book()),
            Some(year) => trace!("Skipping {:?} first published in {year}", record.title),
            None => trace!("Skipping {:?} without a first publish year", record.title),
        }
    }

    books.sort_by_key(Book::first_publish_year);
    books
}

#[cfg(test)]
mod tests {
    use super::{filter_books, Book, RawRecord};

    use proptest::prelude::*;

    fn records(json: &str) -> Vec<RawRecord> {
        serde_json::from_str(json).expect("test json is a valid array of records")
    }

    fn dated(year: i64) -> RawRecord {
        RawRecord {
            title: Some(format!("Book of {year}")),
            first_publish_year: Some(year),
            ..RawRecord::default()
        }
    }

    #[test]
    fn year_at_or_below_threshold_is_excluded() {
        let input = records(r#"[{"first_publish_year": 1995}, {"first_publish_year": 2000}]"#);

        assert!(filter_books(input, 2000, 50).is_empty());
    }

    #[test]
    fn complete_record_is_normalized() {
        let input = records(
            r#"[{"title":"A","first_publish_year":2001,"author_name":["X","Y"],"edition_count":3}]"#,
        );

        let books = filter_books(input, 2000, 50);

        assert_eq!(1, books.len());
        let book = &books[0];
        assert_eq!("A", book.title());
        assert_eq!("X, Y", book.author());
        assert_eq!(2001, book.first_publish_year());
        assert_eq!(3, book.edition_count());
    }

    #[test]
    fn cap_keeps_first_records_in_input_order_then_sorts() {
        // 60 qualifying records with distinct years, newest first.
        let input: Vec<_> = (0..60).rev().map(|i| dated(2001 + i)).collect();

        let books = filter_books(input, 2000, 50);

        let years: Vec<_> = books.iter().map(Book::first_publish_year).collect();
        let expected: Vec<_> = (10..60).map(|i| 2001 + i).collect();
        assert_eq!(expected, years);
    }

    #[test]
    fn record_without_year_is_excluded() {
        let input = records(
            r#"[{"title":"No year","author_name":["X"],"edition_count":100}, {"first_publish_year": null}]"#,
        );

        assert!(filter_books(input, 2000, 50).is_empty());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let input = records(r#"[{"first_publish_year": 2005}]"#);

        let books = filter_books(input, 2000, 50);

        assert_eq!("N/A", books[0].title());
        assert_eq!("N/A", books[0].author());
        assert_eq!(0, books[0].edition_count());
    }

    #[test]
    fn empty_author_list_joins_to_empty_string() {
        let input = records(r#"[{"first_publish_year": 2005, "author_name": []}]"#);

        assert_eq!("", filter_books(input, 2000, 50)[0].author());
    }

    #[test]
    fn fields_of_the_wrong_type_are_treated_as_missing() {
        let input = records(
            r#"[
                {"title": 42, "author_name": "Solo", "first_publish_year": 2003, "edition_count": "many"},
                {"title": "String year", "first_publish_year": "2004"}
            ]"#,
        );

        let books = filter_books(input, 2000, 50);

        assert_eq!(1, books.len());
        assert_eq!("N/A", books[0].title());
        assert_eq!("N/A", books[0].author());
        assert_eq!(0, books[0].edition_count());
    }

    #[test]
    fn whole_number_floats_are_accepted_as_integers() {
        let input = records(
            r#"[
                {"title": "Float year", "first_publish_year": 2005.0, "edition_count": 4.0},
                {"title": "Fractional year", "first_publish_year": 2006.5},
                {"title": "Huge year", "first_publish_year": 1e300}
            ]"#,
        );

        let books = filter_books(input, 2000, 50);

        assert_eq!(1, books.len());
        assert_eq!("Float year", books[0].title());
        assert_eq!(2005, books[0].first_publish_year());
        assert_eq!(4, books[0].edition_count());
    }

    #[test]
    fn negative_edition_count_is_kept() {
        let input = records(r#"[{"first_publish_year": 2005, "edition_count": -2}]"#);

        assert_eq!(-2, filter_books(input, 2000, 50)[0].edition_count());
    }

    #[test]
    fn books_sharing_a_year_keep_input_order() {
        let input = records(
            r#"[
                {"title": "late", "first_publish_year": 2010},
                {"title": "first", "first_publish_year": 2005},
                {"title": "second", "first_publish_year": 2005}
            ]"#,
        );

        let titles: Vec<_> = filter_books(input, 2000, 50)
            .iter()
            .map(|b| b.title().to_owned())
            .collect();

        assert_eq!(vec!["first", "second", "late"], titles);
    }

    #[test]
    fn zero_cap_yields_nothing() {
        assert!(filter_books(vec![dated(2020)], 2000, 0).is_empty());
    }

    #[test]
    fn non_qualifying_records_do_not_count_towards_the_cap() {
        let input = vec![dated(1990), dated(2002), dated(1980), dated(2001), dated(2003)];

        let years: Vec<_> = filter_books(input, 2000, 2)
            .iter()
            .map(Book::first_publish_year)
            .collect();

        assert_eq!(vec![2001, 2002], years);
    }

    fn arb_record() -> impl Strategy<Value = RawRecord> {
        (
            prop::option::of("[a-z ]{0,12}"),
            prop::option::of(prop::collection::vec("[A-Z][a-z]{0,6}", 0..3)),
            prop::option::of(1900_i64..2100),
            prop::option::of(-5_i64..500),
        )
            .prop_map(
                |(title, author_name, first_publish_year, edition_count)| RawRecord {
                    title,
                    author_name,
                    first_publish_year,
                    edition_count,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_output_satisfies_threshold_cap_and_order(
            input in prop::collection::vec(arb_record(), 0..120),
            threshold in 1950_i64..2050,
            max in 0_usize..80,
        ) {
            let books = filter_books(input, threshold, max);

            prop_assert!(books.len() <= max);
            prop_assert!(books.iter().all(|b| b.first_publish_year() > threshold));
            prop_assert!(books
                .windows(2)
                .all(|w| w[0].first_publish_year() <= w[1].first_publish_year()));
        }

        #[test]
        fn prop_output_is_first_qualifying_records_stably_sorted(
            input in prop::collection::vec(arb_record(), 0..120),
            threshold in 1950_i64..2050,
            max in 0_usize..80,
        ) {
            let mut expected: Vec<Book> = input
                .iter()
                .cloned()
                .filter(|r| r.first_publish_year.map_or(false, |y| y > threshold))
                .take(max)
                .filter_map(RawRecord::into_book)
                .collect();
            expected.sort_by_key(Book::first_publish_year);

            prop_assert_eq!(expected, filter_books(input, threshold, max));
        }

        #[test]
        fn prop_filtering_is_deterministic(
            input in prop::collection::vec(arb_record(), 0..60),
            threshold in 1950_i64..2050,
            max in 0_usize..80,
        ) {
            prop_assert_eq!(
                filter_books(input.clone(), threshold, max),
                filter_books(input, threshold, max)
            );
        }
    }
}
