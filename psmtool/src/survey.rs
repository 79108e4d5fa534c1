//! Reading survey exports.
//!
//! A survey export is a CSV file with a header row. Its columns come in
//! consecutive blocks of four, one block per product, each ordered
//! too cheap, cheap, expensive, too expensive. Every data row is one
//! respondent.

use psm_core::models::{Question, ResponseSet, ResponseSetError};
use std::io::Read;
use tracing::{Level, event};

/// The answers to one product's four questions
#[derive(Debug)]
pub struct ProductBlock {
    /// The product's display name, `Product <n>` counting from 1
    pub name: String,
    /// The header of each of the block's columns, in question order
    pub headers: [String; 4],
    /// The validated answers
    pub responses: ResponseSet,
}

/// Reads every complete four-column product block of a CSV survey export.
///
/// Trailing columns that do not fill a block are ignored with a warning.
pub fn read_survey<R: Read>(reader: R) -> Result<Vec<ProductBlock>, SurveyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.len() < Question::ALL.len() {
        return Err(SurveyError::TooFewColumns(headers.len()));
    }

    let products = headers.len() / Question::ALL.len();
    let used = products * Question::ALL.len();
    if used < headers.len() {
        event!(
            Level::WARN,
            ignored = headers.len() - used,
            "trailing columns do not form a complete product block"
        );
    }

    let mut columns = vec![Vec::new(); used];
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        for (index, column) in columns.iter_mut().enumerate() {
            let cell = &record[index];
            let value = cell.parse::<f64>().map_err(|_| SurveyError::Cell {
                line,
                column: headers[index].to_owned(),
                value: cell.to_owned(),
            })?;
            column.push(value);
        }
    }

    event!(Level::DEBUG, products, columns = used, "survey read");

    let mut columns = columns.into_iter();
    (1..=products)
        .map(|n| -> Result<ProductBlock, SurveyError> {
            let name = format!("Product {n}");
            let offset = (n - 1) * Question::ALL.len();
            let headers = std::array::from_fn(|i| headers[offset + i].to_owned());

            let mut next = || columns.next().unwrap_or_default();
            let responses = ResponseSet::new(next(), next(), next(), next()).map_err(|source| {
                SurveyError::Responses {
                    product: name.clone(),
                    source,
                }
            })?;

            Ok(ProductBlock {
                name,
                headers,
                responses,
            })
        })
        .collect()
}

/// Errors that can occur when reading a survey export
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The CSV itself is malformed or unreadable
    #[error("malformed survey: {0}")]
    Csv(#[from] csv::Error),
    /// There is not a single complete product block
    #[error("a survey needs at least 4 columns per product, found {0}")]
    TooFewColumns(usize),
    /// A cell is blank or not a number
    #[error("line {line}, column {column:?}: {value:?} is not a price")]
    Cell {
        /// The line of the file the cell is on
        line: u64,
        /// The header of the cell's column
        column: String,
        /// The raw cell content
        value: String,
    },
    /// A product's answers fail validation
    #[error("{product}: {source}")]
    Responses {
        /// The product name
        product: String,
        /// The underlying failure
        source: ResponseSetError,
    },
}
