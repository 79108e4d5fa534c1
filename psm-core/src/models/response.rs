use super::Question;

/// The answers of a group of respondents to the four survey questions.
///
/// Every respondent answered all four questions, so the four sequences are
/// parallel: index `i` of each belongs to the same respondent. Construction
/// validates that:
/// - there is at least one respondent,
/// - all four sequences have the same length,
/// - every answer is a finite, non-negative price.
///
/// The expected ordering `too_cheap <= cheap <= expensive <= too_expensive`
/// per respondent is *not* enforced; see [`ResponseSet::inconsistent_respondents`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ResponseSetDto", into = "ResponseSetDto")
)]
pub struct ResponseSet([Vec<f64>; 4]);

impl ResponseSet {
    /// Creates a response set from the four answer columns, validating all constraints
    pub fn new(
        too_cheap: Vec<f64>,
        cheap: Vec<f64>,
        expensive: Vec<f64>,
        too_expensive: Vec<f64>,
    ) -> Result<Self, ResponseSetError> {
        Self::try_from(ResponseSetDto {
            too_cheap,
            cheap,
            expensive,
            too_expensive,
        })
    }

    /// Creates a response set from per-respondent rows, each ordered
    /// `[too_cheap, cheap, expensive, too_expensive]`
    pub fn from_rows<I: IntoIterator<Item = [f64; 4]>>(rows: I) -> Result<Self, ResponseSetError> {
        let mut columns: [Vec<f64>; 4] = Default::default();
        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        let [too_cheap, cheap, expensive, too_expensive] = columns;
        Self::new(too_cheap, cheap, expensive, too_expensive)
    }

    /// The number of respondents
    pub fn len(&self) -> usize {
        self.0[0].len()
    }

    /// Always false for a validated response set; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0[0].is_empty()
    }

    /// The answers given to a single question, one per respondent
    pub fn responses(&self, question: Question) -> &[f64] {
        &self.0[question.column()]
    }

    /// Iterates over the questions and their answers, in block column order
    pub fn iter(&self) -> impl Iterator<Item = (Question, &[f64])> {
        Question::ALL
            .into_iter()
            .map(|question| (question, self.responses(question)))
    }

    /// The smallest and largest answer across all four questions
    pub fn bounds(&self) -> (f64, f64) {
        self.0
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            })
    }

    /// Counts respondents whose answers are not weakly increasing from
    /// "too cheap" to "too expensive".
    ///
    /// Such answers are kept as-is; the count is purely diagnostic.
    pub fn inconsistent_respondents(&self) -> usize {
        let [too_cheap, cheap, expensive, too_expensive] = &self.0;
        (0..self.len())
            .filter(|&i| {
                !(too_cheap[i] <= cheap[i]
                    && cheap[i] <= expensive[i]
                    && expensive[i] <= too_expensive[i])
            })
            .count()
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct ResponseSetDto {
    /// Answers to the "too cheap" question
    pub too_cheap: Vec<f64>,
    /// Answers to the "cheap" question
    pub cheap: Vec<f64>,
    /// Answers to the "expensive" question
    pub expensive: Vec<f64>,
    /// Answers to the "too expensive" question
    pub too_expensive: Vec<f64>,
}

impl From<ResponseSet> for ResponseSetDto {
    fn from(value: ResponseSet) -> Self {
        let [too_cheap, cheap, expensive, too_expensive] = value.0;
        Self {
            too_cheap,
            cheap,
            expensive,
            too_expensive,
        }
    }
}

impl TryFrom<ResponseSetDto> for ResponseSet {
    type Error = ResponseSetError;

    /// Attempts to create a ResponseSet from a DTO, validating all constraints
    ///
    /// # Errors
    ///
    /// Returns `ResponseSetError` if there are no respondents, if the columns
    /// differ in length, or if any answer is non-finite or negative.
    fn try_from(value: ResponseSetDto) -> Result<Self, Self::Error> {
        let columns = [
            value.too_cheap,
            value.cheap,
            value.expensive,
            value.too_expensive,
        ];

        let expected = columns[0].len();
        if expected == 0 {
            return Err(ResponseSetError::Empty);
        }

        for (question, column) in Question::ALL.into_iter().zip(columns.iter()) {
            if column.len() != expected {
                return Err(ResponseSetError::LengthMismatch {
                    question,
                    expected,
                    found: column.len(),
                });
            }

            for (index, value) in column.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ResponseSetError::NonFinite { question, index });
                }
                if *value < 0.0 {
                    return Err(ResponseSetError::Negative { question, index });
                }
            }
        }

        Ok(Self(columns))
    }
}

/// Errors that can occur when creating or validating a ResponseSet
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ResponseSetError {
    /// Error when there are no respondents
    #[error("no respondents provided")]
    Empty,
    /// Error when the four answer columns differ in length
    #[error("{question} has {found} answers, expected {expected}")]
    LengthMismatch {
        /// The offending question
        question: Question,
        /// The number of respondents implied by the first column
        expected: usize,
        /// The number of answers found for `question`
        found: usize,
    },
    /// Error when an answer is NaN or infinite
    #[error("{question} answer of respondent {index} is not a finite number")]
    NonFinite {
        /// The offending question
        question: Question,
        /// The zero-based respondent index
        index: usize,
    },
    /// Error when an answer is a negative price
    #[error("{question} answer of respondent {index} is negative")]
    Negative {
        /// The offending question
        question: Question,
        /// The zero-based respondent index
        index: usize,
    },
}
