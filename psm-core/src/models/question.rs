use std::fmt;

/// One of the four price-perception questions of a Van Westendorp survey.
///
/// The declaration order matches the fixed column order of a product block:
/// too cheap, cheap, expensive, too expensive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Question {
    /// "At what price would you consider the product so cheap that you would doubt its quality?"
    TooCheap,
    /// "At what price would you consider the product a bargain?"
    Cheap,
    /// "At what price would the product start to seem expensive?"
    Expensive,
    /// "At what price would the product be too expensive to consider?"
    TooExpensive,
}

impl Question {
    /// All questions, in block column order
    pub const ALL: [Question; 4] = [
        Question::TooCheap,
        Question::Cheap,
        Question::Expensive,
        Question::TooExpensive,
    ];

    /// The accumulation direction used when building this question's curve.
    ///
    /// The "cheap" questions accumulate respondents whose answer is at or below
    /// a price, the "expensive" questions those whose answer is at or above it.
    pub fn direction(self) -> Direction {
        match self {
            Question::TooCheap | Question::Cheap => Direction::Ascending,
            Question::Expensive | Question::TooExpensive => Direction::Descending,
        }
    }

    /// The position of this question within a four-column product block
    pub fn column(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (match self {
            Self::TooCheap => "too_cheap",
            Self::Cheap => "cheap",
            Self::Expensive => "expensive",
            Self::TooExpensive => "too_expensive",
        })
        .fmt(f)
    }
}

/// How a curve accumulates respondents along the price axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Direction {
    /// Share of values at or below the price; non-decreasing along the axis
    Ascending,
    /// Share of values at or above the price; non-increasing along the axis
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_mapping() {
        assert_eq!(Question::TooCheap.direction(), Direction::Ascending);
        assert_eq!(Question::Cheap.direction(), Direction::Ascending);
        assert_eq!(Question::Expensive.direction(), Direction::Descending);
        assert_eq!(Question::TooExpensive.direction(), Direction::Descending);
    }

    #[test]
    fn test_column_order() {
        for (i, question) in Question::ALL.iter().enumerate() {
            assert_eq!(question.column(), i);
        }
    }

    #[test]
    fn test_serde_names() {
        let raw = serde_json::to_string(&Question::TooExpensive).unwrap();
        assert_eq!(raw, r#""too_expensive""#);
        assert_eq!(Question::TooExpensive.to_string(), "too_expensive");
    }
}
