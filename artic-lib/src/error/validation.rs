//! Validation error types

/// Input rejected at the boundary before any state mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The row count for a bulk selection was not a positive integer.
    #[error("Please enter a valid positive number.")]
    InvalidCount {
        /// The raw text the user entered.
        input: String,
    },

    /// A page number or page size was zero.
    #[error("{field} must be at least 1")]
    NotPositive {
        /// The field that was rejected.
        field: &'static str,
    },

    /// A row reference did not match any row on the current page.
    #[error("No row {reference} on this page")]
    UnknownRow {
        /// The row number or id the user referred to.
        reference: String,
    },
}

impl ValidationError {
    /// Creates a new invalid count error.
    pub fn invalid_count(input: impl Into<String>) -> Self {
        Self::InvalidCount {
            input: input.into(),
        }
    }

    /// Creates a new unknown row error.
    pub fn unknown_row(reference: impl ToString) -> Self {
        Self::UnknownRow {
            reference: reference.to_string(),
        }
    }
}
