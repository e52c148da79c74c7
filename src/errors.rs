use thiserror::Error;

/// Rejected structural calendar input such as an out-of-range year or week.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("Invalid week number: {0}")]
    InvalidWeekNumber(u32),
    #[error("Invalid weekday name: {0}")]
    UnknownWeekday(String),
}

/// Failure to turn a raw record into a usable domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Unparseable date `{0}`")]
    InvalidDate(String),
    #[error("Date arithmetic out of range: {0}")]
    OutOfRange(String),
}

/// Whole-pipeline failures reported by the period resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("No income transactions found")]
    NoIncomeTransactions,
    #[error("Date arithmetic out of range: {0}")]
    DateOutOfRange(String),
}

impl PeriodError {
    /// The "no income" state is expected for new users and is not worth an error log.
    pub fn is_benign(&self) -> bool {
        matches!(self, PeriodError::NoIncomeTransactions)
    }
}

impl From<RecordError> for PeriodError {
    fn from(err: RecordError) -> Self {
        PeriodError::DateOutOfRange(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
