use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The slug named a time unit outside `d`/`w`/`m`/`y`. This is a rule
    /// bug rather than bad input data, so it propagates instead of
    /// degrading to a null window.
    #[error("unknown time unit: {0}")]
    UnknownUnit(char),
    #[error("invalid offset magnitude: {0}")]
    InvalidMagnitude(#[from] std::num::ParseIntError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
