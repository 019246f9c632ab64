//! Schedule-slug classification and milestone resolution.
//!
//! Pure functions only: no I/O, no state. The parser turns a schedule
//! slug into a signed day window around a milestone token, and the
//! resolver turns the token into a canonical milestone name plus a
//! representative date from the patient journey.

pub mod error;
pub mod parser;
pub mod resolver;

pub use error::{Result, ScheduleError};
pub use parser::{ParsedWindow, days, parse};
pub use resolver::{ResolvedMilestone, matches_any_definition, resolve};
