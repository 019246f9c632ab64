//! Core pipeline computations: frame building, denormalization, window
//! record construction, and incremental selection. Everything here is
//! synchronous and side-effect-free apart from log output.

pub mod data_utils;
pub mod denormalize;
pub mod frame;
pub mod select;
pub mod transform;
pub mod window;

pub use denormalize::{MERGED_COLUMNS, denormalize};
pub use frame::{
    activity_frame, patient_journey_frame, schedule_frame, survey_result_frame,
};
pub use select::select_new;
pub use transform::{SourceTables, transform};
pub use window::{WindowBuild, build_window_records};
