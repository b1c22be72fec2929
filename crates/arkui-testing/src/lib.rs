//! Testing utilities for the ArkUI core crates.

pub mod fixtures;
pub mod log_capture;
mod rule;

pub use fixtures::*;
pub use log_capture::{capture_logs, CapturedRecord};
pub use rule::LayoutTestRule;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::log_capture::{capture_logs, CapturedRecord};
    pub use crate::rule::LayoutTestRule;
}
