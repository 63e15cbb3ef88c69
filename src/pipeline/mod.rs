//! Polling pipeline for homework status changes.
//!
//! - `check_response`: Validate the status payload shape
//! - `parse_status`: Translate a homework record into a message
//! - `Poller`: Fetch, report and pace in a loop

pub mod poll;
pub mod validate;

pub use poll::Poller;
pub use validate::{check_response, current_date, parse_homework, parse_status};
