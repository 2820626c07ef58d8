//! Progress tracking and throttling.
//!
//! This module handles rate-limiting for transfer progress events.

mod throttle;

pub use throttle::ProgressThrottle;
