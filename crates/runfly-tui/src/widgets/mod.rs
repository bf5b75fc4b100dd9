//! Small shared rendering helpers used across screens.

pub mod comm_badge;
pub mod fmt;
