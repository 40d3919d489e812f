//! Core primitives shared by every module: period counting and money helpers.

pub mod money;
pub mod period;
