//! Reusable widgets.

pub mod notice;
pub mod status_bar;
