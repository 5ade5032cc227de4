//! Reusable line-level widgets: header, category checkboxes, share bars.

pub mod header;
pub mod indicators;
pub mod progress_bar;
