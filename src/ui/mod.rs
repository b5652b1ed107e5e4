//! egui widgets for the desktop dashboard.

pub mod panels;
pub mod plot;
