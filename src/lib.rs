//! Launch records dashboard.
//!
//! Loads a static table of launch records once and derives the two chart
//! series the dashboard shows: the success distribution by site and the
//! payload vs. outcome scatter. The series can be viewed in a native window
//! ([`app`]) or fetched as JSON over HTTP ([`server`]).

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod query;
pub mod server;
pub mod state;
pub mod ui;
