//! Terminal front end: argument parsing, logging, the interaction loop, and
//! text rendering of the core view model.
mod app;
mod cli;
mod commands;
mod effects;
mod logging;
mod render;

pub use app::run_app;
