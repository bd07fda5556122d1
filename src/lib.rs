//! Student Console Library
//!
//! A desktop dashboard for the student records API. The binary in
//! `src/main.rs` wires these modules into an eframe window.

pub mod api;
pub mod config;
pub mod error;
/// Console state container and its supporting types
pub mod state;
pub mod ui;
