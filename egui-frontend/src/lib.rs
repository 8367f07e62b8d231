//! Desktop client for Monthly Bank Usage.
//!
//! - `config` - YAML settings for the backend process and display formats
//! - `backend` - the backend capability trait and its stdio JSON bridge
//! - `ui` - read-model state, the coordinator, and the egui views

pub mod backend;
pub mod config;
pub mod ui;
