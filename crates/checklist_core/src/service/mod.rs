//! Use-case orchestration above the store and the rendered list.
//!
//! # Responsibility
//! - Turn user events into store writes and list refreshes.
//! - Keep form surfaces decoupled from storage details.

pub mod list_controller;
