//! Transient UI sessions.

pub mod edit_session;
