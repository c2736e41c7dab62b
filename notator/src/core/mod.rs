//! Pure editor state machines.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! state and are driven by the application context in [`crate::app`].

pub mod delete_flow;
pub mod hemingway;
pub mod quotes;
pub mod registry;
pub mod tab;
pub mod timer;
