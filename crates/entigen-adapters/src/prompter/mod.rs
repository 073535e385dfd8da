//! Prompter adapters.
//!
//! The terminal prompter lives in the CLI crate next to dialoguer; this
//! module holds the non-interactive one.

mod scripted;

pub use scripted::ScriptedPrompter;
