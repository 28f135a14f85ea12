//! create-omega: scaffold an Express project from a template.
//!
//! Layers, innermost first:
//! - [`domain`]: templates, manifest merge patches, features (no I/O)
//! - [`application`]: materializer, composer and generator services
//! - [`infrastructure`]: filesystem and prompt implementations, DI container
//! - [`cli`]: argument parsing, prompts, dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
