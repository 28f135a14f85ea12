//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Prompter)
//! but are themselves concrete structs, not traits.

mod composer;
mod generator;
mod materializer;

pub use composer::ComposerService;
pub use generator::{GenerationContext, GenerationReport, GeneratorService};
pub use materializer::MaterializerService;
