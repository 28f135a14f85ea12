//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ComposerService, GeneratorService, MaterializerService};
use crate::config::Settings;
use crate::infrastructure::traits::{DialoguerPrompter, FileSystem, Prompter, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive prompts
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(DialoguerPrompter))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            prompter,
        }
    }

    pub fn materializer(&self) -> MaterializerService {
        MaterializerService::new(self.fs.clone())
    }

    pub fn composer(&self) -> ComposerService {
        ComposerService::new(self.fs.clone(), self.settings.clone())
    }

    pub fn generator(&self) -> GeneratorService {
        GeneratorService::new(self.fs.clone(), self.settings.clone())
    }
}
