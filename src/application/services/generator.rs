//! Project generation service
//!
//! Orchestrates a full run: load the template for the chosen language (an
//! on-disk override, else the embedded copy), create the project directory,
//! write the template into it, then compose each enabled feature in order.
//! There is no rollback; a failure leaves whatever was already written.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::{ComposerService, MaterializerService};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{Answers, Feature, Language, TemplateEntry};
use crate::infrastructure::assets::embedded_template;
use crate::infrastructure::traits::FileSystem;

/// Process-level inputs, passed in rather than read ambiently.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Directory the project name is resolved against
    pub working_dir: PathBuf,
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    pub language: Language,
    /// Features applied, in application order
    pub features: Vec<Feature>,
    /// Number of template files copied
    pub files_copied: usize,
}

/// Generates projects from templates.
pub struct GeneratorService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    materializer: MaterializerService,
    composer: ComposerService,
}

impl GeneratorService {
    /// Create a new generator service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self {
            materializer: MaterializerService::new(fs.clone()),
            composer: ComposerService::new(fs.clone(), settings.clone()),
            fs,
            settings,
        }
    }

    #[instrument(skip(self))]
    pub fn generate(
        &self,
        answers: &Answers,
        ctx: &GenerationContext,
    ) -> ApplicationResult<GenerationReport> {
        let entries = self.load_template(answers.language)?;

        let project_dir = answers.name.resolve(&ctx.working_dir);
        if !answers.name.is_current_dir() {
            self.fs
                .create_dir(&project_dir)
                .with_path_context("create project directory", &project_dir)?;
        }

        self.materializer.write(&project_dir, &entries)?;
        let files_copied = entries.iter().map(TemplateEntry::file_count).sum();
        info!(
            "copied {} {} template files to {}",
            files_copied,
            answers.language,
            project_dir.display()
        );

        let features = answers.features();
        for feature in &features {
            self.composer
                .apply(&project_dir, *feature, answers.language)?;
            info!("applied feature {}", feature);
        }

        Ok(GenerationReport {
            project_dir,
            language: answers.language,
            features,
            files_copied,
        })
    }

    /// Read the template tree before anything is written.
    fn load_template(&self, language: Language) -> ApplicationResult<Vec<TemplateEntry>> {
        match self.settings.template_path(language) {
            Some(dir) => {
                if !self.fs.is_dir(&dir) {
                    return Err(ApplicationError::TemplateNotFound(dir));
                }
                debug!("load_template: using {}", dir.display());
                self.materializer.read(&dir)
            }
            None => embedded_template(language),
        }
    }
}
