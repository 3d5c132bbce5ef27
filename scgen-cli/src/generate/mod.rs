use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use log::{debug, info};
use scgen::variant::OutputVariant;
use scgen_compile::{
    record::{render, render_buildfile, render_core, render_subclass},
    util::{file_name, generated_path, underscore, BUILDFILE, CORE_FILE},
};
use tokio::fs;

use crate::manifest::{AppModels, Manifest};
use crate::Runnable;

pub use self::render::Render;

mod render;

/// Generates SproutCore records for the models in the manifest
#[derive(Parser)]
pub struct Generate {
    /// Apps (`app`) or single models (`app.Model`) to generate
    pub labels: Vec<String>,
    /// Path to the manifest
    #[clap(short, long, default_value = "scgen.toml")]
    pub manifest: PathBuf,
    /// Output directory, overrides the manifest
    #[clap(short, long)]
    pub directory: Option<PathBuf>,
    /// Output variant (mixin, assign or private), overrides the manifest
    #[clap(long)]
    pub variant: Option<OutputVariant>,
    /// App to exclude, may be repeated
    #[clap(short, long)]
    pub exclude: Vec<String>,
    /// Prints more information
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateResult {
    pub generated: usize,
    pub subclasses: usize,
}

#[async_trait]
impl Runnable for Generate {
    async fn run(&mut self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest).await?;
        let directory = self.directory.as_ref().unwrap_or(&manifest.directory);
        let variant = self.variant.unwrap_or(manifest.variant);
        let project = manifest.project_name(directory);
        debug!(
            "generating project {} into '{}' with variant {}",
            project,
            directory.display(),
            variant
        );

        let selection = manifest.select(&self.labels, &self.exclude)?;
        let result = generate_apps(directory, &project, &selection, variant).await?;

        info!(
            "generated {} records, created {} subclasses",
            result.generated, result.subclasses
        );

        Ok(())
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FileKind {
    Generated,
    Subclass,
    Core,
    Buildfile,
}

/// A file to be written once every model has rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PlannedFile {
    kind: FileKind,
    path: PathBuf,
    contents: String,
}

/// Writes the generated file of every selected model, its subclass if missing,
/// the `core.js` of every app and the project Buildfile.
///
/// Nothing is written unless every file renders.
pub async fn generate_apps(
    directory: &Path,
    project: &str,
    selection: &[AppModels<'_>],
    variant: OutputVariant,
) -> Result<GenerateResult> {
    let files = plan_files(directory, project, selection, variant).await?;
    let mut result = GenerateResult::default();

    for file in &files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("could not create directory '{}'", parent.display()))?;
        }
        write_file(&file.path, &file.contents).await?;
        info!("wrote {}", file.path.display());

        match file.kind {
            FileKind::Generated => result.generated += 1,
            FileKind::Subclass => result.subclasses += 1,
            FileKind::Core | FileKind::Buildfile => {}
        }
    }

    Ok(result)
}

async fn plan_files(
    directory: &Path,
    project: &str,
    selection: &[AppModels<'_>],
    variant: OutputVariant,
) -> Result<Vec<PlannedFile>> {
    let mut files = Vec::new();
    let mut frameworks = Vec::new();

    for app in selection {
        if app.models.is_empty() {
            continue;
        }

        let framework = underscore(app.app_label);
        let app_dir = directory.join(&framework);
        frameworks.push(framework);

        for model in &app.models {
            let name = format!("{}.{}", model.app_label, model.model_name);
            files.push(PlannedFile {
                kind: FileKind::Generated,
                path: app_dir.join(generated_path(&model.model_name)),
                contents: render(model, variant)
                    .with_context(|| format!("could not render {}", name))?,
            });

            let subclass_path = app_dir.join(file_name(&model.model_name));
            if fs::metadata(&subclass_path).await.is_ok() {
                debug!("skipping existing {}", subclass_path.display());
                continue;
            }
            files.push(PlannedFile {
                kind: FileKind::Subclass,
                path: subclass_path,
                contents: render_subclass(model, variant)
                    .with_context(|| format!("could not render subclass of {}", name))?,
            });
        }

        files.push(PlannedFile {
            kind: FileKind::Core,
            path: app_dir.join(CORE_FILE),
            contents: render_core(app.app_label)?,
        });
    }

    files.push(PlannedFile {
        kind: FileKind::Buildfile,
        path: directory.join(BUILDFILE),
        contents: render_buildfile(project, &frameworks)
            .with_context(|| format!("could not render the Buildfile of {}", project))?,
    });

    Ok(files)
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .await
        .with_context(|| format!("could not write file '{}'", path.display()))
}
