use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use scgen::prelude::*;
use scgen_compile::util::{camelize, underscore};
use serde::Deserialize;
use tokio::fs;

const DEFAULT_DIRECTORY: &str = "sproutcore/frameworks";
const DEFAULT_PROJECT: &str = "frameworks";

#[derive(Deserialize, Clone, Debug)]
pub struct Manifest {
    /// Name of the wrapper framework, defaults to the last component of the output directory.
    pub project: Option<String>,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub variant: OutputVariant,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// Models of a single app, in manifest order.
#[derive(Clone, Debug, PartialEq)]
pub struct AppModels<'a> {
    pub app_label: &'a str,
    pub models: Vec<&'a ModelDescriptor>,
}

impl Manifest {
    pub async fn load(path: impl AsRef<Path>) -> Result<Manifest> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("manifest '{}' not found", path.display()))?;
        Manifest::from_slice(&bytes)
            .with_context(|| format!("manifest '{}' corrupt", path.display()))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Manifest> {
        let mut manifest: Manifest = toml::from_slice(bytes)?;
        for model in &mut manifest.models {
            model.app_label = camelize_namespace(&model.app_label);
            model.model_name = camelize(&model.model_name);
        }
        manifest.exclude = manifest
            .exclude
            .iter()
            .map(|app| camelize_namespace(app))
            .collect();

        Ok(manifest)
    }

    pub fn project_name(&self, directory: &Path) -> String {
        match &self.project {
            Some(project) => project.clone(),
            None => directory
                .file_name()
                .map(|name| underscore(&name.to_string_lossy()))
                .unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
        }
    }

    /// Selects models by `app` or `app.Model` labels.
    ///
    /// Without labels every model is selected, except for excluded apps.
    /// Unknown labels are reported as written.
    pub fn select(&self, labels: &[String], exclude: &[String]) -> Result<Vec<AppModels<'_>>> {
        let mut excluded: Vec<String> = self.exclude.clone();
        for app in exclude {
            let app_label = camelize_namespace(app);
            if !self.has_app(&app_label) {
                return Err(anyhow!("Unknown application: {}", app));
            }
            excluded.push(app_label);
        }

        let mut selection: Vec<AppModels<'_>> = Vec::new();

        if labels.is_empty() {
            for model in &self.models {
                if !excluded.contains(&model.app_label) {
                    push_model(&mut selection, model);
                }
            }
            return Ok(selection);
        }

        for label in labels {
            let app_label = camelize_namespace(label);
            if self.has_app(&app_label) {
                for model in self.models.iter().filter(|m| m.app_label == app_label) {
                    push_model(&mut selection, model);
                }
                continue;
            }

            let (app, model_name) = match label.rsplit_once('.') {
                Some(parts) => parts,
                None => return Err(anyhow!("Unknown application: {}", label)),
            };
            if !self.has_app(&camelize_namespace(app)) {
                return Err(anyhow!("Unknown application: {}", app));
            }
            let model = self
                .find_model(label)
                .ok_or_else(|| anyhow!("Unknown model: {}.{}", app, model_name))?;
            push_model(&mut selection, model);
        }

        Ok(selection)
    }

    /// Finds a model by its `app.Model` label.
    pub fn find_model(&self, label: &str) -> Option<&ModelDescriptor> {
        let (app, model) = label.rsplit_once('.')?;
        let app_label = camelize_namespace(app);
        let model_name = camelize(model);

        self.models
            .iter()
            .find(|m| m.app_label == app_label && m.model_name == model_name)
    }

    fn has_app(&self, app_label: &str) -> bool {
        self.models.iter().any(|m| m.app_label == app_label)
    }
}

/// Camelizes every segment of a dotted namespace, `core.blog_app` becomes `Core.BlogApp`.
pub fn camelize_namespace(s: &str) -> String {
    s.split('.').map(camelize).collect::<Vec<_>>().join(".")
}

fn push_model<'a>(selection: &mut Vec<AppModels<'a>>, model: &'a ModelDescriptor) {
    match selection
        .iter_mut()
        .find(|app| app.app_label == model.app_label)
    {
        Some(app) => {
            if !app.models.iter().any(|m| m.model_name == model.model_name) {
                app.models.push(model);
            }
        }
        None => selection.push(AppModels {
            app_label: &model.app_label,
            models: vec![model],
        }),
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DIRECTORY)
}
