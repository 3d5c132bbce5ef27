use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clap::Parser;
use scgen::variant::OutputVariant;
use scgen_compile::record::render;

use crate::manifest::Manifest;
use crate::Runnable;

/// Prints the generated record of a single model
#[derive(Parser)]
pub struct Render {
    /// Model to render, as `app.Model`
    pub label: String,
    /// Path to the manifest
    #[clap(short, long, default_value = "scgen.toml")]
    pub manifest: PathBuf,
    /// Output variant (mixin, assign or private), overrides the manifest
    #[clap(long)]
    pub variant: Option<OutputVariant>,
    /// Prints more information
    #[clap(short, long)]
    pub verbose: bool,
}

#[async_trait]
impl Runnable for Render {
    async fn run(&mut self) -> Result<()> {
        let manifest = Manifest::load(&self.manifest).await?;
        let variant = self.variant.unwrap_or(manifest.variant);

        let model = manifest
            .find_model(&self.label)
            .ok_or_else(|| anyhow!("Unknown model: {}", self.label))?;

        let js = render(model, variant)
            .with_context(|| format!("could not render {}.{}", model.app_label, model.model_name))?;
        print!("{}", js);

        Ok(())
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}
