//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use fvsort_core::config::EXAMPLE_CONFIG;
use fvsort_core::SiteConfig;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Site code for the new configuration
    #[arg(long, value_name = "CODE", required = true)]
    pub code: String,

    /// Site name (default: the code)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating site configuration template...");
        println!("  Site code: {}", self.code);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. List the site's characters in sort order, with variants and confusables");
        println!("2. Validate your configuration:");
        println!("   fvsort validate --config {}", self.output.display());
        println!("3. Use it for sorting:");
        println!(
            "   fvsort sort --config {} -i words.txt",
            self.output.display()
        );

        Ok(())
    }

    /// Example configuration with this site's metadata
    fn generate_template(&self) -> Result<String> {
        let name = self.name.as_deref().unwrap_or(&self.code);
        let template = EXAMPLE_CONFIG
            .replacen(
                "code = \"fv-example\"",
                &format!("code = {}", toml::Value::String(self.code.clone())),
                1,
            )
            .replacen(
                "name = \"FV Example\"",
                &format!("name = {}", toml::Value::String(name.to_string())),
                1,
            );

        let config = SiteConfig::from_toml_str(&template)
            .with_context(|| format!("Invalid site code or name: {:?}", self.code))?;
        log::debug!(
            "Template for {} has {} characters",
            config.metadata.code,
            config.characters.len()
        );
        Ok(template)
    }
}
