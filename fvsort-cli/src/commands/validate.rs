//! Validate command implementation

use anyhow::Result;
use clap::Args;
use fvsort_core::{SiteAlphabet, SiteConfig, MAX_ALPHABET_LENGTH};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to site configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,

    /// Print each alphabet character with its custom sort character
    #[arg(long)]
    pub show_alphabet: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating site configuration: {}", self.config.display());

        let site = match SiteConfig::from_file(&self.config)
            .and_then(|config| SiteAlphabet::from_config(&config).map(|site| (config, site)))
        {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };
        let (config, site) = site;
        let alphabet = site.sorter().alphabet();

        println!("✓ Configuration is valid!");
        println!("  Site code: {}", site.code());
        println!("  Site name: {}", site.name());
        println!(
            "  Characters: {} (alphabet length {} of {})",
            config.characters.len(),
            alphabet.len(),
            MAX_ALPHABET_LENGTH
        );
        println!("  Variants: {}", alphabet.variants().count());
        println!("  Ignorables: {}", site.sorter().ignorables().len());
        println!("  Confusables: {}", site.confusables().len());

        if self.show_alphabet {
            println!();
            self.print_alphabet(&site);
        }

        Ok(())
    }

    fn print_alphabet(&self, site: &SiteAlphabet) {
        let sorter = site.sorter();
        let alphabet = sorter.alphabet();
        for (rank, grapheme) in alphabet.graphemes().iter().enumerate() {
            let rank = rank as u32;
            let sort_char = sorter.custom_sort_char(rank).unwrap_or_default();
            let variants: Vec<&str> = alphabet
                .variants()
                .filter(|(_, base)| *base == grapheme.as_str())
                .map(|(variant, _)| variant)
                .collect();

            if variants.is_empty() {
                println!("  {rank:>3}  {sort_char}  {grapheme:?}");
            } else {
                println!(
                    "  {rank:>3}  {sort_char}  {grapheme:?} ({})",
                    variants.join(", ")
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            config: PathBuf::from("site.toml"),
            show_alphabet: false,
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("site.toml"));
    }

    #[test]
    fn test_validate_valid_config() {
        let toml_content = r#"
[metadata]
code = "fv-test"
name = "FV Test"

[[characters]]
title = "a"
variants = ["A"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
            show_alphabet: true,
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_config() {
        let toml_content = r#"
[metadata]
code = "fv-test"
name = "FV Test"

[[characters]]
title = "a"

[[characters]]
title = "a"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            config: temp_file.path().to_path_buf(),
            show_alphabet: false,
        };

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }
}
