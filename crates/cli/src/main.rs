//! Terraform provider schema extractor CLI
//!
//! Command-line interface for turning provider schema dumps into versioned
//! schema documents.

mod logging;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tfschema_extractor_common::{Dialect, ExtractorError, ProviderInfo, TimeoutKind};
use tfschema_extractor_generator::SchemaExtractor;
use tfschema_extractor_parser::load_provider;

/// Exit status when the document could not be written
const EXIT_EMIT_FAILURE: u8 = 255;

#[derive(Parser)]
#[command(name = "tfschema-extractor")]
#[command(version, about = "Extract versioned schema documents from Terraform provider dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a provider dump and write `<name>.json`
    #[command(after_help = "EXAMPLES:\n  \
        # Extract with name and revision on the command line\n  \
        tfschema-extractor extract \\\n    \
        --input google.json \\\n    \
        --name google \\\n    \
        --revision v4.84.0 \\\n    \
        --output ./schemas\n\n  \
        # Take name and revision from a metadata file\n  \
        tfschema-extractor extract \\\n    \
        --input aws.yaml \\\n    \
        --metadata aws-provider.yaml")]
    Extract {
        /// Path to the provider dump (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Schema dialect (auto-detected if not specified)
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Provider name; also names the output file
        #[arg(short, long, required_unless_present = "metadata")]
        name: Option<String>,

        /// Provider revision
        #[arg(short, long)]
        revision: Option<String>,

        /// Provider metadata file (name, revision, dialect)
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Parse a provider dump and display a summary
    Inspect {
        /// Path to the provider dump (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Schema dialect (auto-detected if not specified)
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectArg {
    /// Terraform's bundled helper/schema package
    Legacy,
    /// terraform-plugin-sdk v1
    Sdk,
    /// terraform-plugin-sdk v2
    #[value(name = "sdk-2")]
    Sdk2,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Legacy => Dialect::Legacy,
            DialectArg::Sdk => Dialect::Sdk,
            DialectArg::Sdk2 => Dialect::Sdk2,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Extract {
            input,
            dialect,
            name,
            revision,
            metadata,
            output,
        } => {
            let info = resolve_info(name, revision, metadata.as_deref())?;
            extract_command(
                input.as_path(),
                dialect.map(Dialect::from),
                info,
                output.as_path(),
                cli.verbose,
            )?;
        }
        Commands::Inspect { input, dialect } => {
            inspect_command(input.as_path(), dialect.map(Dialect::from), cli.verbose)?;
        }
    }

    Ok(())
}

/// Combine the metadata file with command-line flags; flags win
fn resolve_info(
    name: Option<String>,
    revision: Option<String>,
    metadata: Option<&Path>,
) -> Result<ProviderInfo> {
    let mut info = match metadata {
        Some(path) => ProviderInfo::load(path).context("Failed to load provider metadata")?,
        None => match &name {
            Some(name) => ProviderInfo::new(name.clone(), String::new()),
            None => bail!("Either --name or --metadata is required"),
        },
    };

    if let Some(name) = name {
        info.name = name;
    }
    if let Some(revision) = revision {
        info.revision = revision;
    }
    info.validate().context("Invalid provider metadata")?;
    Ok(info)
}

fn extract_command(
    input: &Path,
    dialect: Option<Dialect>,
    info: ProviderInfo,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    println!("{} Reading provider dump: {}", "→".cyan(), input.display());

    let dialect = dialect.or(info.dialect);
    if verbose {
        println!("  Name: {}", info.name);
        println!("  Revision: {}", info.revision);
        println!(
            "  Dialect: {}",
            dialect.map_or("auto".to_string(), |d| d.to_string())
        );
        println!("  Output: {}", output.display());
    }

    let provider = load_provider(input, dialect).context("Failed to load provider dump")?;
    if dialect.is_none() {
        println!(
            "{} Auto-detected dialect: {}",
            "→".cyan(),
            provider.dialect().to_string().yellow()
        );
    }
    println!(
        "{} Parsed {} resources and {} data sources",
        "✓".green(),
        provider.resources().count(),
        provider.data_sources().count()
    );

    println!("{} Converting schema...", "→".cyan());
    let extractor = SchemaExtractor::new(info).context("Invalid provider metadata")?;
    let path = extractor
        .generate_to_directory(provider.as_ref(), output)
        .context("Failed to write schema document")?;

    println!("\n{}", "✓ Extraction complete!".green().bold());
    println!("  📄 {}", path.display());

    Ok(())
}

fn inspect_command(input: &Path, dialect: Option<Dialect>, verbose: bool) -> Result<()> {
    println!("{} Inspecting provider dump: {}", "→".cyan(), input.display());

    let provider = load_provider(input, dialect).context("Failed to load provider dump")?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Provider Definition:".bold());
    println!("  Dialect: {}", provider.dialect().to_string().yellow());
    println!("  SDK type: {:?}", provider.dialect().tag());
    println!("  Provider attributes: {}", provider.schema().count());
    println!("  Resources: {}", provider.resources().count());
    println!("  Data sources: {}", provider.data_sources().count());

    if verbose {
        for (title, resources) in [
            ("Resources:", provider.resources()),
            ("Data sources:", provider.data_sources()),
        ] {
            println!("\n{}", title.bold());
            for (name, resource) in resources {
                let timeouts: Vec<&str> = TimeoutKind::ALL
                    .into_iter()
                    .filter(|kind| resource.timeouts().is_some_and(|t| t.is_declared(*kind)))
                    .map(TimeoutKind::as_str)
                    .collect();
                println!("  • {}", name.cyan());
                println!("    Attributes: {}", resource.attributes().count());
                if !timeouts.is_empty() {
                    println!("    Timeouts: {}", timeouts.join(", "));
                }
            }
        }
    }

    Ok(())
}

/// 255 when the document could not be emitted, 1 for everything else
fn exit_code(err: &anyhow::Error) -> u8 {
    let emit_failed = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ExtractorError>(),
            Some(ExtractorError::Emit { .. })
        )
    });
    if emit_failed {
        EXIT_EMIT_FAILURE
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("provider.yaml");
        std::fs::write(&path, "name: aws\nrevision: v5.0.0\ndialect: sdk-2\n").unwrap();

        let info = resolve_info(None, Some("v5.1.0".to_string()), Some(&path)).unwrap();
        assert_eq!(info.name, "aws");
        assert_eq!(info.revision, "v5.1.0");
        assert_eq!(info.dialect, Some(Dialect::Sdk2));

        let info = resolve_info(Some("awscc".to_string()), None, Some(&path)).unwrap();
        assert_eq!(info.name, "awscc");
        assert_eq!(info.revision, "v5.0.0");
    }

    #[test]
    fn test_metadata_validated_after_flags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("provider.yaml");
        std::fs::write(&path, "name: ../bad\nrevision: v1.0.0\n").unwrap();

        let info = resolve_info(Some("good".to_string()), None, Some(&path)).unwrap();
        assert_eq!(info, ProviderInfo::new("good", "v1.0.0"));

        assert!(resolve_info(None, None, Some(&path)).is_err());
    }

    #[test]
    fn test_name_required_without_metadata() {
        assert!(resolve_info(None, None, None).is_err());
        assert!(resolve_info(Some("a/b".to_string()), None, None).is_err());

        let info = resolve_info(Some("google".to_string()), Some("v4".to_string()), None).unwrap();
        assert_eq!(info, ProviderInfo::new("google", "v4"));
    }

    #[test]
    fn test_exit_codes() {
        let emit = anyhow::Error::new(ExtractorError::Emit {
            path: PathBuf::from("out/google.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        })
        .context("Failed to write schema document");
        assert_eq!(exit_code(&emit), EXIT_EMIT_FAILURE);

        let malformed = anyhow::Error::new(ExtractorError::Malformed("x".to_string()))
            .context("Failed to load provider dump");
        assert_eq!(exit_code(&malformed), 1);
    }

    #[test]
    fn test_cli_parses_dialect_names() {
        let cli = Cli::try_parse_from([
            "tfschema-extractor",
            "extract",
            "--input",
            "dump.json",
            "--dialect",
            "sdk-2",
            "--name",
            "google",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract { dialect, .. } => {
                assert_eq!(dialect.map(Dialect::from), Some(Dialect::Sdk2))
            }
            Commands::Inspect { .. } => panic!("expected extract"),
        }

        let missing_name = Cli::try_parse_from(["tfschema-extractor", "extract", "--input", "dump.json"]);
        assert!(missing_name.is_err());
    }
}
