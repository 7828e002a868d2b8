use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, read_interface, OutputFormat, OutputMatchingArg};
use crate::matching::engine::{ConformanceEngine, MatchingConfig};
use crate::utils::validation::validate_standard_id;

#[derive(Args)]
pub struct FunctionArgs {
    /// ABI file (JSON array or compiler artifact)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub abi: PathBuf,

    /// Name of the function to check
    #[arg(required = true)]
    pub name: String,

    /// Standard ID to check against
    #[arg(short, long, required = true)]
    pub standard: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// How function outputs are compared
    #[arg(long, value_enum, default_value = "compatible")]
    pub output_matching: OutputMatchingArg,
}

/// Execute function subcommand
///
/// # Errors
///
/// Returns an error if the ABI cannot be parsed, the function is not in the
/// ABI, or the standard is unknown.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FunctionArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let interface = read_interface(&args.abi)?;
    let function = interface.function(&args.name).ok_or_else(|| {
        anyhow::anyhow!(
            "Function '{}' not found in {}",
            args.name,
            args.abi.display()
        )
    })?;

    let catalog = load_catalog(args.catalog.as_deref())?;
    let id = validate_standard_id(&args.standard)?;
    let config = MatchingConfig {
        output_matching: args.output_matching.into(),
        ..MatchingConfig::default()
    };
    let engine = ConformanceEngine::with_config(&catalog, config);
    let (discovery, found) = engine.check_function(&id, function)?;

    if verbose && !found {
        eprintln!(
            "'{}' is not declared by {} or shares nothing with its declaration",
            args.name, id
        );
    }

    match format {
        OutputFormat::Text => {
            println!("Function:   {}", function.display_signature());
            println!("Standard:   {}", discovery.standard);
            println!(
                "Confidence: {} ({}/{} tokens, {:.1}%)",
                discovery.confidence,
                discovery.discovered_tokens,
                discovery.maximum_tokens,
                discovery.confidence_points * 100.0
            );
            if discovery.function.matched {
                println!("Expected:   {}", discovery.function.display_signature());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&discovery)?),
        OutputFormat::Tsv => {
            println!("standard\tfunction\tconfidence\tpoints\tdiscovered_tokens\tmaximum_tokens");
            println!(
                "{}\t{}\t{}\t{:.4}\t{}\t{}",
                discovery.standard,
                discovery.function.name,
                discovery.confidence,
                discovery.confidence_points,
                discovery.discovered_tokens,
                discovery.maximum_tokens
            );
        }
    }

    Ok(())
}
