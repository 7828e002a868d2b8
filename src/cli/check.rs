use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::StandardCatalog;
use crate::cli::{load_catalog, read_interface, ConfidenceArg, OutputFormat, OutputMatchingArg};
use crate::core::interface::ContractInterface;
use crate::core::signature::Signature;
use crate::matching::discovery::Discovery;
use crate::matching::engine::{ConformanceEngine, MatchingConfig};
use crate::utils::validation::validate_standard_id;

#[derive(Args)]
pub struct CheckArgs {
    /// ABI file (JSON array or compiler artifact)
    /// Use '-' for stdin
    #[arg(required = true)]
    pub abi: PathBuf,

    /// Standard ID to check against; can be repeated (default: every standard)
    #[arg(short, long = "standard")]
    pub standards: Vec<String>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Lowest confidence tier to report when checking every standard
    #[arg(long, value_enum, default_value = "no")]
    pub min_confidence: ConfidenceArg,

    /// How function outputs are compared
    #[arg(long, value_enum, default_value = "compatible")]
    pub output_matching: OutputMatchingArg,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the ABI cannot be parsed, the catalog cannot be
/// loaded, or a requested standard is unknown.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let interface = read_interface(&args.abi)?;
    if verbose {
        eprintln!(
            "Parsed {} functions and {} events from {}",
            interface.functions.len(),
            interface.events.len(),
            args.abi.display()
        );
    }

    let catalog = load_catalog(args.catalog.as_deref())?;
    if verbose {
        eprintln!("Loaded catalog with {} standards", catalog.len());
    }

    let config = MatchingConfig {
        min_confidence: args.min_confidence.into(),
        output_matching: args.output_matching.into(),
    };
    let engine = ConformanceEngine::with_config(&catalog, config);

    let discoveries = if args.standards.is_empty() {
        engine.check_all(&interface)
    } else {
        // Explicitly requested standards are always reported
        let mut discoveries = Vec::with_capacity(args.standards.len());
        for id in &args.standards {
            let id = validate_standard_id(id)?;
            let (discovery, _) = engine.check(&id, &interface)?;
            discoveries.push(discovery);
        }
        discoveries
    };

    if discoveries.is_empty() {
        eprintln!(
            "No standards matched at or above '{}' confidence.",
            config.min_confidence
        );
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&interface, &discoveries, &catalog, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&discoveries)?),
        OutputFormat::Tsv => print_tsv_results(&discoveries),
    }

    Ok(())
}

fn print_text_results(
    interface: &ContractInterface,
    discoveries: &[Discovery],
    catalog: &StandardCatalog,
    verbose: bool,
) {
    println!("Contract: {}", interface.name);

    for discovery in discoveries {
        println!("\n{}", "─".repeat(60));
        let name = catalog
            .get(&discovery.standard)
            .map_or("", |s| s.name.as_str());
        println!("{}  {}", discovery.standard, name);
        println!(
            "  Confidence: {} ({}/{} tokens, {:.1}%)",
            discovery.confidence,
            discovery.discovered_tokens,
            discovery.maximum_tokens,
            discovery.confidence_points * 100.0
        );
        println!(
            "  Found:      {}/{} signatures",
            discovery.matched_signatures(),
            discovery.contract.signature_count()
        );

        if verbose {
            print_signatures("Functions", &discovery.contract.functions);
            print_signatures("Events", &discovery.contract.events);
        } else {
            let missing = discovery.missing_signatures();
            if !missing.is_empty() {
                println!("  Missing:    {}", missing.join(", "));
            }
        }
    }
}

fn print_signatures(title: &str, signatures: &[Signature]) {
    if signatures.is_empty() {
        return;
    }
    println!("  {title}:");
    for signature in signatures {
        let mark = if signature.matched { "+" } else { "-" };
        let slots = signature
            .inputs
            .iter()
            .chain(&signature.outputs)
            .filter(|p| p.matched)
            .count();
        println!(
            "    {mark} {:<60} {slots}/{} slots",
            signature.display_signature(),
            signature.inputs.len() + signature.outputs.len()
        );
    }
}

fn print_tsv_results(discoveries: &[Discovery]) {
    println!("standard\tconfidence\tpoints\tthreshold\tdiscovered_tokens\tmaximum_tokens\tmatched\ttotal\tmissing");
    for d in discoveries {
        println!(
            "{}\t{}\t{:.4}\t{:.2}\t{}\t{}\t{}\t{}\t{}",
            d.standard,
            d.confidence,
            d.confidence_points,
            d.threshold,
            d.discovered_tokens,
            d.maximum_tokens,
            d.matched_signatures(),
            d.contract.signature_count(),
            d.missing_signatures().join(","),
        );
    }
}
