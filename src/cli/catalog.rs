use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::builder::StandardBuilder;
use crate::catalog::store::StandardCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::signature::Signature;
use crate::utils::validation::validate_standard_id;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all standards in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Hide stagnant standards
        #[arg(long)]
        active_only: bool,
    },

    /// Show details of a specific standard
    Show {
        /// Standard ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the reference ABI as well
        #[arg(long)]
        abi: bool,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Build a new standard entry from ABI files
    Build {
        /// Unique standard ID (e.g., "ERC165")
        #[arg(long, required = true)]
        id: String,

        /// Display name (e.g., "ERC-165 Standard Interface Detection")
        #[arg(long, required = true)]
        name: String,

        /// ABI file(s) - can be specified multiple times
        #[arg(long = "abi", required = true, num_args = 1..)]
        abis: Vec<PathBuf>,

        /// Link to the standard's specification
        #[arg(long)]
        url: Option<String>,

        /// Mark the standard as stagnant
        #[arg(long)]
        stagnant: bool,

        /// Output file (JSON). If not specified, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append to existing catalog file
        #[arg(long)]
        append_to: Option<PathBuf>,

        /// Force overwrite if ID already exists in catalog
        #[arg(long)]
        force: bool,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a standard is not
/// found, or building or writing a catalog fails.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            active_only,
        } => run_list(catalog, active_only, format, verbose),
        CatalogCommands::Show { id, catalog, abi } => run_show(&id, catalog, abi, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
        CatalogCommands::Build {
            id,
            name,
            abis,
            url,
            stagnant,
            output,
            append_to,
            force,
        } => run_build(BuildOptions {
            id,
            name,
            abis,
            url,
            stagnant,
            output,
            append_to,
            force,
            format,
            verbose,
        }),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    active_only: bool,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} standards", catalog.len());
    }

    let standards: Vec<_> = catalog
        .list()
        .into_iter()
        .filter(|s| !active_only || !s.is_stagnant())
        .collect();

    match format {
        OutputFormat::Text => {
            println!(
                "{:<12} {:<50} {:>9} {:>6} {:>6}",
                "ID", "Name", "Functions", "Events", "Tokens"
            );
            println!("{}", "-".repeat(87));
            for s in &standards {
                let name = if s.is_stagnant() {
                    format!("{} (stagnant)", s.name)
                } else {
                    s.name.clone()
                };
                println!(
                    "{:<12} {:<50} {:>9} {:>6} {:>6}",
                    s.id,
                    name,
                    s.functions.len(),
                    s.events.len(),
                    s.token_count()
                );
            }
            println!("\n{} standards", standards.len());
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = standards
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "url": s.url,
                        "stagnant": s.stagnant,
                        "functions": s.functions.len(),
                        "events": s.events.len(),
                        "maximum_tokens": s.token_count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\turl\tstagnant\tfunctions\tevents\tmaximum_tokens");
            for s in &standards {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    s.id,
                    s.name,
                    s.url,
                    s.stagnant,
                    s.functions.len(),
                    s.events.len(),
                    s.token_count()
                );
            }
        }
    }

    Ok(())
}

fn run_show(
    id: &str,
    catalog_path: Option<PathBuf>,
    show_abi: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let standard = catalog.lookup(&validate_standard_id(id)?)?;

    match format {
        OutputFormat::Text => {
            println!("Standard: {}\n", standard.name);
            println!("ID:       {}", standard.id);
            if !standard.url.is_empty() {
                println!("URL:      {}", standard.url);
            }
            println!("Stagnant: {}", standard.is_stagnant());
            println!("Tokens:   {}", standard.token_count());

            print_declarations("Functions", &standard.functions);
            print_declarations("Events", &standard.events);

            if show_abi {
                println!("\nABI:\n{}", standard.abi());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&standard)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tsignature\ttokens");
            for f in &standard.functions {
                println!("function\t{}\t{}", f.display_signature(), f.token_weight());
            }
            for e in &standard.events {
                println!("event\t{}\t{}", e.display_signature(), e.token_weight());
            }
        }
    }

    Ok(())
}

fn print_declarations(title: &str, signatures: &[Signature]) {
    if signatures.is_empty() {
        return;
    }
    println!("\n{title}:");
    println!("{:<70} {:>6}", "Signature", "Tokens");
    println!("{}", "-".repeat(77));
    for signature in signatures {
        println!(
            "{:<70} {:>6}",
            signature.display_signature(),
            signature.token_weight()
        );
    }
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} standards to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

struct BuildOptions {
    id: String,
    name: String,
    abis: Vec<PathBuf>,
    url: Option<String>,
    stagnant: bool,
    output: Option<PathBuf>,
    append_to: Option<PathBuf>,
    force: bool,
    format: OutputFormat,
    verbose: bool,
}

fn run_build(opts: BuildOptions) -> anyhow::Result<()> {
    let mut builder = StandardBuilder::new(&opts.id, &opts.name)?.stagnant(opts.stagnant);
    if let Some(url) = opts.url {
        builder = builder.url(url);
    }

    // Process ABI files
    for abi_path in &opts.abis {
        if !abi_path.exists() {
            anyhow::bail!("ABI file not found: {}", abi_path.display());
        }

        if opts.verbose {
            eprintln!("Processing: {}", abi_path.display());
        }

        builder.add_abi_file(abi_path)?;
    }

    // Get summary before building
    let summary = builder.summary();
    let standard = builder.build()?;

    if opts.verbose || matches!(opts.format, OutputFormat::Text) {
        eprintln!("{summary}");
    }

    if let Some(catalog_path) = opts.append_to {
        // Append to existing catalog
        let mut catalog = if catalog_path.exists() {
            StandardCatalog::load_from_file(&catalog_path)?
        } else {
            StandardCatalog::new()
        };

        if catalog.contains(&standard.id) {
            if opts.force {
                eprintln!("Warning: Overwriting existing standard '{}'", standard.id);
                catalog.remove(&standard.id);
            } else {
                anyhow::bail!(
                    "Standard '{}' already exists in catalog. Use --force to overwrite.",
                    standard.id
                );
            }
        }

        let id = standard.id.clone();
        catalog.register(standard)?;
        std::fs::write(&catalog_path, catalog.to_json()?)?;

        println!(
            "Added standard '{}' to {} ({} total standards)",
            id,
            catalog_path.display(),
            catalog.len()
        );
    } else if let Some(output_path) = opts.output {
        // Write single standard to file
        let json = serde_json::to_string_pretty(&standard)?;
        std::fs::write(&output_path, &json)?;
        println!("Wrote standard '{}' to {}", standard.id, output_path.display());
    } else {
        match opts.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&standard)?);
            }
            OutputFormat::Text | OutputFormat::Tsv => {
                println!("Standard:  {}", standard.name);
                println!("ID:        {}", standard.id);
                println!("Functions: {}", standard.functions.len());
                println!("Events:    {}", standard.events.len());
                println!("Tokens:    {}", standard.token_count());
                println!();
                println!("Use --output <file> to save as JSON");
            }
        }
    }

    Ok(())
}
