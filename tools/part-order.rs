//! Resolve a host's parts and print their registration order
//!
//! Reads part manifests from a parts directory, resolves the entry point,
//! prints the ordered parts and what the configure operations registered.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use part_composer::part::features::{CompiledResourcesFeature, CompiledResourcesFeatureProvider};
use part_composer::part::registry::DirectoryComponentLoader;
use part_composer::utils::{init_logging_from_config, with_default};
use part_composer::{ComposerConfig, LoggingConfig, OperationRegistry, PartLoader, PartManager};

#[derive(Parser, Debug)]
#[command(name = "part-order", about = "Print the registration order of a host's parts")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding part manifests (overrides config)
    #[arg(short, long)]
    parts_dir: Option<PathBuf>,

    /// Entry component name (overrides config)
    #[arg(short, long)]
    entry: Option<String>,

    /// List every manifest in the parts directory before resolving
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> anyhow::Result<ComposerConfig> {
    let mut config = match &args.config {
        Some(path) => ComposerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => {
            let entry = args
                .entry
                .clone()
                .context("--entry is required without --config")?;
            ComposerConfig::new(entry)
        }
    };

    if let Some(dir) = &args.parts_dir {
        config.parts_dir = dir.clone();
    }
    if let Some(entry) = &args.entry {
        config.entry_point = entry.clone();
    }
    if args.verbose {
        let logging = config.logging.get_or_insert_with(LoggingConfig::default);
        logging.filter = Some("debug".to_string());
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging_from_config(config.logging.as_ref());

    if args.list {
        let loader = DirectoryComponentLoader::with_config(&config.parts_dir, &config.discovery);
        let parts = with_default(|| loader.discover_parts(), Vec::new(), "Failed to list parts");
        println!("Available parts:");
        for part in parts {
            println!("  {}", part.name());
        }
        println!();
    }

    let mut manager = PartManager::new();
    let graph = PartLoader::configure_parts_with_discovery(
        &mut manager,
        &config,
        &OperationRegistry::with_builtins(),
    )
    .with_context(|| format!("Failed to configure parts for {}", config.entry_point))?;

    println!("Resolution order:");
    for (position, id) in graph.parts_in_order().into_iter().enumerate() {
        let part = graph.part(id);
        match part.parent() {
            Some(parent) => println!("  {:>3}. {} (from {})", position + 1, part, parent),
            None => println!("  {:>3}. {}", position + 1, part),
        }
    }

    println!();
    println!("Registered parts:");
    for part in manager.parts() {
        println!("  {:?} {}", part.kind(), part.name());
    }

    let mut resources = CompiledResourcesFeature::default();
    manager.populate_feature(&CompiledResourcesFeatureProvider, &mut resources);
    if !resources.descriptors.is_empty() {
        println!();
        println!("Compiled resources:");
        for descriptor in &resources.descriptors {
            println!(
                "  {} -> {} ({})",
                descriptor.relative_path,
                descriptor.type_name().unwrap_or("?"),
                descriptor.source.name()
            );
        }
    }

    info!("Done");
    Ok(())
}
