//! inspect_stack - identify a data file and report its organization.
//!
//! Runs the provider registry against a file: which provider claims it,
//! what its internal structure looks like, and (with `--load`) the shape
//! of the loaded and resampled cube.

use anyhow::Context;
use clap::Parser;
use tracing::error;

use stax::config::Args;
use stax::{get_file_structure, load, Action, Config, ImageStack, LoadOutcome, Registry, Selection, DATA_TYPES};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    stax::init_tracing(&config.log_level);

    let registry = filtered_builtins(&config);

    println!("Inspecting file: {}", args.file.display());

    println!("\n=== REGISTERED PROVIDERS ===");
    for provider in registry.providers() {
        println!(
            "  {} [{}]",
            provider.title(),
            provider.extensions().join(" ")
        );
    }

    println!("\n=== READ FILTERS ===");
    for data_type in DATA_TYPES {
        println!("  {}:", data_type);
        for filter in registry.filter_list(Action::Read, data_type) {
            println!("    {}", filter);
        }
    }

    println!("\n=== IDENTIFICATION ===");
    let provider = match registry.identify(&args.file) {
        Some(p) => {
            println!("  Identified as: {}", p.title());
            p
        }
        None => {
            println!("  No provider claims this file.");
            return Ok(());
        }
    };

    println!("\n=== STRUCTURE ===");
    match get_file_structure(&registry, &args.file, Some(provider))? {
        Some(structure) => {
            for entry in &structure.entries {
                println!("  {} ({} channels)", entry.name, entry.channels.len());
                for channel in &entry.channels {
                    println!("    {}", channel);
                }
            }
        }
        None => println!("  Single dataset, no selection needed."),
    }

    if args.load {
        println!("\n=== LOAD ===");
        let selections: Vec<Selection> = args
            .selection
            .iter()
            .map(|s| match s.split_once(':') {
                Some((entry, channel)) => Selection::with_channel(entry, channel),
                None => Selection::new(s.as_str()),
            })
            .collect();
        let selection = if selections.is_empty() {
            None
        } else {
            Some(selections.as_slice())
        };

        let mut stack = ImageStack::new();
        let outcome = load(&registry, &args.file, &mut stack, Some(provider), selection, None)
            .map_err(|e| {
                error!(error = %e, "Load failed");
                e
            })?;
        match outcome {
            LoadOutcome::Loaded { provider } => {
                println!("  Loaded with: {}", provider);
                println!(
                    "  Cube shape: ({}, {}, {})",
                    stack.n_rows(),
                    stack.n_cols(),
                    stack.n_slices()
                );
                if let Some(interpolated) = &stack.interpolated {
                    let nan_count = interpolated.iter().filter(|v| v.is_nan()).count();
                    println!(
                        "  Interpolated cube: {:?} ({} undefined grid points)",
                        interpolated.dim(),
                        nan_count
                    );
                }
            }
            LoadOutcome::NoProvider => println!("  No data loaded."),
        }
    }

    Ok(())
}

/// Registry of built-in providers, restricted to the configured subset
fn filtered_builtins(config: &Config) -> Registry {
    let mut registry = Registry::new();
    if config.provider_enabled("Plain Text Stack") {
        registry.register(Box::new(stax::providers::TextStackProvider));
    }
    registry
}
