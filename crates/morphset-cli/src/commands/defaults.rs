//! Defaults command
//!
//! Usage: morphset defaults <SCHEMA> [--kind <KIND>] [--json]

use clap::Args;
use morphset_core::SynthesisEngine;
use morphset_core_types::SettingsKind;

use crate::demo;

#[derive(Debug, Args)]
pub struct DefaultsArgs {
    /// Demo schema to instantiate
    pub schema: String,

    /// Variant kind to construct (copy, read, inpc, real)
    #[arg(short, long, default_value = "read")]
    pub kind: SettingsKind,

    /// Print the instance snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute defaults command
pub fn execute(args: DefaultsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SynthesisEngine::new(demo::catalog());
    let schema = demo::schema(&args.schema)?;
    let instance = engine.create(&schema, args.kind, None)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&instance.snapshot())?);
        return Ok(());
    }

    println!("{}", instance.shape());
    for property in schema.properties() {
        println!("  {} = {}", property.name(), instance.get(property.name())?);
    }

    Ok(())
}
