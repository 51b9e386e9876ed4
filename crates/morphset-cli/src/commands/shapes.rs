//! Shapes command
//!
//! Usage: morphset shapes [SCHEMA]

use clap::Args;
use morphset_core::errors::ExError;
use morphset_core::SynthesisEngine;
use morphset_core_types::SettingsKind;

use crate::demo;

#[derive(Debug, Args)]
pub struct ShapesArgs {
    /// Demo schema to inspect (default: all)
    pub schema: Option<String>,
}

/// Execute shapes command
pub fn execute(args: ShapesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SynthesisEngine::new(demo::catalog());
    let names: Vec<&str> = match &args.schema {
        Some(name) => vec![name.as_str()],
        None => demo::NAMES.to_vec(),
    };

    for name in names {
        let schema = demo::schema(name)?;
        println!("{}", schema.name());
        for kind in SettingsKind::ALL {
            match engine.type_of(&schema, kind) {
                Ok(shape) => println!("  {:<5} {}", kind.as_str(), shape),
                Err(e) => {
                    let ex: ExError = e.into();
                    println!("  {:<5} unavailable {}", kind.as_str(), ex);
                }
            }
        }
    }

    Ok(())
}
