//! The `methods` subcommand: list the callable API methods.

use anyhow::Result;
use googlecore::MAPS;

use crate::output::{print_methods_json, print_methods_table, OutputFormat};

pub fn run(format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_methods_table(&MAPS),
        OutputFormat::Json => print_methods_json(&MAPS),
    }
    Ok(())
}
