//! Column map commands
//!
//! A mapping is given as a JSON object file (`--mapping-file`), as repeated
//! `--field CANONICAL=SOURCE` pairs, or both; pairs override the file.

use super::{exit_code_for, open_context};
use crate::core::use_cases::{
    add_column_map, get_column_map, get_column_maps_by_producer, update_column_mapping,
    update_column_mapping_field,
};
use crate::core::view_models::ColumnMapViewModel;
use crate::domain::{Mapping, Result as NadResult};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Parse a `CANONICAL=SOURCE` pair
fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((canonical, source)) if !canonical.is_empty() => {
            Ok((canonical.to_string(), source.to_string()))
        }
        _ => Err(format!("expected CANONICAL=SOURCE, got '{s}'")),
    }
}

/// Mapping sources shared by add and update
#[derive(Args, Debug, Default)]
pub struct MappingArgs {
    /// JSON file holding an object of canonical field to source column
    #[arg(long)]
    pub mapping_file: Option<PathBuf>,

    /// Canonical field to source column, e.g. Add_Number=address_number
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

impl MappingArgs {
    /// Build the mapping from the file and pairs
    pub fn read_mapping(&self) -> anyhow::Result<Mapping> {
        let mut mapping = match &self.mapping_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str::<Mapping>(&contents)
                    .with_context(|| format!("{} is not a JSON object of strings", path.display()))?
            }
            None => Mapping::new(),
        };
        mapping.extend(self.fields.iter().cloned());
        Ok(mapping)
    }
}

fn print_column_map(view: &ColumnMapViewModel) {
    println!("  Id: {}", view.id);
    println!("  Name: {}", view.name);
    println!("  Producer: {}", view.producer_name);
    println!("  Mapping:");
    for (canonical, source) in &view.mapping {
        println!("    {canonical:<12} <- {source}");
    }
}

fn report(result: NadResult<ColumnMapViewModel>, json: bool, heading: &str) -> anyhow::Result<i32> {
    match result {
        Ok(view) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("✅ {heading}");
                print_column_map(&view);
                println!();
            }
            Ok(0)
        }
        Err(e) => Ok(exit_code_for(&e)),
    }
}

/// Arguments for the add-column-map command
#[derive(Args, Debug)]
pub struct AddColumnMapArgs {
    /// Id of the user creating the map
    #[arg(long)]
    pub user_id: i64,

    /// Column map name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

impl AddColumnMapArgs {
    /// Execute the add-column-map command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mapping = self.mapping.read_mapping()?;
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        report(
            add_column_map(&ctx, self.user_id, &self.name, mapping).await,
            self.json,
            "Column map created",
        )
    }
}

/// Arguments for the get-column-map command
#[derive(Args, Debug)]
pub struct GetColumnMapArgs {
    /// Column map id
    pub id: i64,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

impl GetColumnMapArgs {
    /// Execute the get-column-map command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        report(get_column_map(&ctx, self.id).await, self.json, "Column map")
    }
}

/// Arguments for the list-column-maps command
#[derive(Args, Debug)]
pub struct ListColumnMapsArgs {
    /// Producer whose maps to list
    #[arg(short, long)]
    pub producer: String,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

impl ListColumnMapsArgs {
    /// Execute the list-column-maps command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let maps = match get_column_maps_by_producer(&ctx, &self.producer).await {
            Ok(maps) => maps,
            Err(e) => return Ok(exit_code_for(&e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&maps)?);
            return Ok(0);
        }

        println!("📋 Column maps for {}", self.producer);
        println!();
        for map in &maps {
            println!("  {:>4}  {} ({} fields)", map.id, map.name, map.mapping.len());
        }
        println!();
        Ok(0)
    }
}

/// Arguments for the update-column-map command
#[derive(Args, Debug)]
pub struct UpdateColumnMapArgs {
    /// Column map id
    pub id: i64,

    #[command(flatten)]
    pub mapping: MappingArgs,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

impl UpdateColumnMapArgs {
    /// Execute the update-column-map command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mapping = self.mapping.read_mapping()?;
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        report(
            update_column_mapping(&ctx, self.id, mapping).await,
            self.json,
            "Column map replaced",
        )
    }
}

/// Arguments for the update-column-map-field command
#[derive(Args, Debug)]
pub struct UpdateColumnMapFieldArgs {
    /// Column map id
    pub id: i64,

    /// Canonical field to change
    pub canonical_field: String,

    /// New source column for the field
    pub source_column: String,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

impl UpdateColumnMapFieldArgs {
    /// Execute the update-column-map-field command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        report(
            update_column_mapping_field(&ctx, self.id, &self.source_column, &self.canonical_field)
                .await,
            self.json,
            "Column map field updated",
        )
    }
}
