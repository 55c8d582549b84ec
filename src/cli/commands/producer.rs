//! Data producer commands
//!
//! `add-producer` and `list-producers`.

use super::{exit_code_for, open_context};
use crate::core::context::ApplicationContext;
use crate::core::use_cases::{add_data_provider, list_data_providers};
use clap::Args;

/// Arguments for the add-producer command
#[derive(Args, Debug)]
pub struct AddProducerArgs {
    /// Unique producer name
    pub name: String,
}

impl AddProducerArgs {
    /// Execute the add-producer command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match open_context(config_path).await {
            Ok(ctx) => self.run(&ctx).await,
            Err(code) => Ok(code),
        }
    }

    /// Register the producer in an open context
    pub(crate) async fn run(&self, ctx: &ApplicationContext) -> anyhow::Result<i32> {
        let existing = match ctx.providers().get_by_name(&self.name).await {
            Ok(existing) => existing,
            Err(e) => return Ok(exit_code_for(&e)),
        };

        if let Err(e) = add_data_provider(ctx, &self.name).await {
            return Ok(exit_code_for(&e));
        }

        if existing.is_some() {
            println!("❌ Producer already registered: {}", self.name);
            return Ok(1);
        }

        match ctx.providers().get_by_name(&self.name).await {
            Ok(Some(producer)) => {
                println!("✅ Producer registered: {}", producer.name);
                Ok(0)
            }
            Ok(None) => {
                println!("❌ Producer was not registered (see log for details)");
                Ok(1)
            }
            Err(e) => Ok(exit_code_for(&e)),
        }
    }
}

/// Arguments for the list-producers command
#[derive(Args, Debug)]
pub struct ListProducersArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListProducersArgs {
    /// Execute the list-producers command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match open_context(config_path).await {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let producers = match list_data_providers(&ctx).await {
            Ok(p) => p,
            Err(e) => return Ok(exit_code_for(&e)),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&producers)?);
            return Ok(0);
        }

        if producers.is_empty() {
            println!("No producers registered.");
            println!("Run 'nad-ch add-producer <NAME>' to register one.");
            return Ok(0);
        }

        println!("📋 Data producers");
        println!();
        for producer in &producers {
            println!("  {:>4}  {}", producer.id, producer.name);
        }
        println!();
        Ok(0)
    }
}
