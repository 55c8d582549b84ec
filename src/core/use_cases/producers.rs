//! Data provider management
//!
//! Both operations report invalid input through the log only.

use crate::core::context::ApplicationContext;
use crate::core::view_models::DataProducerViewModel;
use crate::domain::{DataProvider, Result};
use crate::log_soft_failure;

/// Register a new data provider
///
/// Logs an error and creates nothing if `provider_name` is empty or already
/// registered.
///
/// # Errors
///
/// Returns an error only if the repository fails.
pub async fn add_data_provider(ctx: &ApplicationContext, provider_name: &str) -> Result<()> {
    if provider_name.is_empty() {
        log_soft_failure!("add_data_provider", "Provider name required");
        return Ok(());
    }

    if ctx.providers().get_by_name(provider_name).await?.is_some() {
        log_soft_failure!("add_data_provider", "Provider name must be unique");
        return Ok(());
    }

    let provider = ctx.providers().add(DataProvider::new(provider_name)).await?;
    tracing::info!(provider = %provider.name, id = ?provider.id, "Provider added");
    Ok(())
}

/// All providers in the order they were added
///
/// # Errors
///
/// Returns an error only if the repository fails.
pub async fn list_data_providers(ctx: &ApplicationContext) -> Result<Vec<DataProducerViewModel>> {
    let providers = ctx.providers().get_all().await?;

    tracing::info!("Data Provider Names:");
    for provider in &providers {
        tracing::info!("{}", provider.name);
    }

    Ok(providers.iter().map(DataProducerViewModel::from).collect())
}
