//! Column map management
//!
//! Unlike provider and submission use cases, these fail hard: an unknown user,
//! map or producer, or a non-canonical field, is returned as an error.

use crate::core::context::ApplicationContext;
use crate::core::view_models::ColumnMapViewModel;
use crate::domain::{ColumnMap, Mapping, NadError, Result};

/// Create a column map owned by the user's producer
///
/// # Errors
///
/// Returns [`NadError::Validation`] if the user does not exist or any mapping
/// key is not a canonical field. Nothing is persisted in either case.
pub async fn add_column_map(
    ctx: &ApplicationContext,
    user_id: i64,
    name: &str,
    mapping: Mapping,
) -> Result<ColumnMapViewModel> {
    let user = ctx
        .users()
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| NadError::Validation(format!("User with id {user_id} does not exist")))?;

    let column_map = ColumnMap::new(name, user.producer, mapping)?;
    let column_map = ctx.column_maps().add(column_map).await?;

    tracing::info!(
        id = ?column_map.id,
        name = %column_map.name,
        producer = %column_map.producer.name,
        "Column map added"
    );
    Ok(ColumnMapViewModel::from(&column_map))
}

async fn load(ctx: &ApplicationContext, id: i64) -> Result<ColumnMap> {
    ctx.column_maps()
        .get_by_id(id)
        .await?
        .ok_or_else(|| NadError::NotFound(format!("Column map with id {id} does not exist")))
}

/// Fetch one column map
///
/// # Errors
///
/// Returns [`NadError::NotFound`] if no map has `id`.
pub async fn get_column_map(ctx: &ApplicationContext, id: i64) -> Result<ColumnMapViewModel> {
    let column_map = load(ctx, id).await?;
    Ok(ColumnMapViewModel::from(&column_map))
}

/// All column maps owned by a producer, oldest first
///
/// # Errors
///
/// Returns [`NadError::NotFound`] if no producer has `producer_name`.
pub async fn get_column_maps_by_producer(
    ctx: &ApplicationContext,
    producer_name: &str,
) -> Result<Vec<ColumnMapViewModel>> {
    let producer = ctx
        .producers()
        .get_by_name(producer_name)
        .await?
        .ok_or_else(|| {
            NadError::NotFound(format!("Producer with name {producer_name} does not exist"))
        })?;

    let column_maps = ctx.column_maps().get_by_producer(&producer).await?;
    Ok(column_maps.iter().map(ColumnMapViewModel::from).collect())
}

/// Replace a column map's whole mapping
///
/// # Errors
///
/// Returns [`NadError::NotFound`] for an unknown id, or
/// [`NadError::Validation`] if any key is not canonical; the stored map is left
/// unchanged on error.
pub async fn update_column_mapping(
    ctx: &ApplicationContext,
    id: i64,
    new_mapping: Mapping,
) -> Result<ColumnMapViewModel> {
    let mut column_map = load(ctx, id).await?;
    column_map.replace_mapping(new_mapping)?;
    let column_map = ctx.column_maps().update(column_map).await?;

    tracing::info!(id, name = %column_map.name, "Column map updated");
    Ok(ColumnMapViewModel::from(&column_map))
}

/// Point one canonical field at a new source column
///
/// The field is inserted if the map does not have it yet.
///
/// # Errors
///
/// Returns [`NadError::NotFound`] for an unknown id, or
/// [`NadError::Validation`] if `canonical_field` is not canonical.
pub async fn update_column_mapping_field(
    ctx: &ApplicationContext,
    id: i64,
    new_source_column: &str,
    canonical_field: &str,
) -> Result<ColumnMapViewModel> {
    let mut column_map = load(ctx, id).await?;
    column_map.set_field(canonical_field, new_source_column)?;
    let column_map = ctx.column_maps().update(column_map).await?;

    tracing::info!(
        id,
        field = canonical_field,
        source_column = new_source_column,
        "Column map field updated"
    );
    Ok(ColumnMapViewModel::from(&column_map))
}
