//! Product catalog handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::catalog::{estimate_weight, extract_dimensions};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;
use shared::models::{Product, ProductImport};
use shared::util::normalize_subcategory;

/// GET /api/products - full catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

#[derive(Serialize)]
pub struct ImportSummary {
    pub imported: usize,
}

/// POST /api/products/import - bulk upsert a supplier feed
///
/// Runs the catalog maintenance pipeline on every row: subcategory
/// normalization, dimension recovery from the reference/name, weight
/// estimation.
pub async fn import(
    State(state): State<ServerState>,
    Json(rows): Json<Vec<ProductImport>>,
) -> AppResult<Json<ImportSummary>> {
    let products: Vec<Product> = rows.into_iter().map(materialize).collect();
    let imported = state.catalog.upsert_products(products).await?;
    tracing::info!(imported, "catalog import finished");
    Ok(Json(ImportSummary { imported }))
}

/// DELETE /api/products - wipe the catalog before a full re-import
pub async fn delete_all(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<()>>> {
    state.catalog.delete_all_products().await?;
    Ok(Json(ApiResponse::ok()))
}

#[derive(Serialize)]
pub struct WeightEstimate {
    pub reference: String,
    pub weight_kg: f64,
}

/// GET /api/products/:reference/weight - logistics weight estimate
pub async fn weight(
    State(state): State<ServerState>,
    Path(reference): Path<String>,
) -> AppResult<Json<WeightEstimate>> {
    let product = state
        .catalog
        .find_by_reference(&reference)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", reference)))?;

    Ok(Json(WeightEstimate {
        weight_kg: estimate_weight(&product),
        reference,
    }))
}

/// Turn a raw feed row into a catalog product, inferring what the feed
/// left out.
fn materialize(row: ProductImport) -> Product {
    let subcategory = row
        .subcategory
        .as_deref()
        .map(normalize_subcategory)
        .filter(|s| !s.is_empty());

    // recover missing roll dimensions from the reference, then the name
    let (width, length) = match (row.width, row.length) {
        (Some(w), Some(l)) => (Some(w), Some(l)),
        _ if row.is_flexible => extract_dimensions(&row.reference)
            .or_else(|| extract_dimensions(&row.name))
            .map(|d| (Some(d.width_m), Some(d.length_m)))
            .unwrap_or((row.width, row.length)),
        _ => (row.width, row.length),
    };

    let mut product = Product {
        reference: row.reference,
        name: row.name,
        category: row.category,
        subcategory,
        is_flexible: row.is_flexible,
        price: row.price,
        price_per_m2: row.price_per_m2,
        width,
        length,
        unit: row.unit.unwrap_or_else(|| "ud".to_string()),
        in_stock: row.in_stock,
        brand: row.brand,
        finish: row.finish,
        backing: row.backing,
        adhesive: row.adhesive,
        material_type: row.material_type,
        description: row.description,
        weight: row.weight,
    };

    let estimated = estimate_weight(&product);
    if estimated > 0.0 {
        product.weight = Some(estimated);
    }
    product
}
