//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, Envelope, created, ok};

/// Query params for the product listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// `{success, products}`
#[derive(Serialize)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

/// `{success, product}`
#[derive(Serialize)]
pub struct ProductPayload {
    pub product: Product,
}

/// GET /api/products - 商品列表 (可按分类/搜索过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Envelope<ProductsPayload>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_filtered(query.category, query.search).await?;
    Ok(ok(ProductsPayload { products }))
}

/// GET /api/products/:id - 单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<ProductPayload>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(ok(ProductPayload { product }))
}

/// POST /api/products - 创建商品 (seeding/admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Envelope<ProductPayload>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;
    Ok(created(ProductPayload { product }, "Product created"))
}
