//! API handlers. Users and products are fixed mock data; nothing is stored.

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{HealthStatus, Message, Product, UserBase, UserCreate, UserResponse};
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

fn john() -> UserBase {
    UserBase {
        email: "john@example.com".to_string(),
        full_name: Some("John Doe".to_string()),
    }
}

/// Health check endpoint
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

/// Retrieve all users with pagination.
pub async fn list_users(ApiQuery(page): ApiQuery<Pagination>) -> Json<Vec<UserResponse>> {
    let users = vec![UserResponse::active(1, john())];
    Json(users.into_iter().skip(page.skip).take(page.limit).collect())
}

/// Get a specific user by ID. Only user 1 exists.
pub async fn get_user(ApiPath(user_id): ApiPath<i64>) -> Result<Json<UserResponse>, ApiError> {
    check_user_id(user_id)?;
    if user_id != 1 {
        return Err(ApiError::UserNotFound);
    }
    Ok(Json(UserResponse::active(user_id, john())))
}

pub async fn create_user(
    ApiJson(user): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    user.validate()?;
    tracing::info!(email = %user.base.email, "created user");
    Ok((StatusCode::CREATED, Json(UserResponse::active(2, user.base))))
}

pub async fn update_user(
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(user): ApiJson<UserBase>,
) -> Json<UserResponse> {
    Json(UserResponse::active(user_id, user))
}

pub async fn delete_user(ApiPath(user_id): ApiPath<i64>) -> Json<Message> {
    Json(Message {
        message: format!("User {user_id} deleted successfully"),
    })
}

/// Get all products, optionally filtered by category.
pub async fn list_products(ApiQuery(filter): ApiQuery<ProductFilter>) -> Json<Vec<Product>> {
    let products = vec![
        Product {
            id: 1,
            name: "Laptop".to_string(),
            price: 999.99,
            category: Some("Electronics".to_string()),
        },
        Product {
            id: 2,
            name: "Book".to_string(),
            price: 19.99,
            category: Some("Books".to_string()),
        },
    ];

    let products = match filter.category.as_deref() {
        Some(category) if !category.is_empty() => products
            .into_iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect(),
        _ => products,
    };
    Json(products)
}

fn check_user_id(user_id: i64) -> Result<(), ApiError> {
    if user_id > 0 {
        Ok(())
    } else {
        Err(ApiError::InvalidParameter {
            name: "user_id",
            reason: "must be greater than 0",
        })
    }
}
