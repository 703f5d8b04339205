use crate::{
    analytics::{BirthdayCustomer, CategoryDemand, RecentPurchaser},
    error::AppError,
    routes::ApiErrorResponse,
    server::Server,
};
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct BirthdaysQuery {
    /// Calendar date to match birthdays against (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentQuery {
    /// Size of the recency window in days (must be greater than 0)
    pub days: Option<i64>,
}

/// Create customer analytics routes
pub fn create_customer_routes() -> Router<Server> {
    Router::new()
        .route("/customers/birthdays", get(birthday_customers))
        .route("/customers/recent", get(recent_customers))
        .route(
            "/customers/{customer_id}/categories",
            get(demanded_categories),
        )
}

/// List customers whose birthday falls on the given date
#[utoipa::path(
    get,
    path = "/customers/birthdays",
    summary = "Customers by birthday",
    description = "List customers whose birth date shares the month and day of the given date, ignoring the year",
    params(BirthdaysQuery),
    responses(
        (status = 200, description = "Matching customers", body = Vec<BirthdayCustomer>),
        (status = 400, description = "Date missing or unset", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn birthday_customers(
    State(server): State<Server>,
    Query(params): Query<BirthdaysQuery>,
) -> Result<Json<Vec<BirthdayCustomer>>, AppError> {
    let customers = server.analytics.birthdays_on(params.date).await?;
    Ok(Json(customers))
}

/// List customers who purchased within the last N days
#[utoipa::path(
    get,
    path = "/customers/recent",
    summary = "Recent purchasers",
    description = "List customers with at least one order in the last N days, with their most recent qualifying order date",
    params(RecentQuery),
    responses(
        (status = 200, description = "Customers with qualifying orders", body = Vec<RecentPurchaser>),
        (status = 400, description = "Days missing or not positive", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn recent_customers(
    State(server): State<Server>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<RecentPurchaser>>, AppError> {
    // An absent parameter binds to zero, which fails validation downstream
    let customers = server
        .analytics
        .recent_purchasers(params.days.unwrap_or(0))
        .await?;
    Ok(Json(customers))
}

/// List product categories purchased by a customer with total quantities
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/categories",
    summary = "Category demand",
    description = "Total quantity purchased by the customer per product category",
    params(
        ("customer_id" = i32, Path, description = "Customer identifier")
    ),
    responses(
        (status = 200, description = "Per-category totals", body = Vec<CategoryDemand>),
        (status = 400, description = "Customer ID not positive", body = ApiErrorResponse),
        (status = 404, description = "Customer not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse)
    ),
    tag = "Customers"
)]
pub async fn demanded_categories(
    State(server): State<Server>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<CategoryDemand>>, AppError> {
    let categories = server.analytics.category_demand(customer_id).await?;
    Ok(Json(categories))
}
