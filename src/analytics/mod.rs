//! Customer analytics queries
//!
//! Three read-only operations over the shop domain: birthday lookup, recent
//! purchaser lookup, and per-customer category demand. Input validation
//! happens before any storage access; the service never writes.

use crate::database::entities::{customers, order_items, orders, products};
use crate::database::DatabaseError;
use crate::error::AppError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType,
    QueryFilter, QuerySelect, RelationTrait, Statement,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer matched by birthday
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayCustomer {
    pub id: i32,
    pub full_name: String,
}

/// Customer with at least one order inside the recency window
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentPurchaser {
    pub id: i32,
    pub full_name: String,
    /// Most recent order date among the qualifying orders
    pub last_purchase: DateTime<Utc>,
}

/// Total quantity a customer purchased within one product category
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDemand {
    pub category: String,
    pub total_quantity: i64,
}

/// Stateless query service sharing one pooled connection
#[derive(Clone)]
pub struct AnalyticsService {
    db: DatabaseConnection,
}

impl AnalyticsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Customers whose birth date shares the month and day of `date`,
    /// ignoring the year.
    ///
    /// `None` and the `0001-01-01` sentinel both count as "no date given".
    pub async fn birthdays_on(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<BirthdayCustomer>, AppError> {
        let date = match date {
            Some(d) if !is_unset_date(d) => d,
            _ => return Err(AppError::Validation("Date cannot be empty.".to_string())),
        };

        let month = date.month() as i32;
        let day = date.day() as i32;

        // Month/day extraction has no portable SQL spelling, so the predicate
        // is raw SQL per backend. Component comparison (not full-date
        // equality) keeps leap-day birthdays matching in non-leap contexts.
        let backend = self.db.get_database_backend();
        let stmt = match backend {
            DatabaseBackend::Postgres => Statement::from_sql_and_values(
                backend,
                r#"SELECT "id", "full_name" FROM "customers"
                   WHERE EXTRACT(MONTH FROM "birth_date") = $1
                     AND EXTRACT(DAY FROM "birth_date") = $2"#,
                [month.into(), day.into()],
            ),
            DatabaseBackend::MySql => Statement::from_sql_and_values(
                backend,
                r#"SELECT `id`, `full_name` FROM `customers`
                   WHERE MONTH(`birth_date`) = ? AND DAY(`birth_date`) = ?"#,
                [month.into(), day.into()],
            ),
            DatabaseBackend::Sqlite => Statement::from_sql_and_values(
                backend,
                r#"SELECT "id", "full_name" FROM "customers"
                   WHERE CAST(strftime('%m', "birth_date") AS INTEGER) = ?
                     AND CAST(strftime('%d', "birth_date") AS INTEGER) = ?"#,
                [month.into(), day.into()],
            ),
        };

        BirthdayCustomer::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Customers with at least one order in the last `days` days, each with
    /// the most recent qualifying order date.
    ///
    /// The threshold is recomputed from wall-clock time on every call, so the
    /// window slides between requests.
    pub async fn recent_purchasers(&self, days: i64) -> Result<Vec<RecentPurchaser>, AppError> {
        if days <= 0 {
            return Err(AppError::Validation(
                "Number of days must be greater than 0.".to_string(),
            ));
        }

        let threshold = Duration::try_days(days)
            .and_then(|span| Utc::now().checked_sub_signed(span))
            .ok_or_else(|| {
                AppError::Validation(format!("Number of days is out of range: {}", days))
            })?;

        orders::Entity::find()
            .select_only()
            .column_as(customers::Column::Id, "id")
            .column_as(customers::Column::FullName, "full_name")
            .column_as(orders::Column::OrderDate.max(), "last_purchase")
            .join(JoinType::InnerJoin, orders::Relation::Customers.def())
            .filter(orders::Column::OrderDate.gte(threshold))
            .group_by(customers::Column::Id)
            .group_by(customers::Column::FullName)
            .into_model::<RecentPurchaser>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Quantity the customer purchased per product category, summed across
    /// all of their orders. Categories with zero demand are absent.
    ///
    /// Fails with [`AppError::NotFound`] when the customer does not exist; a
    /// customer without orders yields an empty list.
    pub async fn category_demand(&self, customer_id: i32) -> Result<Vec<CategoryDemand>, AppError> {
        if customer_id <= 0 {
            return Err(AppError::Validation(
                "Customer ID must be greater than 0.".to_string(),
            ));
        }

        // Existence check by primary key, before the aggregation query
        let customer = customers::Entity::find_by_id(customer_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if customer.is_none() {
            return Err(AppError::NotFound(format!(
                "Customer with id {} not found.",
                customer_id
            )));
        }

        order_items::Entity::find()
            .select_only()
            .column_as(products::Column::Category, "category")
            .column_as(order_items::Column::Quantity.sum(), "total_quantity")
            .join(JoinType::InnerJoin, order_items::Relation::Orders.def())
            .join(JoinType::InnerJoin, order_items::Relation::Products.def())
            .filter(orders::Column::CustomerId.eq(customer_id))
            .group_by(products::Column::Category)
            .into_model::<CategoryDemand>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

/// The default value of the original data source's date type, treated as
/// "not provided" rather than a valid query date.
fn is_unset_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.month() == 1 && date.day() == 1
}

fn db_err(err: sea_orm::DbErr) -> AppError {
    AppError::Database(DatabaseError::Database(err.to_string()))
}
