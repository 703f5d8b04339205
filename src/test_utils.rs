//! Shared helpers for unit and integration tests

use crate::{
    config::Config,
    database::{
        Database,
        entities::{customers, order_items, orders, products},
    },
    server::Server,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set};

/// Test server builder using an in-memory SQLite database
pub struct TestServerBuilder {
    config: Config,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.logging.request_logging = false;
        Self { config }
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the test server with migrations applied
    pub async fn build(self) -> Server {
        let server = Server::new(self.config).await.unwrap();
        server.database.migrate().await.unwrap();
        server
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh in-memory database with the schema applied
pub async fn setup_test_db() -> Database {
    let mut config = crate::database::DatabaseConfig::default();
    config.url = "sqlite::memory:".to_string();

    let database = Database::connect(&config).await.unwrap();
    database.migrate().await.unwrap();
    database
}

pub async fn seed_customer(
    db: &DatabaseConnection,
    full_name: &str,
    birth_date: NaiveDate,
) -> customers::Model {
    customers::ActiveModel {
        id: NotSet,
        full_name: Set(full_name.to_string()),
        birth_date: Set(birth_date),
        registration_date: Set(Utc::now().date_naive()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    category: &str,
    article: &str,
) -> products::Model {
    products::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        category: Set(category.to_string()),
        article: Set(article.to_string()),
        price: Set(Decimal::new(999, 2)),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_order(
    db: &DatabaseConnection,
    customer_id: i32,
    order_number: &str,
    order_date: DateTime<Utc>,
) -> orders::Model {
    orders::ActiveModel {
        id: NotSet,
        order_number: Set(order_number.to_string()),
        order_date: Set(order_date),
        total_cost: Set(Decimal::new(10000, 2)),
        customer_id: Set(customer_id),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_order_item(
    db: &DatabaseConnection,
    order_id: i32,
    product_id: i32,
    quantity: i32,
) -> order_items::Model {
    order_items::ActiveModel {
        id: NotSet,
        order_id: Set(order_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
    }
    .insert(db)
    .await
    .unwrap()
}
