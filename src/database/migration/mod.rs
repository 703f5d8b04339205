use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250611_100000_create_customers_table;
mod m20250611_100100_create_products_table;
mod m20250611_100200_create_orders_table;
mod m20250611_100300_create_order_items_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250611_100000_create_customers_table::Migration),
            Box::new(m20250611_100100_create_products_table::Migration),
            Box::new(m20250611_100200_create_orders_table::Migration),
            Box::new(m20250611_100300_create_order_items_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Customers {
    Table,
    Id,
    FullName,
    BirthDate,
    RegistrationDate,
}

#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Category,
    Article,
    Price,
}

#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    OrderNumber,
    OrderDate,
    TotalCost,
    CustomerId,
}

#[derive(Iden)]
pub enum OrderItems {
    Table,
    Id,
    OrderId,
    ProductId,
    Quantity,
}
