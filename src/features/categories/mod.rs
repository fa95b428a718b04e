pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod tree;

pub use services::CategoryService;
pub use store::{CategoryStore, PgCategoryStore};
pub use tree::CategoryTree;
