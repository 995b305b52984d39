pub mod database;
pub mod ids;
pub mod store;

pub use database::CatalogDb;
pub use ids::ProductIdGenerator;
pub use store::{MockProductStore, ProductStore};
