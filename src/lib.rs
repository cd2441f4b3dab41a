pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use services::CatalogStore;
