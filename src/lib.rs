pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, InvoiceError};
pub use models::{PickupRecord, StorageInvoice, StorageType};
pub use service::{calculate, invoice_number};
