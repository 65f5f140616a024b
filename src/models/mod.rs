pub mod invoice;
pub mod pickup;
pub mod storage_type;

pub use invoice::{CompanyTotal, InvoiceSummary, StorageInvoice};
pub use pickup::{PickupRecord, RawTimestamp};
pub use storage_type::StorageType;
