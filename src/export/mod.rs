pub mod csv;
pub mod text;

pub use self::csv::write_invoices;
pub use self::text::render_invoice;
