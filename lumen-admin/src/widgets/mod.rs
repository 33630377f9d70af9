//! Reusable widget components.

pub mod data_table;
pub mod modal;

pub use data_table::DataTableWidget;
pub use modal::ConfirmModal;
