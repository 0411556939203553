//! Spreadsheet ingestion for the city competitor analysis.
//!
//! [`load`] reads a store-level workbook into a [`WideTable`] and validates
//! its required columns. [`detect_slot_groups`] locates the repeated
//! competitor-slot column groups, and [`to_long`] / [`to_store_summary`]
//! unpivot the table into one record per observed competitor plus one
//! summary per store.

pub mod error;
pub mod loader;
pub mod schema;
pub mod slots;
pub mod table;
pub mod unpivot;

pub use error::LoadError;
pub use loader::{load, load_with_schema};
pub use schema::{AttributeRole, ColumnSchema};
pub use slots::{detect_slot_groups, detect_slot_groups_with, SlotGroup};
pub use table::{Cell, WideTable};
pub use unpivot::{to_long, to_long_with, to_store_summary, to_store_summary_with};
