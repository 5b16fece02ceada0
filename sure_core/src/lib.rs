//! Variant expansion and count normalization for SuRE fragment count tables
//!
//! A fragment table is first reduced to one row per (fragment, variant) by
//! [`expand_and_dedup`].  Condition counts are then scaled by each fragment's
//! integration (iPCR) count and rescaled by library wide totals with
//! [`normalize`], and finally tagged with the library name.

#[macro_use]
extern crate log;

pub mod error;
pub mod expand;
pub mod normalize;
pub mod table;
pub mod tag;
pub mod totals;
pub mod variant;

pub use error::{Result, SureError};
pub use expand::{drop_duplicates, expand_and_dedup, expand_variants};
pub use normalize::{norm_column_name, normalize, DEFAULT_NORM_PREFIX};
pub use table::{is_missing, read_table, write_table, Table};
pub use tag::{tag_library, DEFAULT_LIBRARY_COLUMN};
pub use totals::{read_totals, sum_columns, write_totals, Totals, DEFAULT_IPCR_COLUMN};
pub use variant::{VariantLayout, VariantTuple, PRIMARY_VARIANT_COLUMN, VARIANT_COLUMNS};
