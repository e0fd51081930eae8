pub mod models;
pub mod normalize;

pub use models::{Column, HomeAway, RawRow, RawTable, RawValue, Record, TotalsHint};
pub use normalize::normalize_all;
