//! Data layer
//!
//! Envelope and row types, the tolerant loader, and the fetchers it runs on.

pub mod age;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod types;

#[cfg(feature = "native")]
pub mod fs;
#[cfg(feature = "native")]
pub mod http;

pub use age::{data_age, data_age_at};
pub use error::{DataError, DataResult};
pub use fetch::{Fetch, FetchResponse};
pub use loader::{DataLoader, DATA_BASE_PATH, MONTHLY_DATA_FILE};
pub use types::{
    field_names, parse_timestamp, BudgetDataRow, DataFile, DataMetadata, FieldValue, MonthlyDataRow,
    Record, Row,
};

#[cfg(feature = "native")]
pub use fs::FsFetcher;
#[cfg(feature = "native")]
pub use http::HttpFetcher;
