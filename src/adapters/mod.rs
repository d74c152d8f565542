// Adapters layer: concrete implementations for external systems (csv input, http api, storage).

pub mod csv_source;
pub mod http;
pub mod storage;

pub use csv_source::CsvMovementSource;
pub use http::RebootClient;
pub use storage::LocalStorage;
