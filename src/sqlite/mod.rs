// SQLite driver-facing code, split into two directions:
// - params: wire values going in as bind parameters
// - query: driver values coming back out as wire rows

pub mod params;
pub mod query;

// Re-export the public API
pub use params::{Params, wire_value_to_sqlite_value};
pub use query::{build_row_set, sqlite_value_to_wire};
