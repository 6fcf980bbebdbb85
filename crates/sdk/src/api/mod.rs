//! API endpoint groups.

pub mod scans;

pub use scans::ScansApi;
