//! Record normalization
//!
//! Discovered payloads arrive with whatever field names the source API uses.
//! Each canonical field is read from an ordered list of candidate keys, enum
//! strings go through alias tables, and anything left over is kept in
//! `metadata`.

mod aliases;
mod fields;
mod normalizer;
mod timestamps;

pub use aliases::{priority_from_alias, status_from_alias};
pub use fields::content_id;
pub use normalizer::RecordNormalizer;
pub use timestamps::{parse_timestamp, parse_timestamp_str};
