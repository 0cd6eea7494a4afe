//! Point to sample conversion.
//!
//! Each numeric field of a point becomes its own sample, with a sanitized
//! metric name, sanitized label keys and a stable series identity.

pub mod identity;
pub mod sample;
pub mod sanitize;

pub use identity::series_identity;
pub use sample::{Sample, SampleFlattener, Samples, RESERVED_NAME_KEY, VALUE_FIELD};
pub use sanitize::sanitize;
