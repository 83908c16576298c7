//! Infrastructure Layer - Trace Ingestion
//!
//! Plain serde descriptors filled in by the external trace reader and
//! converted into domain events. The storage format itself is not read
//! here.

pub mod trace_record;

pub use trace_record::{RawDependency, RawEvent};
