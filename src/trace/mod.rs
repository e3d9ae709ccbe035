//! Trace data model and acquisition seam
//!
//! Defines the raw and canonical forms of a drawn glyph, and the
//! [`CoordinateSource`] trait through which traces enter the system.

pub mod source;
pub mod types;

pub use source::{CoordinateSource, PromptSource, TraceFileSource};
pub use types::{CanonicalShape, RawTrace, TracePoint};
