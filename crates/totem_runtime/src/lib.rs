//! Object runtime for Totem programs.
//!
//! The runtime exists twice: as this crate, for hosts that want Totem object
//! semantics natively, and as [`JS_SOURCE`], the rendition the transpiler
//! prepends to every emitted program. Both sides keep to one behavior
//! contract: tag-set enums, guarded instances with per-field visibility and
//! typechecks, string dispatch with pattern keys, pipelines with falsy
//! abstention, and leveled logging.

#![deny(clippy::unwrap_used)]

pub mod api;
pub mod dispatch;
pub mod enums;
pub mod errors;
pub mod log;
pub mod object;
pub mod pipeline;
pub mod prelude;
pub mod value;

// Re-export the working surface
pub use api::Runtime;
pub use dispatch::MatchTable;
pub use enums::EnumSet;
pub use errors::GuardError;
pub use log::{ConsoleSink, Log, LogLevel, LogSink, RecordingSink, TracingSink};
pub use object::{DATA_POINTER, FieldSpec, Instance, PrivateView, Type, TypeBuilder, TypeDescriptor, Visibility};
pub use pipeline::pipeline;
pub use value::{ArrayRef, FuncValue, Value};

/// The runtime's embedded rendition, prepended verbatim to every emitted
/// program.
pub const JS_SOURCE: &str = include_str!("../assets/runtime.js");
