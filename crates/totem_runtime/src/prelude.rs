//! Prelude module for common runtime imports.
//!
//! Import this to get the whole working surface at once:
//!
//! ```ignore
//! use totem_runtime::prelude::*;
//! ```

pub use crate::api::Runtime;
pub use crate::dispatch::MatchTable;
pub use crate::enums::EnumSet;
pub use crate::errors::GuardError;
pub use crate::log::{ConsoleSink, Log, LogLevel, LogSink, RecordingSink, TracingSink};
pub use crate::object::{DATA_POINTER, FieldSpec, Instance, PrivateView, Type, TypeBuilder, TypeDescriptor, Visibility};
pub use crate::pipeline::pipeline;
pub use crate::value::{ArrayRef, FuncValue, Value};
