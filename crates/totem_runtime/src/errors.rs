//! Guard failures raised by instance member access.
//!
//! Every denial carries the type name and the member that was refused. The
//! `Display` wording is shared with the runtime's embedded rendition so hosted
//! and embedded programs report identical messages.

use thiserror::Error;

/// A refused member access on an object instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The member is not declared on the type.
    #[error("{type_name}.{member} does not exist")]
    UnknownMember { type_name: String, member: String },

    /// The member is runtime bookkeeping or part of the native object protocol.
    #[error("{type_name}.{member} is internal")]
    InternalMember { type_name: String, member: String },

    /// The field's read visibility is not public.
    #[error("{type_name}.{member} is not readable")]
    PrivateRead { type_name: String, member: String },

    /// The field's write visibility is not public.
    #[error("{type_name}.{member} is not writable")]
    PrivateWrite { type_name: String, member: String },

    /// The method is declared private.
    #[error("{type_name}.{member} is a private method")]
    PrivateMethod { type_name: String, member: String },

    /// Methods are never assignment targets.
    #[error("{type_name}.{member} is a method and cannot be assigned")]
    MethodNotAssignable { type_name: String, member: String },

    /// The field's write hook refused the incoming value.
    #[error("{type_name}.{member} rejected the write")]
    RejectedWrite { type_name: String, member: String },

    /// The field's typecheck refused the incoming value.
    #[error("{type_name}.{member} typecheck failed")]
    FailedTypecheck { type_name: String, member: String },
}

impl GuardError {
    /// Return the name of the type that refused the access.
    pub fn type_name(&self) -> &str {
        match self {
            GuardError::UnknownMember { type_name, .. }
            | GuardError::InternalMember { type_name, .. }
            | GuardError::PrivateRead { type_name, .. }
            | GuardError::PrivateWrite { type_name, .. }
            | GuardError::PrivateMethod { type_name, .. }
            | GuardError::MethodNotAssignable { type_name, .. }
            | GuardError::RejectedWrite { type_name, .. }
            | GuardError::FailedTypecheck { type_name, .. } => type_name,
        }
    }

    /// Return the member whose access was refused.
    pub fn member(&self) -> &str {
        match self {
            GuardError::UnknownMember { member, .. }
            | GuardError::InternalMember { member, .. }
            | GuardError::PrivateRead { member, .. }
            | GuardError::PrivateWrite { member, .. }
            | GuardError::PrivateMethod { member, .. }
            | GuardError::MethodNotAssignable { member, .. }
            | GuardError::RejectedWrite { member, .. }
            | GuardError::FailedTypecheck { member, .. } => member,
        }
    }
}
