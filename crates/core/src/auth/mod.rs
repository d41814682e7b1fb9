//! Caller identity and ownership checks.
//!
//! Identity is resolved by the transport layer and handed in explicitly;
//! nothing here reads ambient state.

mod context;
mod guard;

pub use context::AuthContext;
pub use guard::AuthorizationGuard;
