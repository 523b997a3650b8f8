//! Role-based route gates.

pub mod enforcer;

pub use enforcer::RbacEnforcer;
