//! Workspace maintenance: artifact cleanup and environment preflight.

pub mod cleanup;
pub mod env_check;
