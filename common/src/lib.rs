//! Shared building blocks for `arpr`: address validation, configuration,
//! scan targets and local interface selection.

pub mod config;
pub mod error;
pub mod network;
pub mod validate;
