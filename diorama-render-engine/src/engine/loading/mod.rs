//! Manifest loading and orbit controller attachment.

/// Diorama manifest loading, validation and controller attachment.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
