//! Asset definitions for the diorama viewer.

/// JSON manifest naming the model and overriding orbit tuning and stages.
pub mod diorama_manifest;
