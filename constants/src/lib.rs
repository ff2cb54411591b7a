//! Fixed tuning values shared by the diorama viewer.

pub mod orbit;
pub mod stage;
