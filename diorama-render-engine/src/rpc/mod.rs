//! JSON-RPC 2.0 bridge between the diorama viewer and its embedding page.
//!
//! In web builds the viewer runs in an iframe; the parent page drives it with
//! `postMessage` requests and listens for notifications, for example to update
//! a "current chapter" indicator when the stage changes.
//!
//! ```text
//! Parent page                            Viewer (iframe)
//!     │ ── request {method, id} ──────────> │ handle_rpc_request
//!     │ <───────────── response {id} ────── │
//!     │ <──── notification {method} ─────── │ stage / manual rotation changes
//! ```
//!
//! Requests without an `id` are treated as notifications and get no reply.
//! Errors use the standard codes: `-32601` method not found, `-32602`
//! invalid params, `-32603` internal error (including "controller not
//! attached").
//!
//! ## Methods
//!
//! - `get_orbit_state`: angle, normalised angle, velocity, stage, manual flag
//! - `get_stage_table`: stage rows in lookup priority order
//! - `set_auto_rotation`: change the idle rate, `{ "rate": f64 }`, `0` disables
//! - `detach_orbit`: release the orbit controller; rotation stops
//!
//! ## Notifications
//!
//! - `orbit_ready`: controller attached (`angle`, `stages`)
//! - `stage_changed`: `stage` and `previous`, `null` meaning no stage
//! - `manual_rotation_changed`: drag or arrow key rotation began or ended (`active`)
//! - `orbit_detached`: controller released (`angle`)
//!
//! Native builds have no parent page; outgoing messages are logged at debug level.

/// Message listener, request dispatch and outgoing message queue.
pub mod web_rpc;
