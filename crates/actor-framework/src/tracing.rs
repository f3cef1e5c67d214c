//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber once, at program start.
//!
//! Log levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle events: Created, Updated, Action ok, Shutdown
//! RUST_LOG=debug cargo run    # adds request payloads and every stock adjustment
//! RUST_LOG=inventory=debug,actor_framework=info cargo run
//! ```
//!
//! The actor loop records `entity_type` and `id` on every event, so module paths are hidden
//! (`with_target(false)`) and the compact format shows spans inline:
//!
//! ```text
//! INFO create_order: Created entity_type="Order" id=order_1 size=1
//! ```

/// Initialises the global subscriber. Returns quietly if one is already installed,
/// so tests and binaries can both call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
