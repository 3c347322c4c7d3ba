//! Logging facilities for swipetab.
//!
//! swipetab uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("swipetab::interaction=debug,swipetab::coordinator=debug")
//!     .init();
//! ```
//!
//! Declined gestures and cancelled transitions log at `debug`, rejected
//! overlapping transitions at `warn`, and per-frame progress at `trace`.

/// Span names used throughout swipetab.
pub mod span_names {
    /// One frame of animation driven by the host.
    pub const ADVANCE: &str = "swipetab::advance";
    /// Handling of a single pan gesture event.
    pub const PAN: &str = "swipetab::pan";
    /// Signal emission span.
    pub const SIGNAL: &str = "swipetab_core::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "swipetab_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "swipetab_core::signal";
    /// Animation strategies, property animation and animators.
    pub const ANIMATION: &str = "swipetab::animation";
    /// Touch conversion and pan recognition.
    pub const GESTURE: &str = "swipetab::gesture";
    /// Interactive transition state machine.
    pub const INTERACTION: &str = "swipetab::interaction";
    /// Tab selection and transition coordination.
    pub const COORDINATOR: &str = "swipetab::coordinator";
    /// Configuration loading and validation.
    pub const CONFIG: &str = "swipetab::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a frame or a gesture handler.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "swipetab::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
