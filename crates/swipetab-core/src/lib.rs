//! Core systems for swipetab.
//!
//! This crate provides the plumbing the tab-switching component is built on:
//!
//! - **Geometry**: [`Point`], [`Size`] and [`Rect`] in container coordinates
//! - **Signal/Slot System**: [`Signal`] for notifying the host application
//! - **Thread Affinity**: [`ThreadAffinity`] for UI-thread-bound state
//! - **Logging**: tracing targets and span helpers
//!
//! # Signal Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use swipetab_core::Signal;
//!
//! let interaction_finished = Signal::<()>::new();
//! let finished = Arc::new(AtomicUsize::new(0));
//!
//! let counter = finished.clone();
//! interaction_finished.connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! interaction_finished.emit(());
//! assert_eq!(finished.load(Ordering::SeqCst), 1);
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::{CoreError, CoreResult};
pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal, SignalBlocker};
pub use thread_check::ThreadAffinity;
