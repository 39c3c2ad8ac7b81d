//! Core reactive primitives for PlanHub.
//!
//! This crate provides the small set of building blocks the localization
//! runtime is assembled from:
//!
//! - **Signal/Slot System**: change notification with explicit and scoped
//!   disconnection
//! - **Property System**: change-detecting value cells
//! - **Logging**: `tracing` targets and span names shared by every crate
//!
//! # Signal Example
//!
//! ```
//! use planhub_core::Signal;
//!
//! let language_changed = Signal::<String>::new();
//!
//! let conn_id = language_changed.connect(|code| {
//!     println!("Language is now {code}");
//! });
//!
//! language_changed.emit("ar".to_string());
//! language_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use planhub_core::{Property, Signal};
//!
//! struct Header {
//!     height: Property<u32>,
//!     height_changed: Signal<u32>,
//! }
//!
//! impl Header {
//!     fn set_height(&self, height: u32) {
//!         if self.height.set(height) {
//!             self.height_changed.emit(height);
//!         }
//!     }
//! }
//!
//! let header = Header { height: Property::new(64), height_changed: Signal::new() };
//! header.set_height(96);
//! assert_eq!(header.height.get(), 96);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
