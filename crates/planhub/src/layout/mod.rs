//! Layout synchronization between rendered elements and style variables.

mod events;
mod header;

pub use events::{LayoutEvents, Mutation, ViewportSize};
pub use header::{
    HeaderElement, HeaderHeightSync, HeaderMetrics, HeaderRef, DEFAULT_SPACING_OFFSET,
    HEADER_HEIGHT_VAR, HEADER_SPACING_VAR,
};
