//! Widget controllers.
//!
//! Each controller scans its marker classes under an optional root, wires the
//! listeners it needs and returns a [`Binding`](crate::binding::Binding) that
//! owns them.

pub mod accordion;
pub mod drawer;
pub mod dropdown;
pub mod expanding_nav;
pub mod modal;
mod overlay;
pub mod site_search;
pub mod sticky;
pub mod tabs;

pub use sticky::StickyHandle;
