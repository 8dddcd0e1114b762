//! Animation primitives
//!
//! - Spring: damped spring toward a target value
//! - Interpolate: clamped piecewise-linear range mapping
//! - Scroll: nav bar visibility driven by scroll offsets

pub mod interpolate;
pub mod scroll;
pub mod spring;

pub use interpolate::{Interpolation, MotionError};
pub use scroll::{BarPose, NavBarConfig, ScrollDirection, ScrollVisibilityController};
pub use spring::{Spring, SpringConfig};
