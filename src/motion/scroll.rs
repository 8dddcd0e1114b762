//! Scroll-reactive visibility for the floating navigation bar
//!
//! Scroll offsets come in from whichever screen is active. A direction change
//! whose sample-to-sample delta beats the hysteresis threshold latches the new
//! direction and springs the bar offset toward its resting position: hidden
//! (`bar_height`) while scrolling down, visible (`0`) while scrolling up.
//! Translation and opacity are derived from that offset through clamped
//! interpolation, so spring overshoot never leaks into the outputs.
//!
//! Every [`ScrollVisibilityController::tick`] publishes the current
//! [`BarPose`] on a watch channel; the bar renderer subscribes to it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

use super::interpolate::{Interpolation, MotionError};
use super::spring::{Spring, SpringConfig};

/// Latched scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    /// Content moving toward the top; bar visible
    #[default]
    Up,
    /// Content moving toward the bottom; bar hidden
    Down,
}

/// Tuning for the nav bar animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavBarConfig {
    /// Height of the bar in scroll units
    pub bar_height: f32,
    /// Extra travel past the bar height when hidden
    pub hide_margin: f32,
    /// Minimum per-event delta that may flip the latched direction
    pub threshold: f32,
    /// Opacity when fully hidden
    pub hidden_opacity: f32,
    pub stiffness: f32,
    pub damping: f32,
    /// Scroll units per terminal row
    pub units_per_line: f32,
}

impl Default for NavBarConfig {
    fn default() -> Self {
        let spring = SpringConfig::default();
        Self {
            bar_height: 65.0,
            hide_margin: 20.0,
            threshold: 20.0,
            hidden_opacity: 0.7,
            stiffness: spring.stiffness,
            damping: spring.damping,
            units_per_line: 24.0,
        }
    }
}

impl NavBarConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        let invalid = |msg: &str| Err(MotionError::InvalidConfig(msg.to_string()));

        if !(self.bar_height.is_finite() && self.bar_height > 0.0) {
            return invalid("bar_height must be positive");
        }
        if !(self.hide_margin.is_finite() && self.hide_margin >= 0.0) {
            return invalid("hide_margin must not be negative");
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return invalid("threshold must not be negative");
        }
        if !(0.0..=1.0).contains(&self.hidden_opacity) {
            return invalid("hidden_opacity must be within 0.0..=1.0");
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return invalid("stiffness must be positive");
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return invalid("damping must not be negative");
        }
        if !(self.units_per_line.is_finite() && self.units_per_line > 0.0) {
            return invalid("units_per_line must be positive");
        }
        Ok(())
    }

    /// Full translation when hidden
    pub fn hidden_translate(&self) -> f32 {
        self.bar_height + self.hide_margin
    }

    fn spring(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.stiffness,
            damping: self.damping,
            ..SpringConfig::default()
        }
    }
}

/// Derived bar outputs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPose {
    /// Downward translation in scroll units
    pub translate_y: f32,
    /// 0.0 - 1.0
    pub opacity: f32,
}

impl BarPose {
    pub const VISIBLE: BarPose = BarPose {
        translate_y: 0.0,
        opacity: 1.0,
    };
}

impl Default for BarPose {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Drives the nav bar pose from scroll offsets
#[derive(Debug)]
pub struct ScrollVisibilityController {
    config: NavBarConfig,
    last_y: f32,
    direction: ScrollDirection,
    offset: Spring,
    translate: Interpolation,
    opacity: Interpolation,
    pose_tx: watch::Sender<BarPose>,
}

impl ScrollVisibilityController {
    pub fn new(config: NavBarConfig) -> Result<Self, MotionError> {
        config.validate()?;

        let h = config.bar_height;
        let translate = Interpolation::new(&[0.0, h], &[0.0, config.hidden_translate()])?;
        let opacity = Interpolation::new(&[0.0, h / 2.0, h], &[1.0, 0.9, config.hidden_opacity])?;
        let (pose_tx, _) = watch::channel(BarPose::VISIBLE);

        Ok(Self {
            config,
            last_y: 0.0,
            direction: ScrollDirection::Up,
            offset: Spring::new(0.0, config.spring()),
            translate,
            opacity,
            pose_tx,
        })
    }

    pub fn config(&self) -> &NavBarConfig {
        &self.config
    }

    /// Feed a scroll offset. Returns true if a new animation started.
    pub fn on_scroll(&mut self, y: f32) -> bool {
        if !y.is_finite() {
            return false;
        }

        let delta = y - self.last_y;
        self.last_y = y;

        if delta.abs() <= self.config.threshold {
            return false;
        }

        let direction = if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        if direction == self.direction {
            return false;
        }

        self.direction = direction;
        let target = match direction {
            ScrollDirection::Down => self.config.bar_height,
            ScrollDirection::Up => 0.0,
        };
        debug!(?direction, delta, target, "nav bar direction latched");
        self.offset.animate_to(target);
        true
    }

    /// Move the origin to `y` without evaluating a delta.
    ///
    /// An origin at the top of the content reveals the bar: a screen resting
    /// there may never scroll, so it could not produce an upward delta.
    /// Returns true if a reveal animation started.
    pub fn rebase(&mut self, y: f32) -> bool {
        if !y.is_finite() {
            return false;
        }
        self.last_y = y;

        if y > 0.0 || self.direction == ScrollDirection::Up {
            return false;
        }
        self.direction = ScrollDirection::Up;
        debug!("nav bar revealed at top of new screen");
        self.offset.animate_to(0.0);
        true
    }

    /// Advance the animation and publish the resulting pose
    pub fn tick(&mut self, dt: Duration) -> BarPose {
        self.offset.step(dt);
        let pose = self.pose();
        self.pose_tx.send_if_modified(|current| {
            if *current != pose {
                *current = pose;
                true
            } else {
                false
            }
        });
        pose
    }

    /// Pose for the current animated offset
    pub fn pose(&self) -> BarPose {
        let offset = self.offset.value();
        BarPose {
            translate_y: self.translate.map(offset),
            opacity: self.opacity.map(offset),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BarPose> {
        self.pose_tx.subscribe()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn last_offset(&self) -> f32 {
        self.last_y
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }
}
