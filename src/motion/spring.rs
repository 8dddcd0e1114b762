//! Damped spring animation
//!
//! Integrates a mass-spring-damper toward a target with fixed sub-steps so
//! large frame gaps stay stable. Snaps to the target once both speed and
//! displacement fall below the rest thresholds.

use std::time::Duration;

/// Largest integration step in seconds
const MAX_STEP: f32 = 1.0 / 240.0;

/// Spring tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Speed (units/s) under which the spring may come to rest
    pub rest_speed: f32,
    /// Distance from target under which the spring may come to rest
    pub rest_displacement: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        // Slightly under critical damping: a small bounce, then settle.
        Self {
            stiffness: 180.0,
            damping: 22.0,
            mass: 1.0,
            rest_speed: 0.5,
            rest_displacement: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    config: SpringConfig,
    at_rest: bool,
}

impl Spring {
    /// Spring resting at `value`
    pub fn new(value: f32, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
            at_rest: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        !self.at_rest
    }

    /// Start moving toward `target`, keeping current velocity
    pub fn animate_to(&mut self, target: f32) {
        self.target = target;
        self.at_rest = self.value == target && self.velocity == 0.0;
    }

    /// Teleport to `value` and stop
    pub fn jump_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advance the simulation by `dt`, returning the new value
    pub fn step(&mut self, dt: Duration) -> f32 {
        if self.at_rest {
            return self.value;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let mass = if mass > 0.0 { mass } else { 1.0 };

        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let force = -stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.velocity.abs() < self.config.rest_speed
            && (self.value - self.target).abs() < self.config.rest_displacement
        {
            self.jump_to(self.target);
        }

        self.value
    }
}
