//! Configuration types for bodies and worlds.

use crate::error::{Result, SoftBodyError};
use crate::float::Float;

/// Fixed simulation step in seconds. Each `update()` advances by exactly this much.
pub const TIMESTEP: f32 = 1.0 / 60.0;

/// Tuning parameters of a single chain.
///
/// Stiffness and damping are unitless heuristics; every point has unit mass.
///
/// # Builder Pattern
/// ```
/// use softchain::config::BodyConfig;
///
/// let config: BodyConfig<f32> = BodyConfig::new(10.0)
///     .with_stiffness(0.8)
///     .with_damping(0.98)
///     .with_gravity(false);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig<F: Float> {
    /// Rest distance between adjacent points.
    pub segment_length: F,
    /// Fraction of inferred velocity kept each step. Default: 0.98.
    pub damping: F,
    /// Scales the spring correction per step. Default: 0.8.
    pub stiffness: F,
    /// Whether gravity is applied. Default: true.
    pub gravity_enabled: bool,
    /// Downward acceleration in units/s² (+y is down). Default: 400.
    pub gravity_strength: F,
    /// Positional relaxation passes run after integration. Default: 0.
    pub relaxation_iterations: usize,
}

impl<F: Float> BodyConfig<F> {
    /// Create a config with default tuning and the given segment length.
    pub fn new(segment_length: F) -> Self {
        BodyConfig {
            segment_length,
            damping: F::from_f32(0.98),
            stiffness: F::from_f32(0.8),
            gravity_enabled: true,
            gravity_strength: F::from_f32(400.0),
            relaxation_iterations: 0,
        }
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.gravity_enabled = enabled;
        self
    }

    pub fn with_gravity_strength(mut self, strength: F) -> Self {
        self.gravity_strength = strength;
        self
    }

    /// Run `iterations` positional passes over every segment after each step.
    /// Tightens the chain towards its rest length faster than springs alone.
    pub fn with_relaxation_iterations(mut self, iterations: usize) -> Self {
        self.relaxation_iterations = iterations;
        self
    }

    /// Per-step vertical displacement caused by gravity (`strength * dt²`).
    pub fn gravity_step(&self) -> F {
        let dt = F::from_f32(TIMESTEP);
        self.gravity_strength * dt * dt
    }

    /// Reject values that would make the integrator produce garbage.
    pub fn validate(&self) -> Result<()> {
        check_finite("segment_length", self.segment_length)?;
        check_finite("stiffness", self.stiffness)?;
        check_finite("gravity_strength", self.gravity_strength)?;
        if self.segment_length < F::zero() {
            return Err(invalid("segment_length", self.segment_length));
        }
        check_damping(self.damping)
    }
}

/// Damping must lie in [0, 1].
pub(crate) fn check_damping<F: Float>(value: F) -> Result<()> {
    check_finite("damping", value)?;
    if value < F::zero() || value > F::one() {
        return Err(invalid("damping", value));
    }
    Ok(())
}

pub(crate) fn check_finite<F: Float>(name: &'static str, value: F) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn invalid<F: Float>(name: &'static str, value: F) -> SoftBodyError {
    SoftBodyError::InvalidParameter { name, value: value.to_f64() }
}

/// Configuration of a [`World`](crate::world::World).
///
/// Joints are descriptive by default; [`with_joint_resolution`](Self::with_joint_resolution)
/// turns on a positional pass over them after every body has been updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldConfig {
    /// Apply joint constraints in `World::step`. Default: false.
    pub resolve_joints: bool,
    /// Joint relaxation passes per step when enabled.
    pub joint_iterations: usize,
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the joint pass with `iterations` passes per step (at least one).
    pub fn with_joint_resolution(mut self, iterations: usize) -> Self {
        self.resolve_joints = true;
        self.joint_iterations = iterations.max(1);
        self
    }
}
