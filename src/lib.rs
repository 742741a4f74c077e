//! Verlet soft-body chains for games.
//!
//! `softchain` simulates 2D chains of points held together by springs: ropes,
//! tails, tentacles, dangling signs. Each chain integrates with Verlet steps
//! (velocity is implied by the previous position), points can be pinned,
//! teleported or re-laid out, and points of different chains can be joined.
//!
//! # Features
//!
//! - **Fixed-step integrator**: one call to `update()` is one 1/60 s frame
//! - **Springs with damping**: tunable stiffness and damping per chain
//! - **Editing**: pin, teleport, append, remove, straighten, translate
//! - **Joints**: records between points of two chains, optionally resolved
//! - **World**: handle-keyed registry that owns bodies and prunes joints
//! - **Observable**: watch updates via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod constraint;
pub mod config;
pub mod softbody;
pub mod joint;
pub mod world;
pub mod observer;
pub mod render;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use point::Point;
pub use constraint::{relax_distance, spring_force, MIN_DISTANCE};
pub use config::{BodyConfig, WorldConfig, TIMESTEP};
pub use softbody::{Direction, SoftBody};
pub use joint::{BodyHandle, Joint};
pub use world::World;
pub use observer::{NoOpStepObserver, StepObserver};
pub use render::LineTarget;
pub use error::{Result, SoftBodyError};
