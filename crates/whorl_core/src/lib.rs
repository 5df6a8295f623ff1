//! The `whorl_core` crate is the numeric engine behind the Whorl scroll
//! visual: chaotic attractor vector fields, fixed-step integration into a
//! cached trajectory, and per-frame windowed sampling of that trajectory.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `VectorField` (3D
//!   flows), `Integrator` (steppers).
//! - **Attractor**: the Aizawa and Chen flows, their parameter descriptors,
//!   and per-variant generation/window presets.
//! - **Trajectory**: the fixed-step generator and the parameter-keyed cache.
//! - **Window**: the scroll- and time-driven view sampler and its render
//!   transform.

pub mod attractor;
pub mod solvers;
pub mod traits;
pub mod trajectory;
pub mod window;
