use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars when evaluating and
/// integrating vector fields. Trajectories are stored as `f64`; the
/// abstraction keeps single-precision evaluation possible for consumers
/// that want it.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// State vector of a three-dimensional flow.
pub type State<T> = [T; 3];

/// An autonomous three-dimensional vector field, dx/dt = f(x).
pub trait VectorField<T: Scalar> {
    /// Evaluates the field.
    /// x: current state
    /// t: current time (unused by autonomous flows, kept for the seam)
    /// out: buffer to write dx/dt into
    fn eval(&self, t: T, x: &State<T>, out: &mut State<T>);
}

/// A trait for steppers that advance a state through a field.
pub trait Integrator<T: Scalar> {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state: current state (updated after step)
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut State<T>, dt: T);
}
