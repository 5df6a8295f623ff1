use crate::traits::{Integrator, Scalar, State, VectorField};

/// Explicit fixed-step Euler stepper: `state += f(state) * dt`.
///
/// Non-finite states propagate through untouched; divergence is the
/// caller's concern.
pub struct Euler<T: Scalar> {
    deriv: State<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new() -> Self {
        let z = T::from_f64(0.0).unwrap();
        Self { deriv: [z; 3] }
    }
}

impl<T: Scalar> Default for Euler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Integrator<T> for Euler<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut State<T>, dt: T) {
        field.eval(*t, state, &mut self.deriv);

        for i in 0..3 {
            state[i] = state[i] + self.deriv[i] * dt;
        }

        *t = *t + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::Euler;
    use crate::traits::{Integrator, State, VectorField};

    struct Constant {
        rate: [f64; 3],
    }

    impl VectorField<f64> for Constant {
        fn eval(&self, _t: f64, _x: &State<f64>, out: &mut State<f64>) {
            *out = self.rate;
        }
    }

    struct Decay;

    impl VectorField<f64> for Decay {
        fn eval(&self, _t: f64, x: &State<f64>, out: &mut State<f64>) {
            out[0] = -x[0];
            out[1] = -x[1];
            out[2] = -x[2];
        }
    }

    #[test]
    fn euler_advances_constant_field_linearly() {
        let field = Constant {
            rate: [1.0, 2.0, 3.0],
        };
        let mut stepper = Euler::new();
        let mut t = 0.0;
        let mut state = [0.0; 3];

        stepper.step(&field, &mut t, &mut state, 0.5);

        assert!((t - 0.5).abs() < 1e-12);
        assert!((state[0] - 0.5).abs() < 1e-12);
        assert!((state[1] - 1.0).abs() < 1e-12);
        assert!((state[2] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn euler_tracks_exponential_decay() {
        let mut stepper = Euler::new();
        let mut t = 0.0;
        let mut state = [1.0, 1.0, 1.0];

        for _ in 0..100 {
            stepper.step(&Decay, &mut t, &mut state, 0.01);
        }

        let expected = (-1.0_f64).exp();
        assert!((state[0] - expected).abs() < 1e-2);
        assert!((t - 1.0).abs() < 1e-12);
    }
}
