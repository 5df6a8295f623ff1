use crate::traits::{Scalar, State, VectorField};
use crate::trajectory::GeneratorConfig;
use crate::window::{WindowConfig, WindowMode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttractorError {
    #[error("Unknown attractor \"{0}\".")]
    UnknownAttractor(String),
    #[error("Unknown parameter \"{name}\" for the {kind:?} attractor.")]
    UnknownParameter { kind: AttractorKind, name: String },
    #[error("The {kind:?} attractor takes {expected} parameters, got {got}.")]
    ParameterCount {
        kind: AttractorKind,
        expected: usize,
        got: usize,
    },
}

/// Slider metadata for one coefficient: the channel the page exposes for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

const AIZAWA_SPECS: [ParamSpec; 6] = [
    ParamSpec {
        name: "a",
        min: 0.0,
        max: 2.0,
        step: 0.01,
        default: 0.95,
    },
    ParamSpec {
        name: "b",
        min: 0.0,
        max: 2.0,
        step: 0.01,
        default: 0.7,
    },
    ParamSpec {
        name: "c",
        min: 0.0,
        max: 2.0,
        step: 0.01,
        default: 0.6,
    },
    ParamSpec {
        name: "d",
        min: 0.0,
        max: 5.0,
        step: 0.05,
        default: 3.5,
    },
    ParamSpec {
        name: "e",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.25,
    },
    ParamSpec {
        name: "f",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.1,
    },
];

const CHEN_SPECS: [ParamSpec; 3] = [
    ParamSpec {
        name: "a",
        min: 30.0,
        max: 50.0,
        step: 0.5,
        default: 40.0,
    },
    ParamSpec {
        name: "b",
        min: 1.0,
        max: 8.0,
        step: 0.1,
        default: 3.0,
    },
    ParamSpec {
        name: "c",
        min: 20.0,
        max: 35.0,
        step: 0.5,
        default: 28.0,
    },
];

/// The Aizawa flow:
///   x' = (z - b)x - d*y
///   y' = d*x + (z - b)y
///   z' = c + az - z^3/3 - (x^2 + y^2)(1 + ez) + fzx^3
pub struct Aizawa<T> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
    pub e: T,
    pub f: T,
}

impl<T: Scalar> VectorField<T> for Aizawa<T> {
    fn eval(&self, _t: T, x: &State<T>, out: &mut State<T>) {
        let [x, y, z] = *x;
        let one = T::one();
        let three = T::from_f64(3.0).unwrap();

        out[0] = (z - self.b) * x - self.d * y;
        out[1] = self.d * x + (z - self.b) * y;
        out[2] = self.c + self.a * z - (z * z * z) / three
            - (x * x + y * y) * (one + self.e * z)
            + self.f * z * x * x * x;
    }
}

/// The Chen flow:
///   x' = a(y - x)
///   y' = (c - a)x - xz + cy
///   z' = xy - bz
pub struct Chen<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T: Scalar> VectorField<T> for Chen<T> {
    fn eval(&self, _t: T, x: &State<T>, out: &mut State<T>) {
        let [x, y, z] = *x;

        out[0] = self.a * (y - x);
        out[1] = (self.c - self.a) * x - x * z + self.c * y;
        out[2] = x * y - self.b * z;
    }
}

/// Selects one of the built-in flows and carries its presets: parameter
/// descriptors, generation settings, and the window/transform defaults the
/// page variants use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractorKind {
    Aizawa,
    Chen,
}

impl AttractorKind {
    pub fn from_name(name: &str) -> Result<Self, AttractorError> {
        match name.to_ascii_lowercase().as_str() {
            "aizawa" => Ok(Self::Aizawa),
            "chen" => Ok(Self::Chen),
            _ => Err(AttractorError::UnknownAttractor(name.to_string())),
        }
    }

    pub fn param_specs(&self) -> &'static [ParamSpec] {
        match self {
            Self::Aizawa => &AIZAWA_SPECS,
            Self::Chen => &CHEN_SPECS,
        }
    }

    pub fn default_params(&self) -> Vec<f64> {
        self.param_specs().iter().map(|spec| spec.default).collect()
    }

    pub fn param_index(&self, name: &str) -> Result<usize, AttractorError> {
        self.param_specs()
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| AttractorError::UnknownParameter {
                kind: *self,
                name: name.to_string(),
            })
    }

    /// Integration settings for this variant. The Chen flow evolves on a
    /// larger spatial scale, so its output is shrunk to match the viewport.
    pub fn generator_config(&self) -> GeneratorConfig {
        match self {
            Self::Aizawa => GeneratorConfig {
                steps: 20000,
                dt: 0.01,
                initial: [0.1, 0.0, 0.0],
                output_scale: 1.0,
            },
            Self::Chen => GeneratorConfig {
                steps: 25000,
                dt: 0.002,
                initial: [5.0, 10.0, 10.0],
                output_scale: 0.1,
            },
        }
    }

    pub fn window_config(&self) -> WindowConfig {
        match self {
            Self::Aizawa => WindowConfig::default(),
            Self::Chen => WindowConfig {
                mode: WindowMode::Dual,
                spin_rate: 0.2,
                tilt_rate: 0.1,
                base_scale: 15.0,
                ..WindowConfig::default()
            },
        }
    }

    /// Builds the flow for a parameter vector ordered as `param_specs()`.
    pub fn field(&self, params: &[f64]) -> Result<AttractorField, AttractorError> {
        let expected = self.param_specs().len();
        if params.len() != expected {
            return Err(AttractorError::ParameterCount {
                kind: *self,
                expected,
                got: params.len(),
            });
        }

        Ok(match self {
            Self::Aizawa => AttractorField::Aizawa(Aizawa {
                a: params[0],
                b: params[1],
                c: params[2],
                d: params[3],
                e: params[4],
                f: params[5],
            }),
            Self::Chen => AttractorField::Chen(Chen {
                a: params[0],
                b: params[1],
                c: params[2],
            }),
        })
    }
}

/// A built flow, dispatched by variant.
pub enum AttractorField {
    Aizawa(Aizawa<f64>),
    Chen(Chen<f64>),
}

impl VectorField<f64> for AttractorField {
    fn eval(&self, t: f64, x: &State<f64>, out: &mut State<f64>) {
        match self {
            Self::Aizawa(field) => field.eval(t, x, out),
            Self::Chen(field) => field.eval(t, x, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttractorError, AttractorKind};
    use crate::traits::VectorField;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            AttractorKind::from_name("Aizawa").expect("variant"),
            AttractorKind::Aizawa
        );
        assert_eq!(
            AttractorKind::from_name("CHEN").expect("variant"),
            AttractorKind::Chen
        );
    }

    #[test]
    fn from_name_rejects_unknown_variant() {
        let err = AttractorKind::from_name("lorenz").expect_err("expected error");
        assert!(format!("{err}").contains("lorenz"));
    }

    #[test]
    fn param_specs_have_defaults_in_range() {
        for kind in [AttractorKind::Aizawa, AttractorKind::Chen] {
            for spec in kind.param_specs() {
                assert!(spec.min < spec.max, "{}: empty range", spec.name);
                assert!(spec.step > 0.0, "{}: bad step", spec.name);
                assert!(
                    spec.default >= spec.min && spec.default <= spec.max,
                    "{}: default out of range",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn param_index_resolves_names() {
        assert_eq!(AttractorKind::Aizawa.param_index("d").expect("index"), 3);
        assert_eq!(AttractorKind::Chen.param_index("c").expect("index"), 2);
        assert!(matches!(
            AttractorKind::Chen.param_index("f"),
            Err(AttractorError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn field_rejects_parameter_count_mismatch() {
        let result = AttractorKind::Aizawa.field(&[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(AttractorError::ParameterCount {
                expected: 6,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn aizawa_derivative_matches_closed_form_at_seed() {
        let field = AttractorKind::Aizawa
            .field(&AttractorKind::Aizawa.default_params())
            .expect("field");
        let mut out = [0.0; 3];

        field.eval(0.0, &[0.1, 0.0, 0.0], &mut out);

        assert!((out[0] - (-0.07)).abs() < 1e-12);
        assert!((out[1] - 0.35).abs() < 1e-12);
        assert!((out[2] - 0.59).abs() < 1e-12);
    }

    #[test]
    fn chen_derivative_matches_closed_form_at_seed() {
        let field = AttractorKind::Chen
            .field(&AttractorKind::Chen.default_params())
            .expect("field");
        let mut out = [0.0; 3];

        field.eval(0.0, &[5.0, 10.0, 10.0], &mut out);

        assert!((out[0] - 200.0).abs() < 1e-12);
        assert!((out[1] - 170.0).abs() < 1e-12);
        assert!((out[2] - 20.0).abs() < 1e-12);
    }
}
