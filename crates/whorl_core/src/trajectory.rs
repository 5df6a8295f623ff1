use crate::attractor::AttractorKind;
use crate::solvers::Euler;
use crate::traits::{Integrator, State, VectorField};
use anyhow::{bail, Result};

/// Integration settings for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of integration steps; the trajectory holds exactly this many
    /// points.
    pub steps: usize,
    pub dt: f64,
    pub initial: State<f64>,
    /// Uniform scale applied to every emitted point.
    pub output_scale: f64,
}

/// An immutable, chronologically ordered 3D polyline stored as a flat
/// xyz buffer. Point i precedes point i+1 in simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<f64>,
}

impl Trajectory {
    /// The not-yet-generated state. Sampling it yields no points.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The flat xyz buffer, stride 3.
    pub fn coords(&self) -> &[f64] {
        &self.points
    }

    pub fn point(&self, index: usize) -> State<f64> {
        let base = index * 3;
        [
            self.points[base],
            self.points[base + 1],
            self.points[base + 2],
        ]
    }
}

/// Integrates `field` from the configured initial state and collects every
/// post-step position. Deterministic for a given field and config. Divergent
/// fields are tolerated: non-finite coordinates are recorded as-is, never
/// clamped or rejected.
pub fn generate(field: &impl VectorField<f64>, config: &GeneratorConfig) -> Result<Trajectory> {
    if config.steps == 0 {
        bail!("Generation requires at least one step.");
    }
    if !config.dt.is_finite() || config.dt <= 0.0 {
        bail!("dt must be finite and positive.");
    }
    if !config.output_scale.is_finite() {
        bail!("output_scale must be finite.");
    }

    let mut stepper = Euler::new();
    let mut t = 0.0;
    let mut state = config.initial;
    let mut points = Vec::with_capacity(config.steps * 3);

    for _ in 0..config.steps {
        stepper.step(field, &mut t, &mut state, config.dt);
        points.push(state[0] * config.output_scale);
        points.push(state[1] * config.output_scale);
        points.push(state[2] * config.output_scale);
    }

    Ok(Trajectory { points })
}

/// Memoizes the most recent generation, keyed by the exact parameter tuple.
/// A lookup regenerates if and only if the key changed; the superseded
/// buffer is dropped on replacement.
#[derive(Debug, Default)]
pub struct TrajectoryCache {
    entry: Option<(CacheKey, Trajectory)>,
    generations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    kind: AttractorKind,
    param_bits: Vec<u64>,
}

impl CacheKey {
    fn new(kind: AttractorKind, params: &[f64]) -> Self {
        Self {
            kind,
            param_bits: params.iter().map(|p| p.to_bits()).collect(),
        }
    }
}

impl TrajectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trajectory for (kind, params), regenerating when the
    /// parameter tuple differs from the cached one.
    pub fn trajectory(&mut self, kind: AttractorKind, params: &[f64]) -> Result<&Trajectory> {
        let key = CacheKey::new(kind, params);
        let stale = match &self.entry {
            Some((cached, _)) => *cached != key,
            None => true,
        };

        if stale {
            let field = kind.field(params)?;
            let trajectory = generate(&field, &kind.generator_config())?;
            self.entry = Some((key, trajectory));
            self.generations += 1;
        }

        Ok(&self.entry.as_ref().unwrap().1)
    }

    /// How many times a generation has actually run.
    pub fn generation_count(&self) -> usize {
        self.generations
    }
}
