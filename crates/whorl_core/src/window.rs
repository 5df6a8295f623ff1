//! Windowed view sampling: maps scroll progress and elapsed time to the
//! visible slice of a trajectory plus its render transform, once per
//! animation frame.

use crate::trajectory::Trajectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// One circular window whose start index advances at twice the scroll
    /// rate.
    Single,
    /// Two half-size windows advancing at x2 and x3 in opposite phase,
    /// concatenated into one output sequence.
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub mode: WindowMode,
    /// Fraction of the trajectory visible at the top of the page.
    pub base_fraction: f64,
    /// Additional fraction revealed by scrolling to the bottom.
    pub growth_fraction: f64,
    /// Y rotation rate, radians per second.
    pub spin_rate: f64,
    /// X rotation rate, radians per second.
    pub tilt_rate: f64,
    pub base_scale: f64,
    pub scale_range: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            mode: WindowMode::Single,
            base_fraction: 0.1,
            growth_fraction: 0.9,
            spin_rate: 0.1,
            tilt_rate: 0.0,
            base_scale: 20.0,
            scale_range: 10.0,
        }
    }
}

/// Rotation and scale applied to the rendered polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub rotation_y: f64,
    pub rotation_x: f64,
    pub scale: f64,
}

/// One frame's renderable output.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    /// Flat xyz buffer of the visible window, stride 3.
    pub points: Vec<f64>,
    pub transform: Transform,
}

impl FrameSample {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            transform: Transform {
                rotation_y: 0.0,
                rotation_x: 0.0,
                scale: 0.0,
            },
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }
}

impl Default for FrameSample {
    fn default() -> Self {
        Self::new()
    }
}

/// The transform alone, independent of the visible window.
pub fn transform(scroll_progress: f64, elapsed: f64, config: &WindowConfig) -> Transform {
    let scroll = clamp_scroll(scroll_progress);
    Transform {
        rotation_y: elapsed * config.spin_rate,
        rotation_x: elapsed * config.tilt_rate,
        scale: config.base_scale + scroll * config.scale_range,
    }
}

/// Computes the visible window and transform for one frame. Purely a
/// function of its inputs: identical arguments yield identical output.
pub fn sample(
    trajectory: &Trajectory,
    scroll_progress: f64,
    elapsed: f64,
    config: &WindowConfig,
) -> FrameSample {
    let mut out = FrameSample::new();
    sample_into(trajectory, scroll_progress, elapsed, config, &mut out);
    out
}

/// `sample` into a caller-owned buffer. The per-frame path: the previous
/// frame's points are released by the refill, and no allocation happens
/// once the buffer has reached the full trajectory size.
pub fn sample_into(
    trajectory: &Trajectory,
    scroll_progress: f64,
    elapsed: f64,
    config: &WindowConfig,
    out: &mut FrameSample,
) {
    let scroll = clamp_scroll(scroll_progress);
    out.transform = transform(scroll, elapsed, config);
    out.points.clear();

    let n = trajectory.point_count();
    if n == 0 {
        return;
    }

    let visible = visible_count(n, scroll, config);
    match config.mode {
        WindowMode::Single => {
            push_circular(&mut out.points, trajectory, offset_at(n, scroll, 2), visible);
        }
        WindowMode::Dual => {
            // Odd counts give the leading window the extra point so the
            // concatenated length stays exact.
            let head = visible - visible / 2;
            let tail = visible / 2;
            push_circular(&mut out.points, trajectory, offset_at(n, scroll, 2), head);
            push_circular(
                &mut out.points,
                trajectory,
                offset_at(n, 1.0 - scroll, 3),
                tail,
            );
        }
    }
}

fn clamp_scroll(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Window length for a scroll position: grows from `base_fraction` of the
/// trajectory to all of it. At least one point once the trajectory is
/// non-empty.
fn visible_count(n: usize, scroll: f64, config: &WindowConfig) -> usize {
    let fraction = config.base_fraction + config.growth_fraction * scroll;
    let count = (n as f64 * fraction).floor().max(0.0) as usize;
    count.clamp(1, n)
}

/// Window start index: scroll scaled by `multiplier`, wrapped at n.
fn offset_at(n: usize, scroll: f64, multiplier: usize) -> usize {
    ((n as f64 * scroll).floor().max(0.0) as usize) * multiplier % n
}

/// Appends the circular slice [offset, offset + count) to `points`,
/// materialized as the contiguous run up to the trajectory end followed by
/// the wrap-around continuation from index 0. Remainders floor at zero.
fn push_circular(points: &mut Vec<f64>, trajectory: &Trajectory, offset: usize, count: usize) {
    let n = trajectory.point_count();
    let coords = trajectory.coords();

    let head = count.min(n - offset);
    points.extend_from_slice(&coords[offset * 3..(offset + head) * 3]);

    let wrapped = count.saturating_sub(head);
    points.extend_from_slice(&coords[..wrapped * 3]);
}
