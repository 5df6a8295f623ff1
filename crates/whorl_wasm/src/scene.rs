//! Scroll scene wrapper and per-frame bridge.

use anyhow::{Context, Result};
use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use whorl_core::attractor::AttractorKind;
use whorl_core::trajectory::TrajectoryCache;
use whorl_core::window::{sample_into, transform, FrameSample, WindowConfig};

/// The single owner of the attractor state. The page constructs one scene,
/// pushes parameter changes from its sliders, and calls the frame methods
/// from its animation callback with the current scroll progress and
/// elapsed time.
#[wasm_bindgen]
pub struct ScrollScene {
    kind: AttractorKind,
    params: Vec<f64>,
    cache: TrajectoryCache,
    window: WindowConfig,
    frame: FrameSample,
}

pub(crate) fn build_scene(attractor: &str) -> Result<ScrollScene> {
    let kind = AttractorKind::from_name(attractor)
        .with_context(|| format!("Failed to build scene for \"{attractor}\""))?;

    Ok(ScrollScene {
        kind,
        params: kind.default_params(),
        cache: TrajectoryCache::new(),
        window: kind.window_config(),
        frame: FrameSample::new(),
    })
}

#[wasm_bindgen]
impl ScrollScene {
    #[wasm_bindgen(constructor)]
    pub fn new(attractor: &str) -> Result<ScrollScene, JsValue> {
        console_error_panic_hook::set_once();
        build_scene(attractor).map_err(|e| JsValue::from_str(&format!("{e:#}")))
    }

    /// Slider metadata for the active attractor: one row per coefficient
    /// with name, min, max, step, and default.
    pub fn parameter_specs(&self) -> Result<JsValue, JsValue> {
        let rows: Vec<ParamSpecPayload> = self
            .kind
            .param_specs()
            .iter()
            .map(|spec| ParamSpecPayload {
                name: spec.name,
                min: spec.min,
                max: spec.max,
                step: spec.step,
                default: spec.default,
            })
            .collect();

        serde_wasm_bindgen::to_value(&rows)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Updates one coefficient by name. The trajectory is rebuilt lazily on
    /// the next frame, so a burst of slider events costs one generation.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        let index = self
            .kind
            .param_index(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.params[index] = value;
        Ok(())
    }

    /// Replaces the whole coefficient vector, ordered as `parameter_specs`.
    pub fn set_parameters(&mut self, values: &[f64]) -> Result<(), JsValue> {
        if values.len() != self.params.len() {
            return Err(JsValue::from_str(&format!(
                "Expected {} parameters, got {}.",
                self.params.len(),
                values.len()
            )));
        }
        self.params.copy_from_slice(values);
        Ok(())
    }

    pub fn parameters(&self) -> Vec<f64> {
        self.params.clone()
    }

    /// The visible window for this frame as a flat xyz buffer, ready for
    /// `setFromPoints` on a line geometry. Regenerates the trajectory first
    /// if the parameters changed since the last frame.
    pub fn frame_points(
        &mut self,
        scroll_progress: f64,
        elapsed: f64,
    ) -> Result<Float64Array, JsValue> {
        let trajectory = self
            .cache
            .trajectory(self.kind, &self.params)
            .map_err(|e| JsValue::from_str(&format!("Generation failed: {e:#}")))?;

        sample_into(
            trajectory,
            scroll_progress,
            elapsed,
            &self.window,
            &mut self.frame,
        );

        Ok(Float64Array::from(self.frame.points.as_slice()))
    }

    /// Rotation angles and scale for this frame's object transform.
    pub fn frame_transform(&self, scroll_progress: f64, elapsed: f64) -> Result<JsValue, JsValue> {
        let t = transform(scroll_progress, elapsed, &self.window);
        let payload = TransformPayload {
            rotation_y: t.rotation_y,
            rotation_x: t.rotation_x,
            scale: t.scale,
        };

        serde_wasm_bindgen::to_value(&payload)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

#[derive(Serialize)]
struct ParamSpecPayload {
    name: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
}

#[derive(Serialize)]
struct TransformPayload {
    rotation_y: f64,
    rotation_x: f64,
    scale: f64,
}

/// Normalized scroll position in [0,1] from raw page metrics
/// (`scrollY / (scrollHeight - innerHeight)`). Returns 0 when the page
/// does not scroll.
#[wasm_bindgen]
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let track = scroll_height - viewport_height;
    if !track.is_finite() || track <= 0.0 {
        return 0.0;
    }

    let ratio = scroll_y / track;
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_scene_rejects_unknown_attractor() {
        let result = build_scene("lorenz");
        assert!(result.is_err(), "expected unknown attractor error");
    }

    #[test]
    fn scene_seeds_default_parameters() {
        let scene = ScrollScene::new("aizawa").expect("scene");
        assert_eq!(scene.parameters(), vec![0.95, 0.7, 0.6, 3.5, 0.25, 0.1]);
    }

    #[test]
    fn set_parameter_updates_the_vector() {
        let mut scene = ScrollScene::new("chen").expect("scene");
        scene.set_parameter("b", 4.5).expect("set");
        assert_eq!(scene.parameters(), vec![40.0, 4.5, 28.0]);
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn set_parameter_rejects_unknown_name() {
        let mut scene = ScrollScene::new("chen").expect("scene");
        assert!(scene.set_parameter("f", 0.5).is_err());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn set_parameters_rejects_length_mismatch() {
        let mut scene = ScrollScene::new("aizawa").expect("scene");
        assert!(scene.set_parameters(&[1.0, 2.0]).is_err());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn frame_points_returns_the_visible_window() {
        let mut scene = ScrollScene::new("aizawa").expect("scene");
        let points = scene.frame_points(0.5, 2.0).expect("frame");
        assert_eq!(points.length(), 33000);
    }

    #[test]
    fn scroll_progress_normalizes_and_guards() {
        assert!((scroll_progress(500.0, 2000.0, 1000.0) - 0.5).abs() < 1e-12);
        assert_eq!(scroll_progress(500.0, 1000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(-50.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(5000.0, 2000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(100.0, f64::NAN, 1000.0), 0.0);
    }
}
