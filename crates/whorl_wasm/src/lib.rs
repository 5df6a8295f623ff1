//! WASM bridge for the Whorl core engine: the scene object the page drives
//! once per animation frame, plus scroll normalization.

pub mod scene;
