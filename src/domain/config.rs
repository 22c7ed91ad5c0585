//! Simulation configuration and per-step inputs
//!
//! Everything the kernel consumes from the outside world goes through
//! these two structs: `SimConfig` is fixed at tuning time, `StepParams`
//! is supplied fresh on every step. There is no ambient/global state.

use serde::{Deserialize, Serialize};

/// Tuning knobs with the stock installation values as defaults.
/// Serde-derived so a host can ship tuning as JSON.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Center of the circular capture region, normalized.
    pub capture_point: [f32; 2],
    /// Radius of the capture region, normalized.
    pub capture_radius: f32,
    /// Zoom applied to the capture-image coordinate around the capture point.
    pub capture_uv_scale: f32,
    /// Spawn stride: sand appears only where x % spacing + y % spacing == 0.
    pub sand_spacing: u32,
    /// New-grain lifetime range in seconds.
    pub ttl_min: f32,
    pub ttl_max: f32,
    /// Hold ttl constant instead of decaying it (stress/testing mode).
    pub ignore_ttl: bool,
    /// Fixed simulation rate targeted by `run_frame`.
    pub iterations_per_sec: f32,
    /// Substep cap per rendered frame.
    pub iterations_per_step_max: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capture_point: [0.5, 0.65],
            capture_radius: 0.25,
            capture_uv_scale: 2.0,
            sand_spacing: 2,
            ttl_min: 10.0,
            ttl_max: 20.0,
            ignore_ttl: false,
            iterations_per_sec: 240.0,
            iterations_per_step_max: 8,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

/// Inputs for one simulation step. `is_capturing` / `is_clearing` are
/// one-shot: the caller raises them for exactly the triggering step.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepParams {
    pub delta_time: f32,
    pub is_capturing: bool,
    pub is_clearing: bool,
    pub field_index: i32,
}

impl StepParams {
    /// A quiet step: no events, no elapsed time.
    pub fn quiet(field_index: i32) -> Self {
        Self {
            field_index,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_json_overrides_only_named_fields() {
        let config = SimConfig::from_json(r#"{"sand_spacing": 4, "ignore_ttl": true}"#).unwrap();
        assert_eq!(config.sand_spacing, 4);
        assert!(config.ignore_ttl);
        assert_eq!(config.capture_point, [0.5, 0.65]);
        assert_eq!(config.ttl_max, 20.0);
    }

    #[test]
    fn config_json_rejects_garbage() {
        assert!(SimConfig::from_json("not json").is_err());
    }
}
