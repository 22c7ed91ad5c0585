//! Field presets - procedural Wall/Sink layouts stamped in on clear
//!
//! Every preset is data: a named list of line-segment strokes. A stroke
//! "paints" Wall or Sink wherever the point-to-segment distance falls
//! under a fixed thickness (3/width, so lines keep their pixel weight at
//! any resolution). Wall strokes are evaluated first, sink strokes
//! override them.
//!
//! `generate` is a pure function of (uv, field_index, width): it runs
//! redundantly at every cell of a clear step and must agree with itself.
//!
//! A built-in catalog ships compiled in; hosts can replace it with a
//! JSON bundle.

use serde::{Deserialize, Serialize};

use crate::domain::cell::CellKind;

/// Number of built-in presets.
pub const FIELD_COUNT: usize = 7;

/// Line weight numerator: thickness = LINE_WEIGHT / width.
const LINE_WEIGHT: f32 = 3.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    Wall,
    Sink,
}

/// One line segment of a preset, in normalized [0,1]^2 coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Stroke {
    pub kind: StrokeKind,
    pub a: [f32; 2],
    pub b: [f32; 2],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldPreset {
    pub name: String,
    pub strokes: Vec<Stroke>,
}

#[derive(Serialize, Deserialize)]
struct FieldBundle {
    presets: Vec<FieldPreset>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    index: usize,
    name: &'a str,
    walls: usize,
    sinks: usize,
}

/// The active set of presets, selected by integer index.
#[derive(Clone)]
pub struct FieldCatalog {
    presets: Vec<FieldPreset>,
}

impl FieldCatalog {
    /// The stock catalog.
    pub fn builtin() -> Self {
        Self {
            presets: builtin_presets(),
        }
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, String> {
        let bundle: FieldBundle = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if bundle.presets.is_empty() {
            return Err("field bundle contains no presets".to_string());
        }
        Ok(Self {
            presets: bundle.presets,
        })
    }

    /// Catalog description for the host UI.
    pub fn manifest_json(&self) -> String {
        let entries: Vec<ManifestEntry> = self
            .presets
            .iter()
            .enumerate()
            .map(|(index, preset)| ManifestEntry {
                index,
                name: &preset.name,
                walls: count_kind(preset, StrokeKind::Wall),
                sinks: count_kind(preset, StrokeKind::Sink),
            })
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Classify one normalized coordinate under a preset. Out-of-range
    /// indices classify everything as Air (an empty field, not an error).
    pub fn generate(&self, u: f32, v: f32, field_index: i32, width: u32) -> CellKind {
        let preset = match usize::try_from(field_index)
            .ok()
            .and_then(|i| self.presets.get(i))
        {
            Some(preset) => preset,
            None => return CellKind::Air,
        };

        let thickness = LINE_WEIGHT / width as f32;
        let mut kind = CellKind::Air;
        if min_stroke_distance(preset, StrokeKind::Wall, u, v) <= thickness {
            kind = CellKind::Wall;
        }
        if min_stroke_distance(preset, StrokeKind::Sink, u, v) <= thickness {
            kind = CellKind::Sink;
        }
        kind
    }
}

fn count_kind(preset: &FieldPreset, kind: StrokeKind) -> usize {
    preset.strokes.iter().filter(|s| s.kind == kind).count()
}

fn min_stroke_distance(preset: &FieldPreset, kind: StrokeKind, u: f32, v: f32) -> f32 {
    preset
        .strokes
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| dist_point_segment(u, v, s.a, s.b))
        .fold(f32::INFINITY, f32::min)
}

/// Distance from point p to segment ab.
pub fn dist_point_segment(pu: f32, pv: f32, a: [f32; 2], b: [f32; 2]) -> f32 {
    let pa = [pu - a[0], pv - a[1]];
    let ba = [b[0] - a[0], b[1] - a[1]];
    let ba_len_sq = ba[0] * ba[0] + ba[1] * ba[1];
    let t = if ba_len_sq > 0.0 {
        ((pa[0] * ba[0] + pa[1] * ba[1]) / ba_len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let du = pa[0] - ba[0] * t;
    let dv = pa[1] - ba[1] * t;
    (du * du + dv * dv).sqrt()
}

fn wall(a: [f32; 2], b: [f32; 2]) -> Stroke {
    Stroke {
        kind: StrokeKind::Wall,
        a,
        b,
    }
}

fn sink(a: [f32; 2], b: [f32; 2]) -> Stroke {
    Stroke {
        kind: StrokeKind::Sink,
        a,
        b,
    }
}

fn builtin_presets() -> Vec<FieldPreset> {
    vec![
        // 0: diagonal funnel roof and floor, side sinks at mid height
        FieldPreset {
            name: "funnel".to_string(),
            strokes: vec![
                wall([0.3, 0.90], [0.5, 0.95]),
                wall([0.7, 0.90], [0.5, 0.95]),
                wall([0.3, 0.15], [0.49, 0.1]),
                wall([0.7, 0.15], [0.51, 0.1]),
                wall([0.3, 0.15], [0.15, 0.1]),
                wall([0.7, 0.15], [0.85, 0.1]),
                sink([0.15, 0.5], [0.0, 0.5]),
                sink([0.85, 0.5], [1.0, 0.5]),
            ],
        },
        // 1: open bucket
        FieldPreset {
            name: "bucket".to_string(),
            strokes: vec![
                wall([0.1, 0.05], [0.9, 0.05]),
                wall([0.1, 0.05], [0.0, 0.9]),
                wall([0.9, 0.05], [1.0, 0.9]),
            ],
        },
        // 2: hourglass with a narrow waist
        FieldPreset {
            name: "hourglass".to_string(),
            strokes: vec![
                wall([0.15, 0.9], [0.47, 0.52]),
                wall([0.85, 0.9], [0.53, 0.52]),
                wall([0.15, 0.1], [0.47, 0.48]),
                wall([0.85, 0.1], [0.53, 0.48]),
            ],
        },
        // 3: descending staircase draining into a corner sink
        FieldPreset {
            name: "staircase".to_string(),
            strokes: vec![
                wall([0.05, 0.8], [0.25, 0.75]),
                wall([0.3, 0.65], [0.5, 0.6]),
                wall([0.55, 0.5], [0.75, 0.45]),
                wall([0.8, 0.35], [0.95, 0.3]),
                sink([0.9, 0.1], [1.0, 0.1]),
            ],
        },
        // 4: single long slope
        FieldPreset {
            name: "slope".to_string(),
            strokes: vec![
                wall([0.0, 0.75], [0.9, 0.25]),
                sink([0.95, 0.15], [1.0, 0.15]),
            ],
        },
        // 5: spike field
        FieldPreset {
            name: "spikes".to_string(),
            strokes: vec![
                wall([0.2, 0.55], [0.25, 0.7]),
                wall([0.25, 0.7], [0.3, 0.55]),
                wall([0.45, 0.55], [0.5, 0.7]),
                wall([0.5, 0.7], [0.55, 0.55]),
                wall([0.7, 0.55], [0.75, 0.7]),
                wall([0.75, 0.7], [0.8, 0.55]),
            ],
        },
        // 6: sieve over a full-width sink floor
        FieldPreset {
            name: "sieve".to_string(),
            strokes: vec![
                wall([0.0, 0.5], [0.12, 0.5]),
                wall([0.22, 0.5], [0.34, 0.5]),
                wall([0.44, 0.5], [0.56, 0.5]),
                wall([0.66, 0.5], [0.78, 0.5]),
                wall([0.88, 0.5], [1.0, 0.5]),
                sink([0.0, 0.05], [1.0, 0.05]),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_point_segment_basics() {
        // on the segment
        assert!(dist_point_segment(0.5, 0.5, [0.0, 0.5], [1.0, 0.5]) < 1e-6);
        // perpendicular offset
        let d = dist_point_segment(0.5, 0.7, [0.0, 0.5], [1.0, 0.5]);
        assert!((d - 0.2).abs() < 1e-6);
        // beyond the endpoint: distance to the endpoint itself
        let d = dist_point_segment(1.3, 0.9, [0.0, 0.5], [1.0, 0.5]);
        assert!((d - (0.3f32 * 0.3 + 0.4 * 0.4).sqrt()).abs() < 1e-6);
        // degenerate segment
        let d = dist_point_segment(0.5, 0.5, [0.2, 0.5], [0.2, 0.5]);
        assert!((d - 0.3).abs() < 1e-6);
    }

    #[test]
    fn builtin_catalog_has_expected_size() {
        let catalog = FieldCatalog::builtin();
        assert_eq!(catalog.len(), FIELD_COUNT);
    }

    #[test]
    fn funnel_places_walls_and_sinks() {
        let catalog = FieldCatalog::builtin();
        // on the roof segment
        assert_eq!(catalog.generate(0.4, 0.925, 0, 512), CellKind::Wall);
        // on the left sink arm
        assert_eq!(catalog.generate(0.05, 0.5, 0, 512), CellKind::Sink);
        // open space
        assert_eq!(catalog.generate(0.5, 0.5, 0, 512), CellKind::Air);
    }

    #[test]
    fn generate_is_deterministic() {
        let catalog = FieldCatalog::builtin();
        for index in 0..FIELD_COUNT as i32 {
            for sample in 0..64 {
                let u = (sample % 8) as f32 / 8.0;
                let v = (sample / 8) as f32 / 8.0;
                let first = catalog.generate(u, v, index, 256);
                let second = catalog.generate(u, v, index, 256);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn out_of_range_index_is_all_air() {
        let catalog = FieldCatalog::builtin();
        assert_eq!(catalog.generate(0.4, 0.925, -1, 512), CellKind::Air);
        assert_eq!(catalog.generate(0.4, 0.925, 99, 512), CellKind::Air);
    }

    #[test]
    fn sink_strokes_override_walls() {
        let json = r#"{"presets":[{"name":"overlap","strokes":[
            {"kind":"wall","a":[0.0,0.5],"b":[1.0,0.5]},
            {"kind":"sink","a":[0.0,0.5],"b":[1.0,0.5]}
        ]}]}"#;
        let catalog = FieldCatalog::from_bundle_json(json).unwrap();
        assert_eq!(catalog.generate(0.5, 0.5, 0, 128), CellKind::Sink);
    }

    #[test]
    fn bundle_rejects_empty_catalog() {
        assert!(FieldCatalog::from_bundle_json(r#"{"presets":[]}"#).is_err());
        assert!(FieldCatalog::from_bundle_json("nope").is_err());
    }

    #[test]
    fn manifest_lists_every_preset() {
        let catalog = FieldCatalog::builtin();
        let manifest = catalog.manifest_json();
        for preset in ["funnel", "bucket", "hourglass", "staircase", "slope", "spikes", "sieve"] {
            assert!(manifest.contains(preset), "missing {preset} in {manifest}");
        }
    }

    #[test]
    fn line_thickness_scales_with_width() {
        let catalog = FieldCatalog::builtin();
        // A point ~0.02 off the bucket floor: inside the line at 64 wide
        // (thickness 3/64), outside at 1024 wide.
        assert_eq!(catalog.generate(0.5, 0.07, 1, 64), CellKind::Wall);
        assert_eq!(catalog.generate(0.5, 0.07, 1, 1024), CellKind::Air);
    }
}
