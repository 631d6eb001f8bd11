//! # Marker Module
//!
//! Chunk generation occasionally decides that something (a crop, by default)
//! should appear on top of a flat voxel. The terrain code has no notion of what
//! that thing is; it records a [`MarkerSpawn`] and hands it to a
//! [`MarkerSink`] supplied by the caller once generation has finished.

use cgmath::Point3;
use serde::Serialize;

/// A marker placement decided during chunk generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerSpawn {
    /// World position of the marker.
    #[serde(with = "point_as_array")]
    pub position: Point3<f32>,
    /// Kind label from the generation config.
    pub kind: String,
    /// Grid index `(x, z)` of the chunk that spawned it.
    pub chunk: (usize, usize),
    /// Cell `(x, y, z)` within that chunk.
    pub cell: (usize, usize, usize),
}

/// Receives marker spawns from a [`TerrainGrid`](super::grid::TerrainGrid).
///
/// Callbacks always run on the thread that requested generation, after every
/// chunk has been built.
pub trait MarkerSink {
    /// Places a marker of the given kind at a world position.
    fn spawn_marker(&mut self, position: Point3<f32>, kind: &str);

    /// Removes every marker placed for the previous terrain.
    ///
    /// Called once per successful generation, before the new markers are spawned.
    fn clear_markers(&mut self) {}
}

impl<F> MarkerSink for F
where
    F: FnMut(Point3<f32>, &str),
{
    fn spawn_marker(&mut self, position: Point3<f32>, kind: &str) {
        self(position, kind)
    }
}

/// Discards every marker.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullMarkerSink;

impl MarkerSink for NullMarkerSink {
    fn spawn_marker(&mut self, _position: Point3<f32>, _kind: &str) {}
}

/// Keeps the markers currently placed, plus how often it was cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerLog {
    /// Markers placed since the last clear, in spawn order.
    pub markers: Vec<(Point3<f32>, String)>,
    /// Number of `clear_markers` calls.
    pub clears: usize,
}

impl MarkerSink for MarkerLog {
    fn spawn_marker(&mut self, position: Point3<f32>, kind: &str) {
        self.markers.push((position, kind.to_string()));
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.clears += 1;
    }
}

mod point_as_array {
    use cgmath::Point3;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(point: &Point3<f32>, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&[point.x, point.y, point.z], serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |position: Point3<f32>, kind: &str| seen.push((position, kind.to_owned()));
            sink.spawn_marker(Point3::new(1.0, 2.0, 3.0), "crop");
            sink.clear_markers();
        }
        assert_eq!(seen, vec![(Point3::new(1.0, 2.0, 3.0), "crop".to_string())]);
    }

    #[test]
    fn marker_log_clears() {
        let mut log = MarkerLog::default();
        log.spawn_marker(Point3::new(0.5, 1.0, 0.5), "crop");
        log.clear_markers();
        log.spawn_marker(Point3::new(1.5, 1.0, 0.5), "stone");

        assert_eq!(log.clears, 1);
        assert_eq!(log.markers, vec![(Point3::new(1.5, 1.0, 0.5), "stone".to_string())]);
    }

    #[test]
    fn spawns_serialize_positions_as_arrays() {
        let spawn = MarkerSpawn {
            position: Point3::new(0.5, 3.0, 2.5),
            kind: "crop".into(),
            chunk: (0, 1),
            cell: (0, 2, 2),
        };
        let json = serde_json::to_value(&spawn).unwrap();
        assert_eq!(json["position"], serde_json::json!([0.5, 3.0, 2.5]));
        assert_eq!(json["chunk"], serde_json::json!([0, 1]));
    }
}
