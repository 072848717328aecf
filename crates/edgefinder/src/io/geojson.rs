use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use crate::{
    error::Result,
    types::TracedLines,
};

impl TracedLines {
    /// Export as a FeatureCollection with one LineString per polyline
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::new();

        for (i, line) in self.lines.iter().enumerate() {
            let coordinates = line.iter().map(|&[x, y]| vec![x, y]).collect();
            let geometry = Geometry::new(Value::LineString(coordinates));

            let mut properties = serde_json::Map::new();
            properties.insert("id".to_string(), serde_json::Value::from(i));
            properties.insert("point_count".to_string(), serde_json::Value::from(line.len()));
            properties.insert(
                "length".to_string(),
                serde_json::Number::from_f64(Self::line_length(line))
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            );

            features.push(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        // Add metadata to foreign members
        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("image_width".to_string(), serde_json::Value::from(self.image_width));
        foreign_members.insert("image_height".to_string(), serde_json::Value::from(self.image_height));
        foreign_members.insert("line_count".to_string(), serde_json::Value::from(self.lines.len()));
        foreign_members.insert("stats".to_string(), serde_json::to_value(&self.stats)?);

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Save as a GeoJSON file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let geojson = GeoJson::FeatureCollection(self.to_geojson()?);
        std::fs::write(path, geojson.to_string())?;
        Ok(())
    }

    /// Load lines back from a GeoJSON file written by [`TracedLines::save_geojson`]
    pub fn load_geojson<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<[f64; 2]>>> {
        let content = std::fs::read_to_string(path)?;
        let geojson: GeoJson = content.parse()?;

        let mut lines = Vec::new();
        if let GeoJson::FeatureCollection(collection) = geojson {
            for feature in collection.features {
                if let Some(Geometry { value: Value::LineString(coords), .. }) = feature.geometry {
                    lines.push(
                        coords
                            .iter()
                            .filter(|c| c.len() >= 2)
                            .map(|c| [c[0], c[1]])
                            .collect(),
                    );
                }
            }
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TraceStats;

    fn traced() -> TracedLines {
        TracedLines {
            lines: vec![vec![[0.0, 0.0], [3.0, 4.0]], vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0]]],
            image_width: 8,
            image_height: 6,
            stats: TraceStats::default(),
        }
    }

    #[test]
    fn test_geojson_export() {
        let collection = traced().to_geojson().expect("Should create GeoJSON");
        assert_eq!(collection.features.len(), 2);

        let properties = collection.features[0].properties.as_ref().expect("Should have properties");
        assert_eq!(properties["point_count"], serde_json::json!(2));
        assert_eq!(properties["length"], serde_json::json!(5.0));

        let members = collection.foreign_members.as_ref().expect("Should have metadata");
        assert_eq!(members["image_width"], serde_json::json!(8));
    }

    #[test]
    fn test_geojson_file_round_trip() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("lines.geojson");
        let original = traced();
        original.save_geojson(&path).expect("Should save");
        let lines = TracedLines::load_geojson(&path).expect("Should load");
        assert_eq!(lines, original.lines);
    }
}
