use foundation::geo::{GeoBounds, LatLng};
use serde_json::Value;

/// One boundary record from the external geometry dataset.
///
/// The geometry itself is opaque to the engine; only the derived centroid and
/// bounding box are consumed here. Name/ISO fields drive country matching.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub admin_name: String,
    pub iso_a2: Option<String>,
    pub iso_a3: Option<String>,
    pub geometry: Value,
    pub centroid: LatLng,
    pub bbox: GeoBounds,
}

/// A loaded unit of boundary data: every feature for one tier/region chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryChunk {
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryChunk {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Parses a GeoJSON-like FeatureCollection into a chunk.
///
/// Lenient by policy: features without a usable admin name are skipped, ISO
/// placeholders ("-99" and friends) become `None`, and parsing itself never
/// fails — a malformed collection just yields an empty chunk.
pub fn chunk_from_geojson(raw: &Value) -> BoundaryChunk {
    let features = raw
        .get("features")
        .and_then(Value::as_array)
        .map(|fs| fs.iter().filter_map(feature_from_geojson).collect())
        .unwrap_or_default();
    BoundaryChunk { features }
}

fn feature_from_geojson(raw: &Value) -> Option<BoundaryFeature> {
    let props = raw.get("properties")?;

    let admin_name = props
        .get("ADMIN")
        .or_else(|| props.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let iso_a2 = iso_code(props.get("ISO_A2"), 2);
    let iso_a3 = iso_code(props.get("ISO_A3"), 3);

    let geometry = raw.get("geometry").cloned().unwrap_or(Value::Null);

    let mut positions = Vec::new();
    collect_positions(&geometry, &mut positions);
    // A feature with no coordinates still matters for name matching; pin it
    // to the origin rather than dropping the record.
    let bbox = GeoBounds::from_points(&positions)
        .unwrap_or_else(|| GeoBounds::of_point(LatLng::new(0.0, 0.0)));

    Some(BoundaryFeature {
        admin_name,
        iso_a2,
        iso_a3,
        geometry,
        centroid: bbox.center(),
        bbox,
    })
}

/// Datasets mark missing codes with placeholders like "-99"; anything that is
/// not the expected run of ASCII letters is treated as absent.
fn iso_code(raw: Option<&Value>, len: usize) -> Option<String> {
    let code = raw?.as_str()?.trim();
    if code.len() == len && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Recursively walks nested coordinate arrays, collecting `[lng, lat]` pairs.
/// Handles Polygon and MultiPolygon nesting without caring which it is.
fn collect_positions(value: &Value, out: &mut Vec<LatLng>) {
    let Some(items) = value
        .as_array()
        .or_else(|| value.get("coordinates").and_then(Value::as_array))
    else {
        return;
    };

    if items.len() >= 2 && items.iter().all(Value::is_number) {
        if let (Some(lng), Some(lat)) = (items[0].as_f64(), items[1].as_f64()) {
            out.push(LatLng::new(lat, lng));
        }
        return;
    }

    for item in items {
        collect_positions(item, out);
    }
}

#[cfg(test)]
mod tests {
    use super::chunk_from_geojson;
    use serde_json::json;

    #[test]
    fn parses_admin_and_iso_codes() {
        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "ADMIN": "France", "ISO_A2": "FR", "ISO_A3": "FRA" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[2.0, 48.0], [3.0, 49.0], [2.5, 50.0]]]
                }
            }]
        });
        let chunk = chunk_from_geojson(&raw);
        assert_eq!(chunk.len(), 1);

        let f = &chunk.features[0];
        assert_eq!(f.admin_name, "France");
        assert_eq!(f.iso_a2.as_deref(), Some("FR"));
        assert_eq!(f.iso_a3.as_deref(), Some("FRA"));
        assert!((f.centroid.lat - 49.0).abs() < 1e-9);
        assert!((f.centroid.lng - 2.5).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_name_property() {
        let raw = json!({
            "features": [{
                "properties": { "name": "Kosovo" },
                "geometry": { "type": "Polygon", "coordinates": [[[20.0, 42.0]]] }
            }]
        });
        let chunk = chunk_from_geojson(&raw);
        assert_eq!(chunk.features[0].admin_name, "Kosovo");
        assert_eq!(chunk.features[0].iso_a2, None);
    }

    #[test]
    fn scrubs_placeholder_iso_codes() {
        let raw = json!({
            "features": [{
                "properties": { "ADMIN": "Norway", "ISO_A2": "-99", "ISO_A3": "NOR" },
                "geometry": { "type": "Polygon", "coordinates": [[[8.0, 61.0]]] }
            }]
        });
        let f = &chunk_from_geojson(&raw).features[0];
        assert_eq!(f.iso_a2, None);
        assert_eq!(f.iso_a3.as_deref(), Some("NOR"));
    }

    #[test]
    fn skips_features_without_a_name() {
        let raw = json!({
            "features": [
                { "properties": { "ISO_A2": "XX" }, "geometry": null },
                { "properties": { "ADMIN": "  " }, "geometry": null }
            ]
        });
        assert!(chunk_from_geojson(&raw).is_empty());
    }

    #[test]
    fn multipolygon_bbox_spans_all_parts() {
        let raw = json!({
            "features": [{
                "properties": { "ADMIN": "Islandia" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-10.0, 5.0], [-9.0, 6.0]]],
                        [[[10.0, -5.0], [11.0, -6.0]]]
                    ]
                }
            }]
        });
        let f = &chunk_from_geojson(&raw).features[0];
        assert_eq!(f.bbox.min.lat, -6.0);
        assert_eq!(f.bbox.max.lat, 6.0);
        assert_eq!(f.bbox.min.lng, -10.0);
        assert_eq!(f.bbox.max.lng, 11.0);
    }

    #[test]
    fn malformed_collection_yields_empty_chunk() {
        assert!(chunk_from_geojson(&serde_json::json!("not geojson")).is_empty());
    }
}
