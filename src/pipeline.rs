use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson};
use tracing::{debug, info, warn};

use crate::centroid::centroid;
use crate::config::Config;
use crate::error::{Error, GeometryError, Result};
use crate::model::{Coordinates, CountryCoordinates, CountryRecord};
use crate::resolver::country_code;

const UNNAMED: &str = "<unnamed>";

/// Result of processing one input feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome {
    Record(CountryRecord),
    Skipped { name: String, reason: String },
}

/// Summary of a run, holding the document that was (or will be) written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub document: CountryCoordinates,
    pub total: usize,
    pub skipped: Vec<(String, String)>,
}

impl Report {
    pub fn written(&self) -> usize {
        self.document.countries.len()
    }

    pub fn from_outcomes(outcomes: Vec<FeatureOutcome>) -> Self {
        let mut report = Report {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FeatureOutcome::Record(record) => report.document.countries.push(record),
                FeatureOutcome::Skipped { name, reason } => report.skipped.push((name, reason)),
            }
        }
        report
    }
}

pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let geojson = GeoJson::from_reader(reader).map_err(|source| Error::GeoJson {
        path: path.to_path_buf(),
        source,
    })?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(Error::NotFeatureCollection {
            path: path.to_path_buf(),
        }),
    }
}

fn string_property<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.property(key).and_then(|value| value.as_str())
}

/// Resolve the code and centroid of one feature.
///
/// Never fails: anything wrong with the feature turns into `Skipped`.
pub fn process_feature(feature: &Feature) -> FeatureOutcome {
    let name = match string_property(feature, "name") {
        Some(name) => name,
        None => {
            return FeatureOutcome::Skipped {
                name: UNNAMED.to_string(),
                reason: "missing \"name\" property".to_string(),
            }
        }
    };
    let code = country_code(name);

    let skip = |reason: String| FeatureOutcome::Skipped {
        name: name.to_string(),
        reason,
    };

    let point = match feature.geometry.as_ref() {
        Some(geometry) => centroid(geometry),
        None => Err(GeometryError::MissingGeometry),
    };
    let point = match point {
        Ok(point) => point,
        Err(e) => return skip(e.to_string()),
    };

    let admin = match string_property(feature, "admin") {
        Some(admin) => admin,
        None => return skip("missing \"admin\" property".to_string()),
    };

    FeatureOutcome::Record(CountryRecord {
        country_code: code,
        country_name: admin.to_string(),
        coordinates: Coordinates::from_point_rounded(point),
    })
}

/// One outcome per feature, in input order.
pub fn process_features(features: &[Feature]) -> Vec<FeatureOutcome> {
    features.iter().map(process_feature).collect()
}

pub fn write_output(path: &Path, document: &CountryCoordinates) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n").map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Load the world map, compute every country centroid and write the result.
pub fn run(config: &Config) -> Result<Report> {
    info!(path = %config.input.display(), "loading world map");
    let collection = load_feature_collection(&config.input)?;
    info!(features = collection.features.len(), "processing features");

    let report = Report::from_outcomes(process_features(&collection.features));
    for (name, reason) in &report.skipped {
        warn!(country = %name, error = %reason, "skipping feature");
    }

    write_output(&config.output, &report.document)?;
    debug!(
        path = %config.output.display(),
        written = report.written(),
        skipped = report.skipped.len(),
        "finished writing country coordinates"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    fn country(name: &str, admin: &str, coordinates: serde_json::Value) -> Feature {
        feature(json!({
            "type": "Feature",
            "properties": { "name": name, "admin": admin },
            "geometry": { "type": "Polygon", "coordinates": coordinates }
        }))
    }

    #[test]
    fn builds_record_from_name_and_admin() {
        let f = country(
            "Japan",
            "Japan",
            json!([[[0.0, 0.0], [0.0, 2.0], [4.0, 2.0], [4.0, 0.0], [0.0, 0.0]]]),
        );
        let expected = CountryRecord {
            country_code: "JP".to_string(),
            country_name: "Japan".to_string(),
            coordinates: Coordinates {
                longitude: 2.0,
                latitude: 1.0,
            },
        };
        assert_eq!(process_feature(&f), FeatureOutcome::Record(expected));
    }

    #[test]
    fn code_comes_from_name_and_display_from_admin() {
        let f = country(
            "Dem. Rep. Congo",
            "Democratic Republic of the Congo",
            json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]),
        );
        match process_feature(&f) {
            FeatureOutcome::Record(record) => {
                assert_eq!(record.country_code, "CD");
                assert_eq!(record.country_name, "Democratic Republic of the Congo");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn point_geometry_is_skipped() {
        let f = feature(json!({
            "type": "Feature",
            "properties": { "name": "Nowhere", "admin": "Nowhere" },
            "geometry": { "type": "Point", "coordinates": [1.0, 1.0] }
        }));
        assert_eq!(
            process_feature(&f),
            FeatureOutcome::Skipped {
                name: "Nowhere".to_string(),
                reason: "unsupported geometry type: Point".to_string(),
            }
        );
    }

    #[test]
    fn missing_geometry_and_properties_are_skipped() {
        let no_geometry = feature(json!({
            "type": "Feature",
            "properties": { "name": "Atlantis", "admin": "Atlantis" },
            "geometry": null
        }));
        assert!(matches!(
            process_feature(&no_geometry),
            FeatureOutcome::Skipped { ref name, .. } if name == "Atlantis"
        ));

        let no_name = feature(json!({
            "type": "Feature",
            "properties": { "admin": "Somewhere" },
            "geometry": null
        }));
        assert!(matches!(
            process_feature(&no_name),
            FeatureOutcome::Skipped { ref name, .. } if name == UNNAMED
        ));

        let no_admin = feature(json!({
            "type": "Feature",
            "properties": { "name": "Kosovo" },
            "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]] }
        }));
        assert!(matches!(
            process_feature(&no_admin),
            FeatureOutcome::Skipped { ref name, .. } if name == "Kosovo"
        ));
    }

    #[test]
    fn failures_are_isolated_and_order_is_kept() {
        let square = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
        let features = vec![
            country("Taiwan", "Taiwan", square.clone()),
            country("Flatland", "Flatland", json!([[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]])),
            country("Kosovo", "Kosovo", square),
        ];

        let report = Report::from_outcomes(process_features(&features));
        assert_eq!(report.total, 3);
        assert_eq!(report.written(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "Flatland");

        let codes: Vec<_> = report
            .document
            .countries
            .iter()
            .map(|c| c.country_code.as_str())
            .collect();
        assert_eq!(codes, ["TW", "XK"]);
    }

    #[test]
    fn unresolved_name_is_used_as_code() {
        let f = country(
            "Somaliland",
            "Somaliland",
            json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]),
        );
        match process_feature(&f) {
            FeatureOutcome::Record(record) => assert_eq!(record.country_code, "Somaliland"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
