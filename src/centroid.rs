use geo::{Area, Centroid, Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use geojson::{PolygonType, Position, Value as GeoJsonValue};

use crate::error::GeometryError;

fn type_name(value: &GeoJsonValue) -> &'static str {
    match value {
        GeoJsonValue::Point(_) => "Point",
        GeoJsonValue::MultiPoint(_) => "MultiPoint",
        GeoJsonValue::LineString(_) => "LineString",
        GeoJsonValue::MultiLineString(_) => "MultiLineString",
        GeoJsonValue::Polygon(_) => "Polygon",
        GeoJsonValue::MultiPolygon(_) => "MultiPolygon",
        GeoJsonValue::GeometryCollection(_) => "GeometryCollection",
    }
}

fn to_coord(position: &Position) -> Result<Coord<f64>, GeometryError> {
    match position.as_slice() {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok((*x, *y).into()),
        _ => Err(GeometryError::MalformedCoordinates(format!("{:?}", position))),
    }
}

fn to_ring(ring: &[Position]) -> Result<LineString<f64>, GeometryError> {
    let coords = ring.iter().map(to_coord).collect::<Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn to_polygon(rings: &PolygonType) -> Result<Polygon<f64>, GeometryError> {
    let (exterior, holes) = match rings.split_first() {
        Some(split) => split,
        None => return Err(GeometryError::EmptyGeometry),
    };
    let holes = holes
        .iter()
        .map(|ring| to_ring(ring))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(to_ring(exterior)?, holes))
}

/// Convert a GeoJSON Polygon or MultiPolygon into a `geo` geometry.
pub fn to_geo(geometry: &geojson::Geometry) -> Result<Geometry<f64>, GeometryError> {
    match &geometry.value {
        GeoJsonValue::Polygon(rings) => Ok(Geometry::Polygon(to_polygon(rings)?)),
        GeoJsonValue::MultiPolygon(polygons) => {
            let parts = polygons
                .iter()
                .map(to_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            if parts.is_empty() {
                return Err(GeometryError::EmptyGeometry);
            }
            Ok(Geometry::MultiPolygon(MultiPolygon::new(parts)))
        }
        other => Err(GeometryError::UnsupportedGeometry(type_name(other).to_string())),
    }
}

/// Planar area-weighted centroid of a Polygon or MultiPolygon.
///
/// Coordinates are treated as Cartesian; there is no spherical correction.
/// Multi-part geometries are weighted by part area, not averaged per part.
pub fn centroid(geometry: &geojson::Geometry) -> Result<Point<f64>, GeometryError> {
    let geometry = to_geo(geometry)?;

    let area = geometry.unsigned_area();
    if !(area.is_finite() && area > 0.0) {
        return Err(GeometryError::DegenerateGeometry);
    }

    geometry.centroid().ok_or(GeometryError::EmptyGeometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Vec<f64>> {
        vec![
            vec![x, y],
            vec![x, y + size],
            vec![x + size, y + size],
            vec![x + size, y],
            vec![x, y],
        ]
    }

    fn polygon(rings: Vec<Vec<Vec<f64>>>) -> geojson::Geometry {
        geojson::Geometry::new(GeoJsonValue::Polygon(rings))
    }

    fn assert_close(point: Point<f64>, x: f64, y: f64) {
        assert!((point.x() - x).abs() < 1e-9, "x: {} != {}", point.x(), x);
        assert!((point.y() - y).abs() < 1e-9, "y: {} != {}", point.y(), y);
    }

    #[test]
    fn rectangle_centroid_is_its_center() {
        let rect = polygon(vec![vec![
            vec![0.0, 0.0],
            vec![0.0, 2.0],
            vec![4.0, 2.0],
            vec![4.0, 0.0],
            vec![0.0, 0.0],
        ]]);
        assert_close(centroid(&rect).unwrap(), 2.0, 1.0);
    }

    #[test]
    fn unclosed_ring_is_closed() {
        let rect = polygon(vec![vec![
            vec![0.0, 0.0],
            vec![0.0, 2.0],
            vec![4.0, 2.0],
            vec![4.0, 0.0],
        ]]);
        assert_close(centroid(&rect).unwrap(), 2.0, 1.0);
    }

    #[test]
    fn equal_squares_average_to_midpoint() {
        let multi = geojson::Geometry::new(GeoJsonValue::MultiPolygon(vec![
            vec![square(0.0, 0.0, 2.0)],
            vec![square(10.0, 4.0, 2.0)],
        ]));
        // centroids (1, 1) and (11, 5)
        assert_close(centroid(&multi).unwrap(), 6.0, 3.0);
    }

    #[test]
    fn parts_are_weighted_by_area() {
        let multi = geojson::Geometry::new(GeoJsonValue::MultiPolygon(vec![
            vec![square(0.0, 0.0, 2.0)],
            vec![square(10.0, 0.0, 1.0)],
        ]));
        // (1 * 4 + 10.5 * 1) / 5
        assert_close(centroid(&multi).unwrap(), 2.9, (1.0 * 4.0 + 0.5) / 5.0);
    }

    #[test]
    fn holes_shift_the_centroid() {
        let with_hole = polygon(vec![square(0.0, 0.0, 4.0), square(2.0, 0.0, 2.0)]);
        let point = centroid(&with_hole).unwrap();
        assert!(point.x() < 2.0);
        assert!(point.y() > 2.0);
    }

    #[test]
    fn point_geometry_is_unsupported() {
        let point = geojson::Geometry::new(GeoJsonValue::Point(vec![1.0, 2.0]));
        assert_eq!(
            centroid(&point),
            Err(GeometryError::UnsupportedGeometry("Point".to_string()))
        );
    }

    #[test]
    fn zero_area_polygon_is_degenerate() {
        let collapsed = polygon(vec![vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]]]);
        assert_eq!(centroid(&collapsed), Err(GeometryError::DegenerateGeometry));

        let line = polygon(vec![vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]]);
        assert_eq!(centroid(&line), Err(GeometryError::DegenerateGeometry));
    }

    #[test]
    fn empty_geometries_are_rejected() {
        assert_eq!(centroid(&polygon(vec![])), Err(GeometryError::EmptyGeometry));
        let multi = geojson::Geometry::new(GeoJsonValue::MultiPolygon(vec![]));
        assert_eq!(centroid(&multi), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn short_positions_are_malformed() {
        let bad = polygon(vec![vec![vec![0.0, 0.0], vec![1.0], vec![1.0, 1.0]]]);
        assert!(matches!(
            centroid(&bad),
            Err(GeometryError::MalformedCoordinates(_))
        ));
    }
}
