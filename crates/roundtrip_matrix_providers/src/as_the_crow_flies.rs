use geo::{Distance, Haversine};

use crate::travel_matrices::{MatrixError, TravelMatrices};

/// Builds straight-line matrices from haversine distances, assuming a
/// constant travel speed. Useful offline and in tests, where no matrix
/// provider is reachable.
pub fn as_the_crow_flies_matrices<P>(points: &[P], speed_kmh: f64) -> Result<TravelMatrices, MatrixError>
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let points: Vec<geo_types::Point> = points.iter().map(Into::into).collect();
    let speed_ms = speed_kmh / 3.6;

    let mut cells = Vec::with_capacity(points.len() * points.len());

    for from in &points {
        for to in &points {
            let distance = Haversine.distance(*from, *to);
            cells.push((Some(distance), Some(distance / speed_ms)));
        }
    }

    TravelMatrices::from_cells(points.len(), cells)
}
