use roundtrip_geocoding::place::Place;
use roundtrip_matrix_providers::travel_matrices::TravelMatrices;
use roundtrip_optimizer::route::OptimalRoute;

const MARKER_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A labeled stop on the rendered route, in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: char,
    pub place: Place,
}

/// The rendered result of a successful submission: one marker per
/// unique stop (the return to the origin gets no second marker), the
/// closed path through them, and the round-trip totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub markers: Vec<Marker>,
    pub path: Vec<geo_types::Point>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
}

impl TripPlan {
    /// Renders the plan from the geocoded unique stops (origin first),
    /// their travel matrices, and the visiting order the optimizer
    /// returned.
    pub fn render(places: &[Place], matrices: &TravelMatrices, route: &OptimalRoute) -> Self {
        let sorted = route.apply(places);

        let markers = sorted
            .iter()
            .enumerate()
            .map(|(index, place)| Marker {
                label: MARKER_LABELS[index % MARKER_LABELS.len()] as char,
                place: (*place).clone(),
            })
            .collect();

        let mut path: Vec<geo_types::Point> =
            sorted.iter().map(|place| place.point).collect();
        // close the loop back to the origin
        if let Some(first) = path.first().copied() {
            path.push(first);
        }

        let order = route.order();
        let mut total_distance_meters = 0.0;
        let mut total_duration_seconds = 0.0;
        for leg in order.windows(2) {
            total_distance_meters += matrices.distance(leg[0], leg[1]);
            total_duration_seconds += matrices.duration(leg[0], leg[1]);
        }
        if order.len() > 1 {
            total_distance_meters += matrices.distance(order[order.len() - 1], order[0]);
            total_duration_seconds += matrices.duration(order[order.len() - 1], order[0]);
        }

        Self {
            markers,
            path,
            total_distance_meters,
            total_duration_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lon: f64, lat: f64) -> Place {
        Place {
            query: name.to_string(),
            name: name.to_string(),
            point: geo_types::Point::new(lon, lat),
        }
    }

    #[test]
    fn test_render_labels_and_totals() {
        let places = vec![
            place("A", 0.0, 0.0),
            place("B", 1.0, 0.0),
            place("C", 2.0, 0.0),
        ];
        let matrices = TravelMatrices::from_flat(
            3,
            vec![0.0, 10.0, 20.0, 10.0, 0.0, 10.0, 20.0, 10.0, 0.0],
            vec![0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0],
        )
        .unwrap();
        let route = OptimalRoute::new(vec![0, 2, 1], 3).unwrap();

        let plan = TripPlan::render(&places, &matrices, &route);

        // one marker per unique stop, labeled in visiting order
        assert_eq!(plan.markers.len(), 3);
        assert_eq!(plan.markers[0].label, 'A');
        assert_eq!(plan.markers[0].place.name, "A");
        assert_eq!(plan.markers[1].label, 'B');
        assert_eq!(plan.markers[1].place.name, "C");
        assert_eq!(plan.markers[2].place.name, "B");

        // closed loop: A -> C -> B -> A
        assert_eq!(plan.path.len(), 4);
        assert_eq!(plan.path[0], plan.path[3]);

        // 0->2 (20) + 2->1 (10) + 1->0 (10)
        assert_eq!(plan.total_distance_meters, 40.0);
        assert_eq!(plan.total_duration_seconds, 4.0);
    }
}
