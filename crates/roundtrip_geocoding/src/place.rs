use serde::{Deserialize, Serialize};

/// A geocoded place: the query the user typed, the display name the
/// provider resolved it to, and its coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub query: String,
    pub name: String,
    pub point: geo_types::Point,
}

impl Place {
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }
}

impl From<&Place> for geo_types::Point {
    fn from(place: &Place) -> Self {
        place.point
    }
}
