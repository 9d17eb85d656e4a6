use serde::Deserialize;

/// A sanitized room: positive, finite floor area in sq.ft.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: String,
    pub area: f64,
}

/// Rooms that survived sanitizing, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSet {
    pub rooms: Vec<Room>,
    pub total_area: f64,
}

#[derive(Debug, Deserialize)]
pub struct SplitQuery {
    pub area: Option<String>,
}

impl SplitQuery {
    pub const DEFAULT_AREA: f64 = 1000.0;

    pub fn total_area(&self) -> f64 {
        self.area
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|a| a.is_finite())
            .unwrap_or(Self::DEFAULT_AREA)
    }
}
