//! Room blueprint rendering.
//!
//! A request body `{"rooms": [{"room": "Hall", "area": 400}, ...]}` is
//! sanitized into a [`RoomSet`], packed row by row onto a fixed canvas and
//! returned as PNG bytes.

pub mod font;
pub mod layout;
pub mod render;

use serde_json::Value;

use crate::error::AppError;
use crate::types::{Room, RoomSet};

pub use font::Fonts;
pub use layout::{layout, Canvas, Layout, Placement, CANVAS};

pub const DOWNLOAD_NAME: &str = "blueprint.png";

const NO_ROOMS: &str = "No rooms provided or invalid format";
const NO_AREA: &str = "Total area must be > 0";

/// Keeps entries with a positive area, coercing loosely typed fields.
pub fn sanitize(payload: &Value) -> Result<RoomSet, AppError> {
    let entries = match payload.get("rooms") {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(AppError::InvalidRoomData(NO_ROOMS.into())),
    };

    let rooms: Vec<Room> = entries
        .iter()
        .map(|e| Room {
            name: room_name(e),
            area: room_area(e),
        })
        .filter(|r| r.area > 0.0)
        .collect();
    let total_area: f64 = rooms.iter().map(|r| r.area).sum();

    if total_area <= 0.0 {
        return Err(AppError::InvalidRoomData(NO_AREA.into()));
    }
    Ok(RoomSet { rooms, total_area })
}

fn room_name(entry: &Value) -> String {
    match entry.get("room") {
        None | Some(Value::Null) => "Room".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn room_area(entry: &Value) -> f64 {
    let area = match entry.get("area") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if area.is_finite() {
        area
    } else {
        0.0
    }
}

/// Full pipeline: sanitize, pack, paint, encode.
pub fn generate(payload: &Value, fonts: &Fonts) -> Result<Vec<u8>, AppError> {
    let set = sanitize(payload)?;
    let layout = layout(set, CANVAS);
    if !layout.omitted.is_empty() {
        tracing::debug!(
            "blueprint canvas full: {} of {} rooms omitted",
            layout.omitted.len(),
            layout.omitted.len() + layout.placements.len()
        );
    }

    let img = render::draw(&layout, fonts);
    render::encode_png(&img).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid(payload: Value) -> String {
        match sanitize(&payload) {
            Err(AppError::InvalidRoomData(msg)) => msg,
            other => panic!("expected InvalidRoomData, got {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_or_empty_rooms() {
        assert_eq!(invalid(json!({ "rooms": [] })), NO_ROOMS);
        assert_eq!(invalid(json!({})), NO_ROOMS);
        assert_eq!(invalid(json!({ "rooms": "Hall" })), NO_ROOMS);
        assert_eq!(invalid(json!([{ "room": "Hall", "area": 5 }])), NO_ROOMS);
    }

    #[test]
    fn rejects_when_no_area_survives() {
        assert_eq!(invalid(json!({ "rooms": [{ "room": "A", "area": -5 }] })), NO_AREA);
        assert_eq!(
            invalid(json!({ "rooms": [{ "room": "A", "area": "wide" }, { "room": "B" }, 7] })),
            NO_AREA
        );
    }

    #[test]
    fn coerces_names_and_areas() {
        let set = sanitize(&json!({ "rooms": [
            { "room": "Hall", "area": 500 },
            { "area": " 120.5 " },
            { "room": 3, "area": 0 },
            { "room": null, "area": true },
            { "room": "Balcony", "area": -40 },
        ]}))
        .unwrap();

        assert_eq!(
            set.rooms,
            vec![
                Room {
                    name: "Hall".into(),
                    area: 500.0
                },
                Room {
                    name: "Room".into(),
                    area: 120.5
                },
                Room {
                    name: "Room".into(),
                    area: 1.0
                },
            ]
        );
        assert_eq!(set.total_area, 621.5);
    }

    #[test]
    fn generate_returns_png_bytes() {
        let payload = json!({ "rooms": [
            { "room": "Hall", "area": 500 },
            { "room": "Kitchen", "area": 100 },
        ]});
        let png = generate(&payload, &Fonts::builtin()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
