use crate::types::{Room, RoomSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: i64,
    pub height: i64,
    pub padding: i64,
}

pub const CANVAS: Canvas = Canvas {
    width: 1500,
    height: 1000,
    padding: 16,
};

const MIN_SIDE: i64 = 60;
const BASE_ROW_HEIGHT: f64 = 200.0;
const FILL_RATIO: f64 = 0.0005;
const WIDTH_STRETCH: f64 = 1.8;
const HEIGHT_GAIN: f64 = 1.4;

impl Canvas {
    pub fn usable_pixel_area(&self) -> f64 {
        ((self.width - 2 * self.padding) * (self.height - 2 * self.padding)) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub room: Room,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: Canvas,
    pub placements: Vec<Placement>,
    /// Rooms that did not fit below the last row.
    pub omitted: Vec<Room>,
    pub total_area: f64,
}

/// Greedy row packing: largest rooms first, left to right, wrapping to a new
/// row on horizontal overflow and stopping at the first vertical overflow.
pub fn layout(set: RoomSet, canvas: Canvas) -> Layout {
    let RoomSet {
        mut rooms,
        total_area,
    } = set;
    // sort_by is stable: equal areas keep request order
    rooms.sort_by(|a, b| b.area.total_cmp(&a.area));

    let px_per_sqft = canvas.usable_pixel_area() * FILL_RATIO / total_area.max(1.0);
    let pad = canvas.padding;

    let mut x = pad;
    let mut y = pad;
    let mut max_row_height = 0;
    let mut placements = Vec::with_capacity(rooms.len());
    let mut remaining = rooms.into_iter();

    while let Some(room) = remaining.next() {
        let width = ((room.area * px_per_sqft * WIDTH_STRETCH) as i64).max(MIN_SIDE);
        let height = ((BASE_ROW_HEIGHT * (1.0 + (room.area / total_area) * HEIGHT_GAIN)) as i64)
            .max(MIN_SIDE);

        if x + width + pad > canvas.width {
            x = pad;
            y += max_row_height + pad;
            max_row_height = 0;
        }

        if y + height + pad > canvas.height {
            // out of canvas space; this room and the rest are left out
            let mut omitted = vec![room];
            omitted.extend(remaining.by_ref());
            return Layout {
                canvas,
                placements,
                omitted,
                total_area,
            };
        }

        placements.push(Placement {
            room,
            x,
            y,
            width,
            height,
        });
        x += width + pad;
        max_row_height = max_row_height.max(height);
    }

    Layout {
        canvas,
        placements,
        omitted: Vec::new(),
        total_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rooms: &[(&str, f64)]) -> RoomSet {
        RoomSet {
            rooms: rooms
                .iter()
                .map(|(n, a)| Room {
                    name: n.to_string(),
                    area: *a,
                })
                .collect(),
            total_area: rooms.iter().map(|(_, a)| a).sum(),
        }
    }

    fn names(l: &Layout) -> Vec<&str> {
        l.placements.iter().map(|p| p.room.name.as_str()).collect()
    }

    #[test]
    fn hall_and_kitchen_share_the_first_row() {
        let l = layout(set(&[("Kitchen", 100.0), ("Hall", 500.0)]), CANVAS);
        assert_eq!(l.total_area, 600.0);
        assert_eq!(names(&l), ["Hall", "Kitchen"]);

        let hall = &l.placements[0];
        assert_eq!((hall.x, hall.y, hall.width, hall.height), (16, 16, 1065, 433));
        let kitchen = &l.placements[1];
        assert_eq!(
            (kitchen.x, kitchen.y, kitchen.width, kitchen.height),
            (1097, 16, 213, 246)
        );
        assert!(l.omitted.is_empty());
    }

    #[test]
    fn equal_areas_keep_request_order() {
        let l = layout(
            set(&[("b", 10.0), ("a", 10.0), ("big", 50.0), ("c", 10.0)]),
            CANVAS,
        );
        assert_eq!(names(&l), ["big", "b", "a", "c"]);
    }

    #[test]
    fn tiny_rooms_get_minimum_side() {
        let l = layout(set(&[("huge", 100_000.0), ("closet", 1.0)]), CANVAS);
        let closet = &l.placements[1];
        assert_eq!(closet.width, 60);
        assert_eq!(closet.height, 200);
    }

    #[test]
    fn wraps_to_next_row() {
        // each 60px wide plus padding: 19 rooms fit per row
        let rooms: Vec<(String, f64)> = (0..25).map(|i| (format!("r{i}"), 100.0)).collect();
        let refs: Vec<(&str, f64)> = rooms.iter().map(|(n, a)| (n.as_str(), *a)).collect();
        let l = layout(set(&refs), CANVAS);

        assert_eq!(l.placements.len(), 25);
        assert_eq!(l.placements[0].height, 211);
        assert_eq!(l.placements[18].x, 16 + 18 * 76);
        assert_eq!(l.placements[18].y, 16);
        let wrapped = &l.placements[19];
        assert_eq!((wrapped.x, wrapped.y), (16, 16 + 211 + 16));
    }

    #[test]
    fn rooms_past_the_bottom_are_omitted() {
        let rooms: Vec<(String, f64)> = (0..100).map(|i| (format!("r{i}"), 100.0)).collect();
        let refs: Vec<(&str, f64)> = rooms.iter().map(|(n, a)| (n.as_str(), *a)).collect();
        let l = layout(set(&refs), CANVAS);

        // 4 rows of 19 rooms, each 202px tall
        assert_eq!(l.placements.len(), 76);
        assert_eq!(l.omitted.len(), 24);
        assert_eq!(l.omitted[0].name, "r76");
        assert!(l
            .placements
            .iter()
            .all(|p| p.y + p.height + CANVAS.padding <= CANVAS.height));
    }
}
