use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use super::font::Fonts;
use super::layout::{Layout, Placement};

pub const BACKGROUND: Rgb<u8> = Rgb([15, 15, 15]);
pub const OUTLINE: Rgb<u8> = Rgb([201, 163, 75]);
pub const ROOM_FILL: Rgb<u8> = Rgb([30, 30, 30]);
pub const LABEL: Rgb<u8> = Rgb([255, 255, 255]);
pub const FOOTER: Rgb<u8> = Rgb([191, 182, 168]);

const OUTLINE_WIDTH: i64 = 3;
const LABEL_INSET: i64 = 8;
const FOOTER_RISE: i64 = 18;

/// Paints the layout onto a fresh canvas.
pub fn draw(layout: &Layout, fonts: &Fonts) -> RgbImage {
    let c = layout.canvas;
    let mut img = RgbImage::from_pixel(c.width as u32, c.height as u32, BACKGROUND);

    for p in &layout.placements {
        draw_room(&mut img, p, fonts);
    }

    let footer = format!("Total: {}", sqft(layout.total_area));
    fonts.regular.draw(
        &mut img,
        FOOTER,
        c.padding as i32,
        (c.height - c.padding - FOOTER_RISE) as i32,
        &footer,
    );
    img
}

fn draw_room(img: &mut RgbImage, p: &Placement, fonts: &Fonts) {
    // corners are inclusive, so the box covers width + 1 by height + 1 pixels
    let outer = |inset: i64| {
        Rect::at((p.x + inset) as i32, (p.y + inset) as i32).of_size(
            (p.width + 1 - 2 * inset) as u32,
            (p.height + 1 - 2 * inset) as u32,
        )
    };
    draw_filled_rect_mut(img, outer(0), ROOM_FILL);
    for inset in 0..OUTLINE_WIDTH {
        draw_hollow_rect_mut(img, outer(inset), OUTLINE);
    }

    let area = sqft(p.room.area);
    fonts.bold.draw_lines(
        img,
        LABEL,
        (p.x + LABEL_INSET) as i32,
        (p.y + LABEL_INSET) as i32,
        &[p.room.name.as_str(), area.as_str()],
    );
}

/// Whole square feet, truncated toward zero without saturating.
fn sqft(area: f64) -> String {
    format!("{:.0} sq.ft", area.trunc())
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
