//! Canvas drawing primitives for the sector overlay. Everything here
//! draws in image-space coordinates and relies on the transform already
//! set on the context, so overlays scale and translate with the map.

use web_sys::CanvasRenderingContext2d;

use crate::model::polygon_centroid;

/// Fixed stroke style for sector outlines. The width is in image-space
/// units, so outlines scale with the zoom level.
pub const SECTOR_STROKE: &str = "#2a8e8e";
pub const SECTOR_LINE_WIDTH: f64 = 4.0;

const ICON_FONT: &str = "28px sans-serif";

/// Trace the closed polygon and stroke it.
pub fn draw_polygon(
    ctx: &CanvasRenderingContext2d,
    points: &[(f64, f64)],
    stroke: &str,
    line_width: f64,
) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(x0, y0);
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }
    ctx.close_path();
    ctx.set_stroke_style_str(stroke);
    ctx.set_line_width(line_width);
    ctx.stroke();
}

/// Draw a sector's icon centered on its polygon centroid. The icon is an
/// opaque descriptor from the registry, rendered as text (emoji or short
/// label); sectors without a drawable outline get no icon.
pub fn draw_sector_icon(
    ctx: &CanvasRenderingContext2d,
    _id: &str,
    points: &[(f64, f64)],
    icon: &str,
) {
    if icon.is_empty() {
        return;
    }
    let Some((cx, cy)) = polygon_centroid(points) else {
        return;
    };
    ctx.set_font(ICON_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(icon, cx, cy).ok();
    ctx.set_text_align("start");
    ctx.set_text_baseline("alphabetic");
}
