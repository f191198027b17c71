use crate::constants::{
    ELEVATOR_STROKE_WIDTH, LABEL_COLOR, LABEL_CONTOUR_COLOR, LABEL_FONT, LABEL_OFFSET_X, LABEL_OFFSET_Y,
    STATION_ICON_BORDER, STATION_ICON_COLOR, STATION_ICON_FILL, STATION_ICON_MAX_SIZE, STATION_ICON_MIN_SIZE,
    STATION_ICON_ZOOM_SCALE,
};
use crate::models::StationType;
use web_sys::CanvasRenderingContext2d;

const LABEL_CONTOUR_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationIcon {
    Circle,
    Square,
    /// Stair steps rising toward the east.
    StairsUpEast,
    /// Stair steps rising toward the west.
    StairsUpWest,
}

impl From<StationType> for StationIcon {
    fn from(station_type: StationType) -> Self {
        match station_type {
            StationType::Junction | StationType::Interchange => StationIcon::Square,
            StationType::ElevatorWestEast => StationIcon::StairsUpEast,
            StationType::ElevatorEastWest => StationIcon::StairsUpWest,
            StationType::Plain | StationType::Semi => StationIcon::Circle,
        }
    }
}

/// Icon edge length in pixels for a zoom level.
#[must_use]
pub fn icon_size(zoom: f64) -> f64 {
    (STATION_ICON_ZOOM_SCALE * zoom).clamp(STATION_ICON_MIN_SIZE, STATION_ICON_MAX_SIZE)
}

/// Corners of a three-step staircase inside a square of half-width `half`,
/// rising toward +x (screen z grows downward).
fn stair_points(half: f64) -> [(f64, f64); 7] {
    let third = half / 3.0;
    [
        (-half, half),
        (-half, third),
        (-third, third),
        (-third, -third),
        (third, -third),
        (third, -half),
        (half, -half),
    ]
}

pub fn draw_station_icon(ctx: &CanvasRenderingContext2d, center: (f64, f64), icon: StationIcon, size: f64, alpha: f64) {
    let half = size / 2.0;
    let (cx, cy) = center;

    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_fill_style_str(STATION_ICON_FILL);
    ctx.set_stroke_style_str(STATION_ICON_COLOR);
    ctx.set_line_width(STATION_ICON_BORDER);

    match icon {
        StationIcon::Circle => {
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, half, 0.0, 2.0 * std::f64::consts::PI);
            ctx.fill();
            ctx.stroke();
        }
        StationIcon::Square => {
            ctx.fill_rect(cx - half, cy - half, size, size);
            ctx.stroke_rect(cx - half, cy - half, size, size);
        }
        StationIcon::StairsUpEast | StationIcon::StairsUpWest => {
            let mirror = if icon == StationIcon::StairsUpWest { -1.0 } else { 1.0 };
            ctx.set_line_width(ELEVATOR_STROKE_WIDTH);
            ctx.set_line_join("miter");
            ctx.begin_path();
            for (i, (dx, dy)) in stair_points(half).into_iter().enumerate() {
                let (x, y) = (cx + dx * mirror, cy + dy);
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();
        }
    }

    ctx.restore();
}

/// Outlined station name to the right of the icon.
pub fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, center: (f64, f64)) {
    let x = center.0 + LABEL_OFFSET_X;
    let y = center.1 + LABEL_OFFSET_Y;

    ctx.save();
    ctx.set_font(LABEL_FONT);
    ctx.set_line_join("round");
    ctx.set_line_width(LABEL_CONTOUR_WIDTH);
    ctx.set_stroke_style_str(LABEL_CONTOUR_COLOR);
    let _ = ctx.stroke_text(text, x, y);
    ctx.set_fill_style_str(LABEL_COLOR);
    let _ = ctx.fill_text(text, x, y);
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_size_is_clamped() {
        assert_eq!(icon_size(0.01), STATION_ICON_MIN_SIZE);
        assert!((icon_size(0.1) - 15.0).abs() < 1e-9);
        assert_eq!(icon_size(5.0), STATION_ICON_MAX_SIZE);
    }

    #[test]
    fn test_icon_per_type() {
        assert_eq!(StationIcon::from(StationType::Plain), StationIcon::Circle);
        assert_eq!(StationIcon::from(StationType::Semi), StationIcon::Circle);
        assert_eq!(StationIcon::from(StationType::Junction), StationIcon::Square);
        assert_eq!(StationIcon::from(StationType::Interchange), StationIcon::Square);
        assert_eq!(StationIcon::from(StationType::ElevatorWestEast), StationIcon::StairsUpEast);
        assert_eq!(StationIcon::from(StationType::ElevatorEastWest), StationIcon::StairsUpWest);
    }

    #[test]
    fn test_stairs_span_the_icon() {
        let points = stair_points(6.0);
        assert_eq!(points[0], (-6.0, 6.0));
        assert_eq!(points[6], (6.0, -6.0));
    }
}
