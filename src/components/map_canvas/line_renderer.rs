use crate::constants::{
    ACTIVE_VERTEX_HANDLE_COLOR, CASING_BASE_WIDTH, CASING_ZOOM_WIDTH, FALLBACK_LINE_COLOR, ROAD_CASING_COLOR,
    STROKE_BASE_WIDTH, STROKE_ZOOM_WIDTH, VERTEX_HANDLE_COLOR, VERTEX_HANDLE_SIZE,
};
use crate::models::{Line, Vertex};
use super::staging::{StagingBuffer, VertexRef};
use super::viewport::Viewport;
use web_sys::CanvasRenderingContext2d;

#[must_use]
pub fn casing_width(zoom: f64) -> f64 {
    CASING_ZOOM_WIDTH * zoom + CASING_BASE_WIDTH
}

#[must_use]
pub fn stroke_width(zoom: f64) -> f64 {
    STROKE_ZOOM_WIDTH * zoom + STROKE_BASE_WIDTH
}

/// CSS color of a line, black when the stored hex is unusable.
#[must_use]
pub fn css_color(line: &Line) -> String {
    match line.rgb() {
        Some((r, g, b)) => format!("#{r:02x}{g:02x}{b:02x}"),
        None => FALLBACK_LINE_COLOR.to_string(),
    }
}

fn trace_polyline(ctx: &CanvasRenderingContext2d, viewport: &Viewport, vertices: &[Vertex]) {
    let mut points = vertices.iter().map(|v| viewport.world_to_screen(*v));
    let Some(first) = points.next() else { return };
    ctx.begin_path();
    ctx.move_to(first.0, first.1);
    for (x, y) in points {
        ctx.line_to(x, y);
    }
}

/// Draw every branch of a line as a road: a dark casing under the line color.
pub fn draw_road(ctx: &CanvasRenderingContext2d, viewport: &Viewport, branches: &[&[Vertex]], color: &str, alpha: f64) {
    let zoom = viewport.zoom();
    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    ctx.set_stroke_style_str(ROAD_CASING_COLOR);
    ctx.set_line_width(casing_width(zoom));
    for vertices in branches {
        trace_polyline(ctx, viewport, vertices);
        ctx.stroke();
    }

    ctx.set_stroke_style_str(color);
    ctx.set_line_width(stroke_width(zoom));
    for vertices in branches {
        trace_polyline(ctx, viewport, vertices);
        ctx.stroke();
    }

    ctx.restore();
}

/// Small squares on every staged vertex, the active one in its own color.
pub fn draw_vertex_handles(
    ctx: &CanvasRenderingContext2d,
    viewport: &Viewport,
    staging: &StagingBuffer,
    active: Option<&VertexRef>,
) {
    let half = VERTEX_HANDLE_SIZE / 2.0;
    for (branch, vertices) in staging.branches() {
        for (index, vertex) in vertices.iter().enumerate() {
            let is_active = active.is_some_and(|a| a.branch == branch && a.index == index);
            let color = if is_active { ACTIVE_VERTEX_HANDLE_COLOR } else { VERTEX_HANDLE_COLOR };
            let (x, y) = viewport.world_to_screen(*vertex);
            ctx.set_fill_style_str(color);
            ctx.fill_rect(x - half, y - half, VERTEX_HANDLE_SIZE, VERTEX_HANDLE_SIZE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_grow_with_zoom() {
        assert_eq!(casing_width(0.0), 5.0);
        assert_eq!(stroke_width(0.0), 3.0);
        assert_eq!(casing_width(1.0), 13.0);
        assert_eq!(stroke_width(1.0), 7.0);
        assert!(casing_width(0.05) > stroke_width(0.05));
    }

    #[test]
    fn test_css_color() {
        let line = Line {
            color: "AA0044".to_string(),
            ..Line::default()
        };
        assert_eq!(css_color(&line), "#aa0044");

        let broken = Line {
            color: "oops".to_string(),
            ..Line::default()
        };
        assert_eq!(css_color(&broken), FALLBACK_LINE_COLOR);
    }
}
