//! Draw primitives and canvas submission
//!
//! The scene builder emits these commands; the wasm driver replays them
//! against a `CanvasRenderingContext2d` once per frame. The renderer holds
//! no state of its own and feeds nothing back into the simulation.

use glam::Vec2;

use crate::palette::Color;

/// One immediate-mode draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Axis-aligned filled rectangle (top-left origin)
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    /// Filled axis-aligned ellipse
    Ellipse {
        center: Vec2,
        rx: f32,
        ry: f32,
        color: Color,
        alpha: f32,
    },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        alpha: f32,
    },
    /// Filled triangle
    Triangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: Color,
        alpha: f32,
    },
}

/// CSS color string for a fill/stroke style
pub fn css(color: Color, alpha: f32) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        color.r,
        color.g,
        color.b,
        alpha.clamp(0.0, 1.0)
    )
}

/// Replay a command list onto the canvas (wasm only)
#[cfg(target_arch = "wasm32")]
pub fn execute(ctx: &web_sys::CanvasRenderingContext2d, cmds: &[DrawCmd]) {
    use std::f64::consts::TAU;

    for cmd in cmds {
        match *cmd {
            DrawCmd::Rect {
                pos,
                size,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(color, alpha));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(color, alpha));
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                ctx.fill();
            }
            DrawCmd::Ellipse {
                center,
                rx,
                ry,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(color, alpha));
                ctx.begin_path();
                let _ = ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    rx as f64,
                    ry as f64,
                    0.0,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
                alpha,
            } => {
                ctx.set_stroke_style_str(&css(color, alpha));
                ctx.set_line_width(width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCmd::Triangle {
                a,
                b,
                c,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(color, alpha));
                ctx.begin_path();
                ctx.move_to(a.x as f64, a.y as f64);
                ctx.line_to(b.x as f64, b.y as f64);
                ctx.line_to(c.x as f64, c.y as f64);
                ctx.close_path();
                ctx.fill();
            }
        }
    }
}
