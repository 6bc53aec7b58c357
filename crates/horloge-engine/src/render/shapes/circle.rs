use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::common::QuadBatch;

/// Renderer for `DrawCmd::Circle`.
///
/// The border is an antialiased ring just inside the circle's radius.
pub struct CircleRenderer {
    batch: QuadBatch<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            batch: QuadBatch::new("circle", include_str!("shaders/circle.wgsl"), &CircleInstance::ATTRS),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages every visible circle in `draw_list` and uploads them.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) {
        self.batch.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Circle(cmd) = &item.cmd else { continue };
            if let Some(inst) = CircleInstance::from_cmd(cmd) {
                self.batch.push(item.key.z, inst);
            }
        }
        self.batch.upload(ctx);
    }

    pub fn draw_layer(&self, rpass: &mut wgpu::RenderPass<'_>, z: ZIndex) {
        self.batch.draw_layer(rpass, z);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  center       [f32; 2]   loc 1
///  offset  8  radius_bw    [f32; 2]   loc 2  (.x = radius, .y = border width)
///  offset 16  fill         [f32; 4]   loc 3
///  offset 32  border_color [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_bw
        3 => Float32x4, // fill
        4 => Float32x4  // border_color
    ];

    /// `None` for degenerate or fully invisible circles.
    fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
            return None;
        }

        let (border_width, border_color) = match &cmd.border {
            Some(b) if b.width > 0.0 => (b.width.min(cmd.radius), b.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };

        if !cmd.fill.is_visible() && border_color[3] <= 0.0 {
            return None;
        }

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            fill: cmd.fill.to_array(),
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Stroke;

    fn cmd(radius: f32, fill: Color, border: Option<Stroke>) -> CircleCmd {
        CircleCmd { center: Vec2::new(200.0, 200.0), radius, fill, border }
    }

    #[test]
    fn layout_matches_documented_stride() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 48);
    }

    #[test]
    fn zero_radius_is_skipped() {
        assert!(CircleInstance::from_cmd(&cmd(0.0, Color::BLACK, None)).is_none());
    }

    #[test]
    fn ring_keeps_transparent_fill() {
        let ring = cmd(160.0, Color::TRANSPARENT, Some(Stroke::new(4.0, Color::BLACK)));
        let inst = CircleInstance::from_cmd(&ring).unwrap();
        assert_eq!(inst.radius_bw, [160.0, 4.0]);
        assert_eq!(inst.fill, [0.0; 4]);
        assert_eq!(inst.border_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn invisible_circle_is_skipped() {
        assert!(CircleInstance::from_cmd(&cmd(5.0, Color::TRANSPARENT, None)).is_none());
    }
}
