use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::LineCmd;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::common::QuadBatch;

/// Renderer for `DrawCmd::Line`: round-capped segments drawn as a capsule SDF.
pub struct LineRenderer {
    batch: QuadBatch<LineInstance>,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self {
            batch: QuadBatch::new("line", include_str!("shaders/line.wgsl"), &LineInstance::ATTRS),
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) {
        self.batch.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Line(cmd) = &item.cmd else { continue };
            if let Some(inst) = LineInstance::from_cmd(cmd) {
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

/// Instance data layout (40 bytes):
///
///  offset  0  from    [f32; 2]   loc 1
///  offset  8  to      [f32; 2]   loc 2
///  offset 16  params  [f32; 2]   loc 3  (.x = half width)
///  offset 24  color   [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    from: [f32; 2],
    to: [f32; 2],
    params: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // from
        2 => Float32x2, // to
        3 => Float32x2, // params
        4 => Float32x4  // color
    ];

    fn from_cmd(cmd: &LineCmd) -> Option<Self> {
        if !(cmd.width > 0.0) || !cmd.color.is_visible() {
            return None;
        }
        if !cmd.from.is_finite() || !cmd.to.is_finite() {
            return None;
        }

        Some(Self {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            params: [cmd.width * 0.5, 0.0],
            color: cmd.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn line(width: f32, to: Vec2) -> LineCmd {
        LineCmd { from: Vec2::new(200.0, 200.0), to, width, color: Color::RED }
    }

    #[test]
    fn layout_matches_documented_stride() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 40);
    }

    #[test]
    fn stores_half_width() {
        let inst = LineInstance::from_cmd(&line(6.0, Vec2::new(200.0, 120.0))).unwrap();
        assert_eq!(inst.params[0], 3.0);
        assert_eq!(inst.to, [200.0, 120.0]);
    }

    #[test]
    fn zero_width_and_nan_endpoints_are_skipped() {
        assert!(LineInstance::from_cmd(&line(0.0, Vec2::new(1.0, 1.0))).is_none());
        assert!(LineInstance::from_cmd(&line(2.0, Vec2::new(f32::NAN, 1.0))).is_none());
    }

    #[test]
    fn zero_length_segment_still_draws_a_dot() {
        assert!(LineInstance::from_cmd(&line(2.0, Vec2::new(200.0, 200.0))).is_some());
    }
}
