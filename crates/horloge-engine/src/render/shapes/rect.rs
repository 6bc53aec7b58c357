use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::RectCmd;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::common::QuadBatch;

/// Renderer for `DrawCmd::Rect` (solid, axis-aligned).
pub struct RectRenderer {
    batch: QuadBatch<RectInstance>,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            batch: QuadBatch::new("rect", include_str!("shaders/rect.wgsl"), &RectInstance::ATTRS),
        }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList) {
        self.batch.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Rect(cmd) = &item.cmd else { continue };
            if let Some(inst) = RectInstance::from_cmd(cmd) {
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

/// Instance data layout (32 bytes):
///
///  offset  0  origin  [f32; 2]   loc 1
///  offset  8  size    [f32; 2]   loc 2
///  offset 16  color   [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn from_cmd(cmd: &RectCmd) -> Option<Self> {
        if cmd.rect.is_empty() || !cmd.color.is_visible() {
            return None;
        }
        Some(Self {
            origin: [cmd.rect.origin.x, cmd.rect.origin.y],
            size: [cmd.rect.size.x, cmd.rect.size.y],
            color: cmd.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    #[test]
    fn layout_matches_documented_stride() {
        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
    }

    #[test]
    fn empty_rect_is_skipped() {
        let cmd = RectCmd { rect: Rect::new(0.0, 0.0, 0.0, 10.0), color: Color::BLACK };
        assert!(RectInstance::from_cmd(&cmd).is_none());
    }

    #[test]
    fn visible_rect_copies_geometry() {
        let cmd = RectCmd { rect: Rect::new(10.0, 20.0, 30.0, 40.0), color: Color::WHITE };
        let inst = RectInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.origin, [10.0, 20.0]);
        assert_eq!(inst.size, [30.0, 40.0]);
    }
}
