use crate::scene::{DrawList, ZIndex};
use crate::text::FontSystem;

use super::shapes::circle::CircleRenderer;
use super::shapes::line::LineRenderer;
use super::shapes::rect::RectRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

/// All shape renderers, drawn into one pass.
///
/// Layers are painted back to front. Within a layer the order is rects,
/// circles, lines, then text.
#[derive(Default)]
pub struct Renderers {
    rect: RectRenderer,
    circle: CircleRenderer,
    line: LineRenderer,
    text: TextRenderer,
    layers: Vec<ZIndex>,
}

impl Renderers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads and draws everything recorded in `draw_list`.
    ///
    /// Call at most once per frame: each renderer owns one instance buffer and
    /// a second call would overwrite the first call's instances before submit.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        if draw_list.is_empty() {
            return;
        }

        self.rect.prepare(ctx, draw_list);
        self.circle.prepare(ctx, draw_list);
        self.line.prepare(ctx, draw_list);
        self.text.prepare(ctx, draw_list, fonts);

        collect_layers(draw_list, &mut self.layers);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("horloge shapes pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for &z in &self.layers {
            self.rect.draw_layer(&mut rpass, z);
            self.circle.draw_layer(&mut rpass, z);
            self.line.draw_layer(&mut rpass, z);
            self.text.draw_layer(&mut rpass, z);
        }
    }
}

/// Distinct z layers of `draw_list`, ascending.
fn collect_layers(draw_list: &mut DrawList, out: &mut Vec<ZIndex>) {
    out.clear();
    for item in draw_list.iter_in_paint_order() {
        if out.last() != Some(&item.key.z) {
            out.push(item.key.z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    #[test]
    fn layers_are_distinct_and_ascending() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(ZIndex(3), Vec2::new(0.0, 0.0), 6.0, Color::BLACK);
        dl.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        dl.push_line(ZIndex(2), Vec2::zero(), Vec2::new(1.0, 0.0), 2.0, Color::RED);
        dl.push_line(ZIndex(2), Vec2::zero(), Vec2::new(0.0, 1.0), 2.0, Color::RED);

        let mut layers = Vec::new();
        collect_layers(&mut dl, &mut layers);
        assert_eq!(layers, vec![ZIndex(0), ZIndex(2), ZIndex(3)]);
    }
}
