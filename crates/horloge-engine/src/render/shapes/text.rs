use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::shapes::TextCmd;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontSystem;

use super::common::{
    InstanceBuffer, LayerRuns, QUAD_INDICES, QuadBuffers, create_pipeline, create_viewport_ubo,
    viewport_ubo_layout_entry, write_viewport_ubo,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── atlas packing ──────────────────────────────────────────────────────────

/// Shelf packer for the glyph atlas.
///
/// Glyphs fill a row left to right; a new row starts below the tallest glyph
/// of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self { size, cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Reserves a `w` x `h` slot and returns its top-left corner.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── glyph atlas ─────────────────────────────────────────────────────────

/// Atlas texture plus the UV rect of every glyph rasterized into it.
///
/// Glyphs are keyed by `GlyphRasterConfig` (font, glyph index, pixel size)
/// and live for the renderer's lifetime.
struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    uvs: HashMap<GlyphRasterConfig, [f32; 4]>,
    warned_full: bool,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("horloge glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, packer: ShelfPacker::new(ATLAS_SIZE), uvs: HashMap::new(), warned_full: false }
    }

    /// UV rect `[u0, v0, u1, v1]` of `key`, rasterizing it on first use.
    /// `None` for empty glyphs and once the atlas is full.
    fn lookup(&mut self, queue: &wgpu::Queue, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<[f32; 4]> {
        if let Some(uv) = self.uvs.get(&key) {
            return Some(*uv);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }

        let Some((x, y)) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be drawn");
                self.warned_full = true;
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let uv = atlas_uv(x, y, w, h);
        self.uvs.insert(key, uv);
        Some(uv)
    }
}

/// Normalized atlas rect of a `w` x `h` slot at (`x`, `y`).
fn atlas_uv(x: u32, y: u32, w: u32, h: u32) -> [f32; 4] {
    let n = ATLAS_SIZE as f32;
    [x as f32 / n, y as f32 / n, (x + w) as f32 / n, (y + h) as f32 / n]
}

// ── gpu state ─────────────────────────────────────────────────────────────

/// Pipeline and bindings for one surface format. Rebuilt when it changes.
struct TextPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: QuadBuffers,
}

impl TextPipeline {
    fn new(ctx: &RenderCtx<'_>, atlas: &GlyphAtlas) -> Self {
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("horloge text bgl"),
            entries: &[
                viewport_ubo_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("horloge glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = create_viewport_ubo(ctx.device, "text");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("horloge text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&atlas.view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        Self {
            format: ctx.surface_format,
            pipeline: create_pipeline(ctx, "text", include_str!("shaders/text.wgsl"), &bgl, GlyphInstance::layout()),
            bind_group,
            viewport_ubo,
            quad: QuadBuffers::new(ctx.device, "text"),
        }
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Text is laid out by fontdue at physical size and drawn from a 2048 x 2048
/// R8Unorm glyph atlas.
pub struct TextRenderer {
    atlas: Option<GlyphAtlas>,
    gpu: Option<TextPipeline>,
    instances: InstanceBuffer<GlyphInstance>,
    runs: LayerRuns,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            atlas: None,
            gpu: None,
            instances: InstanceBuffer::default(),
            runs: LayerRuns::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out every text command, rasterizes missing glyphs and uploads the
    /// glyph instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList, fonts: &FontSystem) {
        self.instances.clear();
        self.runs.clear();

        let scale = ctx.scale_factor.max(0.01);
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            self.stage_text(ctx, item.key.z, cmd, fonts, scale);
        }

        if self.instances.is_empty() {
            return;
        }

        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            if let Some(atlas) = self.atlas.as_ref() {
                self.gpu = Some(TextPipeline::new(ctx, atlas));
            }
        }
        if let Some(gpu) = self.gpu.as_ref() {
            write_viewport_ubo(ctx.queue, &gpu.viewport_ubo, ctx.viewport);
        }
        self.instances.upload(ctx, "text");
    }

    pub fn draw_layer(&self, rpass: &mut wgpu::RenderPass<'_>, z: ZIndex) {
        let Some(range) = self.runs.range(z) else { return };
        let Some(gpu) = self.gpu.as_ref() else { return };
        let Some(instances) = self.instances.buffer() else { return };

        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        gpu.quad.bind(rpass, instances);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
    }

    fn stage_text(
        &mut self,
        ctx: &RenderCtx<'_>,
        z: ZIndex,
        cmd: &TextCmd,
        fonts: &FontSystem,
        scale: f32,
    ) {
        if cmd.text.is_empty() || !cmd.color.is_visible() || !(cmd.size > 0.0) {
            return;
        }
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("unknown {:?} in text command; skipped", cmd.font);
            return;
        };

        // Physical pixels, origin snapped, so glyph bitmaps map 1:1.
        self.layout.reset(&LayoutSettings {
            x: (cmd.origin.x * scale).round(),
            y: (cmd.origin.y * scale).round(),
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx.device));
        let color = cmd.color.to_array();

        for g in self.layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let Some([u0, v0, u1, v1]) = atlas.lookup(ctx.queue, font, g.key) else { continue };

            let index = self.instances.push(GlyphInstance {
                dst_min: [g.x / scale, g.y / scale],
                dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                uv_min: [u0, v0],
                uv_max: [u1, v1],
                color,
            });
            self.runs.push(z, index);
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 5), Some((1, 1)));
        assert_eq!(p.place(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: wraps below the tallest glyph of the row.
        assert_eq!(p.place(10, 4), Some((1, 10)));
    }

    #[test]
    fn packer_reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert!(p.place(14, 14).is_none());
        assert!(p.place(1, 1).is_none());
    }

    #[test]
    fn oversized_glyph_is_rejected_without_filling() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(20, 2).is_none());
        assert!(p.place(2, 2).is_some());
    }

    #[test]
    fn atlas_uv_spans_the_slot() {
        let n = ATLAS_SIZE as f32;
        assert_eq!(atlas_uv(0, 0, 8, 16), [0.0, 0.0, 8.0 / n, 16.0 / n]);
        let [u0, _, u1, _] = atlas_uv(ATLAS_SIZE - 4, 0, 4, 4);
        assert_eq!(u1, 1.0);
        assert!(u0 < u1);
    }

    #[test]
    fn glyph_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }
}
