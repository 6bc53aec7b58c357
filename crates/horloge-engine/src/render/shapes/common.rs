//! Shared GPU types and utilities used by all shape renderers.

use std::num::NonZeroU64;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::RenderCtx;
use crate::scene::ZIndex;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    const SIZE: u64 = std::mem::size_of::<ViewportUniform>() as u64;
}

pub(super) fn viewport_ubo_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(ViewportUniform::SIZE),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("horloge {label} viewport ubo")),
        size: ViewportUniform::SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(queue: &wgpu::Queue, ubo: &wgpu::Buffer, viewport: Viewport) {
    queue.write_buffer(
        ubo,
        0,
        bytemuck::bytes_of(&ViewportUniform { viewport: viewport.ubo_size(), _pad: [0.0; 2] }),
    );
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers.
pub(super) struct QuadBuffers {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("horloge {label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("horloge {label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    /// Binds the quad at slot 0 and `instances` at slot 1.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, instances: &wgpu::Buffer) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

pub(super) fn create_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'_>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("horloge {label} shader")),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("horloge {label} pipeline layout")),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("horloge {label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

// ── instances ─────────────────────────────────────────────────────────────

/// Capacity the instance buffer grows to when `required` no longer fits.
pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

/// CPU staging plus the GPU instance buffer it uploads into.
pub(super) struct InstanceBuffer<I: Pod> {
    cpu: Vec<I>,
    gpu: Option<wgpu::Buffer>,
    capacity: usize,
}

impl<I: Pod> Default for InstanceBuffer<I> {
    fn default() -> Self {
        Self { cpu: Vec::new(), gpu: None, capacity: 0 }
    }
}

impl<I: Pod> InstanceBuffer<I> {
    pub(super) fn clear(&mut self) {
        self.cpu.clear();
    }

    /// Stages an instance and returns its index.
    pub(super) fn push(&mut self, inst: I) -> u32 {
        self.cpu.push(inst);
        (self.cpu.len() - 1) as u32
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }

    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, label: &str) {
        if self.cpu.is_empty() {
            return;
        }

        if self.cpu.len() > self.capacity || self.gpu.is_none() {
            let cap = grown_capacity(self.cpu.len());
            self.gpu = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("horloge {label} instance vbo")),
                size: (cap * std::mem::size_of::<I>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }

        if let Some(buf) = self.gpu.as_ref() {
            ctx.queue.write_buffer(buf, 0, bytemuck::cast_slice(&self.cpu));
        }
    }

    #[inline]
    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.gpu.as_ref()
    }
}

/// Contiguous instance ranges per z layer.
///
/// Instances are staged in paint order, so each layer forms one run.
#[derive(Debug, Default)]
pub(super) struct LayerRuns {
    runs: Vec<(ZIndex, Range<u32>)>,
}

impl LayerRuns {
    pub(super) fn clear(&mut self) {
        self.runs.clear();
    }

    /// Records instance `index` as belonging to layer `z`.
    pub(super) fn push(&mut self, z: ZIndex, index: u32) {
        match self.runs.last_mut() {
            Some((last_z, range)) if *last_z == z && range.end == index => range.end = index + 1,
            _ => self.runs.push((z, index..index + 1)),
        }
    }

    pub(super) fn range(&self, z: ZIndex) -> Option<Range<u32>> {
        self.runs.iter().find(|(rz, _)| *rz == z).map(|(_, r)| r.clone())
    }
}

// ── quad batch ────────────────────────────────────────────────────────────

/// One SDF pipeline drawing instanced quads, bound to a viewport uniform only.
///
/// Circle, line and rect renderers are thin wrappers that translate their
/// draw commands into `I` instances.
pub(super) struct QuadBatch<I: Pod> {
    label: &'static str,
    shader_src: &'static str,
    instance_attrs: &'static [wgpu::VertexAttribute],

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,

    instances: InstanceBuffer<I>,
    runs: LayerRuns,
}

impl<I: Pod> QuadBatch<I> {
    pub(super) fn new(
        label: &'static str,
        shader_src: &'static str,
        instance_attrs: &'static [wgpu::VertexAttribute],
    ) -> Self {
        Self {
            label,
            shader_src,
            instance_attrs,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::default(),
            runs: LayerRuns::default(),
        }
    }

    pub(super) fn clear(&mut self) {
        self.instances.clear();
        self.runs.clear();
    }

    pub(super) fn push(&mut self, z: ZIndex, inst: I) {
        let index = self.instances.push(inst);
        self.runs.push(z, index);
    }

    /// Creates missing GPU resources and uploads staged instances.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, self.label));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            write_viewport_ubo(ctx.queue, ubo, ctx.viewport);
        }
        self.instances.upload(ctx, self.label);
    }

    pub(super) fn draw_layer(&self, rpass: &mut wgpu::RenderPass<'_>, z: ZIndex) {
        let Some(range) = self.runs.range(z) else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(instances) = self.instances.buffer() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        quad.bind(rpass, instances);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("horloge {} bgl", self.label)),
            entries: &[viewport_ubo_layout_entry(0)],
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<I>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: self.instance_attrs,
        };

        let pipeline = create_pipeline(ctx, self.label, self.shader_src, &bgl, instance_layout);
        log::debug!("{} pipeline built for {:?}", self.label, ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = create_viewport_ubo(ctx.device, self.label);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("horloge {} bind group", self.label)),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_grows_to_power_of_two_with_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
    }

    #[test]
    fn consecutive_indices_on_one_layer_merge() {
        let mut runs = LayerRuns::default();
        runs.push(ZIndex(0), 0);
        runs.push(ZIndex(0), 1);
        runs.push(ZIndex(2), 2);
        assert_eq!(runs.range(ZIndex(0)), Some(0..2));
        assert_eq!(runs.range(ZIndex(2)), Some(2..3));
        assert_eq!(runs.range(ZIndex(1)), None);
    }

    #[test]
    fn clear_drops_all_runs() {
        let mut runs = LayerRuns::default();
        runs.push(ZIndex(0), 0);
        runs.clear();
        assert_eq!(runs.range(ZIndex(0)), None);
    }

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(ViewportUniform::SIZE, 16);
    }
}
