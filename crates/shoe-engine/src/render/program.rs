use std::num::NonZeroU64;

use super::error::ProgramError;
use super::model::Topology;
use super::reflect::{self, ProgramInterface, UniformLocations, FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::uniform::{align_to, SlotCursor, UniformBlock};
use super::RenderCtx;

/// Bundled shader implementing the flat/lit surface program.
pub const SHOE_SHADER: &str = include_str!("shaders/shoe.wgsl");

const VEC3_STRIDE: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;

/// A compiled render pipeline plus its reflected interface.
///
/// Uniform values are staged in a CPU-side [`UniformBlock`]. Every draw calls
/// [`commit`](Self::commit), which copies the staged block into the next slot
/// of a dynamic-offset uniform buffer. Each draw therefore sees the values
/// that were current when it was recorded, even though all queue writes land
/// before the frame's submit.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,

    interface: ProgramInterface,
    topology: Topology,
    staging: UniformBlock,

    block_size: NonZeroU64,
    slots: SlotCursor,
}

impl ShaderProgram {
    /// Compiles `source`, resolves its interface and builds the pipeline.
    pub fn new(
        ctx: &RenderCtx<'_>,
        label: &str,
        source: &str,
        topology: Topology,
    ) -> Result<Self, ProgramError> {
        let module = reflect::compile(source)?;
        let interface = reflect::reflect(&module)?;

        let block_size = NonZeroU64::new(u64::from(interface.uniform_size))
            .ok_or_else(|| ProgramError::Link("uniform block is empty".into()))?;
        let alignment = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let slots = SlotCursor::new(align_to(block_size.get(), alignment));

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("shoe uniforms bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: interface.uniform_binding,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(block_size),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("shoe pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let vertex_attr = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: interface.attributes.vertex,
        }];
        let normal_attr = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: interface.attributes.normal,
        }];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: VEC3_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &vertex_attr,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: VEC3_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &normal_attr,
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: topology.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (uniform_buffer, bind_group) = create_slots(
            ctx.device,
            &bind_group_layout,
            interface.uniform_binding,
            block_size,
            slots.buffer_size(),
        );

        log::info!(
            "program `{label}` ready: {} byte uniform block, {} byte slots",
            block_size.get(),
            slots.stride()
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            interface,
            topology,
            staging: UniformBlock::new(block_size.get() as usize),
            block_size,
            slots,
        })
    }

    #[inline]
    pub fn locations(&self) -> &UniformLocations {
        &self.interface.uniforms
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Staged uniform values for the next draw.
    #[inline]
    pub fn uniforms_mut(&mut self) -> &mut UniformBlock {
        &mut self.staging
    }

    #[inline]
    pub fn uniforms(&self) -> &UniformBlock {
        &self.staging
    }

    /// Starts a new frame; slots from the previous frame are reused.
    pub fn begin_frame(&mut self) {
        self.slots.reset();
    }

    /// Copies the staged uniforms into a fresh slot and returns its dynamic offset.
    ///
    /// Growing the slot buffer swaps in a new bind group; draws already
    /// recorded keep the old buffer alive until the frame is submitted.
    pub fn commit(&mut self, ctx: &RenderCtx<'_>) -> u32 {
        let (offset, grown) = self.slots.claim();
        if let Some(capacity) = grown {
            log::debug!("growing uniform slots to {capacity}");
            let (buffer, bind_group) = create_slots(
                ctx.device,
                &self.bind_group_layout,
                self.interface.uniform_binding,
                self.block_size,
                self.slots.buffer_size(),
            );
            self.uniform_buffer = buffer;
            self.bind_group = bind_group;
        }

        ctx.queue
            .write_buffer(&self.uniform_buffer, offset, self.staging.as_bytes());
        offset as u32
    }
}

fn create_slots(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    binding: u32,
    block_size: NonZeroU64,
    total: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("shoe uniform slots"),
        size: total,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("shoe uniforms bind group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: Some(block_size),
            }),
        }],
    });

    (buffer, bind_group)
}
