use shoe_geometry::Mesh;
use wgpu::util::DeviceExt;

use super::program::ShaderProgram;
use super::RenderCtx;

/// Primitive assembly mode of a model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    #[default]
    TriangleList,
}

impl Topology {
    #[inline]
    pub const fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// A static, non-indexed mesh resident on the GPU.
///
/// Positions and normals live in two separate vertex buffers bound to
/// slots 0 and 1. Uploaded once, never mutated.
pub struct Model {
    label: String,
    vertex_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    count: u32,
    topology: Topology,
}

impl Model {
    /// Uploads `mesh` into new vertex and normal buffers.
    pub fn upload(ctx: &RenderCtx<'_>, label: &str, mesh: &Mesh) -> anyhow::Result<Self> {
        let count = u32::try_from(mesh.vertex_count())
            .map_err(|_| anyhow::anyhow!("mesh `{label}` has too many vertices"))?;

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertices")),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let normal_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} normals")),
            contents: bytemuck::cast_slice(mesh.normals()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("uploaded `{label}`: {count} vertices");

        Ok(Self {
            label: label.to_owned(),
            vertex_buffer,
            normal_buffer,
            count,
            topology: Topology::TriangleList,
        })
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Records one draw using the program's currently staged uniforms.
    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        program: &mut ShaderProgram,
    ) {
        debug_assert_eq!(
            self.topology,
            program.topology(),
            "model `{}` drawn with a mismatched pipeline",
            self.label
        );

        let offset = program.commit(ctx);

        pass.set_pipeline(program.pipeline());
        pass.set_bind_group(0, program.bind_group(), &[offset]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.normal_buffer.slice(..));
        pass.draw(0..self.count, 0..1);
    }
}
