use glam::{Mat4, Vec3, Vec4};
use shoe_engine::core::{App, AppControl, FrameCtx};
use shoe_engine::input::Key;
use shoe_engine::render::{
    Model, RenderCtx, RenderTarget, ShaderProgram, Topology, UniformBlock, UniformLocations,
    SHOE_SHADER,
};
use shoe_engine::time::AnimationClock;
use shoe_geometry::transform::{normal_matrix, translation};
use shoe_geometry::{light_orbit, surface_mesh, CameraRig};

use crate::config::SceneConfig;
use crate::trackball::TrackballRotator;

/// Uniform values shared by every draw of one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    pub model_view_projection: Mat4,
    pub normal_matrix: Mat4,
    /// Moves the light indicator onto its orbit.
    pub translation: Mat4,
    pub light_pos: Vec3,
    pub color: Vec4,
}

impl FrameUniforms {
    pub fn new(camera: &CameraRig, view: Mat4, movement: f64, color: Vec4) -> Self {
        let orbit = light_orbit(movement);
        Self {
            model_view_projection: camera.model_view_projection(view),
            normal_matrix: normal_matrix(view),
            translation: translation(orbit.x, orbit.y, orbit.z),
            light_pos: orbit,
            color,
        }
    }
}

/// Uniform blocks for one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Flat-colored surface.
    pub surface: UniformBlock,
    /// Lit, translated light indicator.
    pub light: UniformBlock,
    /// What stays staged once the frame is recorded.
    pub after: UniformBlock,
}

/// Stages `frame` into `block` and snapshots it around each draw.
pub fn draw_plan(
    frame: &FrameUniforms,
    loc: &UniformLocations,
    mut block: UniformBlock,
) -> DrawPlan {
    block.set_mat4(loc.model_view_projection, &frame.model_view_projection);
    block.set_mat4(loc.normal_matrix, &frame.normal_matrix);
    block.set_vec4(loc.color, frame.color);
    block.set_mat4(loc.translation_matrix, &frame.translation);
    block.set_vec3(loc.light_pos, frame.light_pos);

    block.set_flag(loc.lighting, false);
    let surface = block.clone();
    block.set_flag(loc.lighting, true);
    let light = block.clone();
    block.set_flag(loc.lighting, false);

    DrawPlan {
        surface,
        light,
        after: block,
    }
}

/// GPU resources created once the device exists.
struct SceneGpu {
    program: ShaderProgram,
    surface: Model,
    light: Model,
}

impl SceneGpu {
    fn new(ctx: &RenderCtx<'_>, config: &SceneConfig) -> anyhow::Result<Self> {
        let program = ShaderProgram::new(ctx, "shoe program", SHOE_SHADER, Topology::TriangleList)?;
        let surface = Model::upload(ctx, "surface", &surface_mesh(&config.grid))?;
        let light = Model::upload(ctx, "light", &config.light.mesh())?;

        log::info!(
            "scene ready: surface {} vertices, light {} vertices",
            surface.count(),
            light.count()
        );

        Ok(Self {
            program,
            surface,
            light,
        })
    }

    /// Surface unlit, then the indicator sphere lit and translated.
    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameUniforms) {
        let plan = draw_plan(frame, self.program.locations(), self.program.uniforms().clone());
        self.program.begin_frame();

        let mut pass = target.begin_pass("shoe scene");
        for (model, block) in [(&self.surface, plan.surface), (&self.light, plan.light)] {
            *self.program.uniforms_mut() = block;
            model.draw(ctx, &mut pass, &mut self.program);
        }
        *self.program.uniforms_mut() = plan.after;
    }
}

/// The shoe surface with its orbiting light.
pub struct Scene {
    config: SceneConfig,
    clock: AnimationClock,
    trackball: TrackballRotator,
    gpu: Option<SceneGpu>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            clock: AnimationClock::new(config.orbit_speed),
            config,
            trackball: TrackballRotator::new(),
            gpu: None,
        }
    }
}

impl App for Scene {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        self.gpu = Some(SceneGpu::new(ctx, &self.config)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        let viewport = ctx.window.viewport();
        let mut view_changed = false;
        for ev in &ctx.input_frame.events {
            view_changed |= self.trackball.handle_event(ev, viewport);
        }
        if view_changed {
            log::debug!("view rotation {:?}", self.trackball.rotation());
        }

        let frame = FrameUniforms::new(
            &self.config.camera,
            self.trackball.view_matrix(),
            self.clock.phase_at(ctx.time.wall),
            self.config.surface_color.into(),
        );

        let Some(gpu) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        ctx.render(self.config.clear_color, |rctx, target| {
            gpu.draw(rctx, target, &frame)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoe_engine::render::reflect::{compile, reflect};
    use shoe_engine::render::UniformLocation;
    use shoe_geometry::LightIndicator;

    fn frame_at(movement: f64) -> FrameUniforms {
        FrameUniforms::new(&CameraRig::default(), Mat4::IDENTITY, movement, Vec4::ONE)
    }

    #[test]
    fn light_and_sphere_share_the_orbit() {
        for &t in &[0.0, 0.5, 2.0, 1_760_000_000.25] {
            let f = frame_at(t);
            assert_eq!(f.translation.w_axis.truncate(), f.light_pos);
            assert_eq!(f.light_pos, light_orbit(t));
        }
    }

    #[test]
    fn orbit_quarter_turn() {
        let f = frame_at(std::f64::consts::FRAC_PI_2);
        assert!(f.light_pos.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn identity_view_gives_identity_normal_matrix() {
        assert!(frame_at(0.0).normal_matrix.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn rotated_view_normal_matrix_is_the_rotation() {
        let view = Mat4::from_rotation_x(0.8);
        let f = FrameUniforms::new(&CameraRig::default(), view, 0.0, Vec4::ONE);
        assert!(f.normal_matrix.abs_diff_eq(view, 1e-5));
    }

    #[test]
    fn surface_color_is_yellow() {
        let color: Vec4 = SceneConfig::default().surface_color.into();
        assert_eq!(color, Vec4::new(1.0, 1.0, 0.0, 1.0));
    }

    // ── draw plan ─────────────────────────────────────────────────────────

    fn shader_layout() -> (UniformLocations, usize) {
        let iface = reflect(&compile(SHOE_SHADER).unwrap()).unwrap();
        (iface.uniforms, iface.uniform_size as usize)
    }

    fn plan_at(movement: f64) -> (DrawPlan, UniformLocations) {
        let (loc, size) = shader_layout();
        (draw_plan(&frame_at(movement), &loc, UniformBlock::new(size)), loc)
    }

    fn flag(block: &UniformBlock, loc: UniformLocation) -> u32 {
        let start = loc.offset as usize;
        u32::from_ne_bytes(block.as_bytes()[start..start + 4].try_into().unwrap())
    }

    #[test]
    fn surface_is_drawn_unlit_then_light_lit() {
        let (plan, loc) = plan_at(0.3);
        assert_eq!(flag(&plan.surface, loc.lighting), 0);
        assert_eq!(flag(&plan.light, loc.lighting), 1);
    }

    #[test]
    fn lighting_is_reset_after_the_frame() {
        let (plan, loc) = plan_at(0.3);
        assert_eq!(flag(&plan.after, loc.lighting), 0);
        assert_eq!(plan.after, plan.surface);
    }

    #[test]
    fn draws_differ_only_in_the_lighting_flag() {
        let (plan, loc) = plan_at(1.1);
        let start = loc.lighting.offset as usize;
        let (a, b) = (plan.surface.as_bytes(), plan.light.as_bytes());
        assert_eq!(a[..start], b[..start]);
        assert_eq!(a[start + 4..], b[start + 4..]);
    }

    #[test]
    fn plan_carries_the_frame_values() {
        let (plan, loc) = plan_at(std::f64::consts::FRAC_PI_2);
        let start = loc.light_pos.offset as usize;
        let light_pos: Vec<f32> = plan.light.as_bytes()[start..start + 12]
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert!(light_pos[0].abs() < 1e-6);
        assert!((light_pos[1] - 1.0).abs() < 1e-6);
        assert_eq!(light_pos[2], 0.0);
    }

    // ── lit shading ───────────────────────────────────────────────────────

    /// Mirrors the lit branch of `vs_main` and `fs_main`.
    fn lit_shade(frame: &FrameUniforms, vertex: Vec3, normal: Vec3) -> f32 {
        let n = frame.normal_matrix.transform_vector3(normal).normalize();
        let l = frame
            .normal_matrix
            .transform_vector3(frame.light_pos - vertex)
            .normalize();
        0.2 + 0.8 * n.dot(l).abs()
    }

    #[test]
    fn lit_sphere_is_shaded_across_its_face() {
        let frame = frame_at(0.0);
        let mesh = LightIndicator::default().mesh();
        let shades: Vec<f32> = mesh
            .vertices()
            .iter()
            .zip(mesh.normals())
            .map(|(v, n)| lit_shade(&frame, *v, *n))
            .collect();

        let lo = shades.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = shades.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(hi - lo > 0.5, "shade range {lo}..{hi}");
        assert!(lo >= 0.2 - 1e-6 && hi <= 1.0 + 1e-6);
    }

    #[test]
    fn pole_and_equator_shade_differently() {
        let frame = frame_at(0.0);
        let pole = Vec3::new(0.0, 0.0, 0.1);
        let equator = Vec3::new(0.1, 0.0, 0.0);
        let a = lit_shade(&frame, pole, pole.normalize());
        let b = lit_shade(&frame, equator, equator.normalize());
        assert!((a - b).abs() > 0.5, "pole {a}, equator {b}");
    }
}
