//! WGSL compilation and interface reflection.
//!
//! wgpu has no `getAttribLocation` / `getUniformLocation`; the equivalent is
//! read from the naga module once at program creation: attribute names map to
//! `@location`s of the vertex entry point, uniform names map to byte offsets
//! inside the single uniform block.

use naga::{AddressSpace, Binding, Module, Scalar, ShaderStage, TypeInner, VectorSize};

use super::error::ProgramError;
use super::uniform::{UniformKind, UniformLocation};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex input locations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeLocations {
    pub vertex: u32,
    pub normal: u32,
}

/// Uniform member locations inside the block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocations {
    pub model_view_projection: UniformLocation,
    pub normal_matrix: UniformLocation,
    pub translation_matrix: UniformLocation,
    pub color: UniformLocation,
    pub lighting: UniformLocation,
    pub light_pos: UniformLocation,
}

/// Everything the pipeline and the frame driver need from the shader interface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProgramInterface {
    pub attributes: AttributeLocations,
    pub uniforms: UniformLocations,
    /// `@binding` of the uniform block in `@group(0)`.
    pub uniform_binding: u32,
    /// Size in bytes of the uniform block.
    pub uniform_size: u32,
}

/// Parses and validates WGSL, rendering diagnostics against `source`.
pub fn compile(source: &str) -> Result<Module, ProgramError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ProgramError::Compile(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| ProgramError::Validate(e.emit_to_string(source)))?;

    Ok(module)
}

/// Resolves entry points, attribute locations and uniform offsets.
pub fn reflect(module: &Module) -> Result<ProgramInterface, ProgramError> {
    find_entry(module, FRAGMENT_ENTRY, ShaderStage::Fragment)?;
    let inputs = vertex_inputs(module)?;

    let attribute = |name: &'static str| {
        inputs
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, location)| location)
            .ok_or(ProgramError::MissingAttribute(name))
    };
    let attributes = AttributeLocations {
        vertex: attribute("vertex")?,
        normal: attribute("normal")?,
    };

    let (uniform_binding, uniform_size, members) = uniform_block(module)?;
    let uniform = |name: &'static str, kind: UniformKind| {
        let &(_, offset, found) = members
            .iter()
            .find(|(n, _, _)| n == name)
            .ok_or(ProgramError::MissingUniform(name))?;
        if found != Some(kind) {
            return Err(ProgramError::UniformType {
                name,
                expected: kind.wgsl_name(),
            });
        }
        Ok(UniformLocation { offset, kind })
    };
    let uniforms = UniformLocations {
        model_view_projection: uniform("ModelViewProjectionMatrix", UniformKind::Mat4)?,
        normal_matrix: uniform("NormalMatrix", UniformKind::Mat4)?,
        translation_matrix: uniform("TranslationMatrix", UniformKind::Mat4)?,
        color: uniform("color", UniformKind::Vec4)?,
        lighting: uniform("lighting", UniformKind::Flag)?,
        light_pos: uniform("lightPos", UniformKind::Vec3)?,
    };

    Ok(ProgramInterface {
        attributes,
        uniforms,
        uniform_binding,
        uniform_size,
    })
}

fn find_entry<'m>(
    module: &'m Module,
    name: &str,
    stage: ShaderStage,
) -> Result<&'m naga::EntryPoint, ProgramError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == stage)
        .ok_or_else(|| ProgramError::Link(format!("missing {stage:?} entry point `{name}`")))
}

/// `(name, location)` of every vertex input, whether declared as a plain
/// argument or as a member of an input struct.
fn vertex_inputs(module: &Module) -> Result<Vec<(String, u32)>, ProgramError> {
    let ep = find_entry(module, VERTEX_ENTRY, ShaderStage::Vertex)?;
    let mut out = Vec::new();

    for arg in &ep.function.arguments {
        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(Binding::Location { location, .. }), _) => {
                if let Some(name) = &arg.name {
                    out.push((name.clone(), *location));
                }
            }
            (None, TypeInner::Struct { members, .. }) => {
                for m in members {
                    if let (Some(name), Some(Binding::Location { location, .. })) =
                        (&m.name, &m.binding)
                    {
                        out.push((name.clone(), *location));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(out)
}

type Members = Vec<(String, u32, Option<UniformKind>)>;

fn uniform_block(module: &Module) -> Result<(u32, u32, Members), ProgramError> {
    let mut blocks = module
        .global_variables
        .iter()
        .filter(|(_, var)| var.space == AddressSpace::Uniform);

    let (_, var) = blocks
        .next()
        .ok_or_else(|| ProgramError::Link("no uniform block".into()))?;
    if blocks.next().is_some() {
        return Err(ProgramError::Link("expected exactly one uniform block".into()));
    }

    let binding = match &var.binding {
        Some(rb) if rb.group == 0 => rb.binding,
        _ => return Err(ProgramError::Link("uniform block must be in @group(0)".into())),
    };

    let TypeInner::Struct { members, span } = &module.types[var.ty].inner else {
        return Err(ProgramError::Link("uniform block must be a struct".into()));
    };

    let members = members
        .iter()
        .filter_map(|m| {
            let name = m.name.clone()?;
            Some((name, m.offset, kind_of(&module.types[m.ty].inner)))
        })
        .collect();

    Ok((binding, *span, members))
}

fn kind_of(inner: &TypeInner) -> Option<UniformKind> {
    match *inner {
        TypeInner::Matrix {
            columns: VectorSize::Quad,
            rows: VectorSize::Quad,
            scalar: Scalar::F32,
        } => Some(UniformKind::Mat4),
        TypeInner::Vector {
            size: VectorSize::Quad,
            scalar: Scalar::F32,
        } => Some(UniformKind::Vec4),
        TypeInner::Vector {
            size: VectorSize::Tri,
            scalar: Scalar::F32,
        } => Some(UniformKind::Vec3),
        TypeInner::Scalar(Scalar::U32) | TypeInner::Scalar(Scalar::I32) => Some(UniformKind::Flag),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SHOE_SHADER;

    fn interface(source: &str) -> Result<ProgramInterface, ProgramError> {
        reflect(&compile(source)?)
    }

    // ── bundled shader ────────────────────────────────────────────────────

    #[test]
    fn bundled_shader_compiles() {
        compile(SHOE_SHADER).unwrap();
    }

    #[test]
    fn bundled_shader_attribute_locations() {
        let iface = interface(SHOE_SHADER).unwrap();
        assert_eq!(iface.attributes, AttributeLocations { vertex: 0, normal: 1 });
    }

    #[test]
    fn bundled_shader_uniform_layout() {
        let iface = interface(SHOE_SHADER).unwrap();
        let u = iface.uniforms;
        assert_eq!(u.model_view_projection.offset, 0);
        assert_eq!(u.normal_matrix.offset, 64);
        assert_eq!(u.translation_matrix.offset, 128);
        assert_eq!(u.color.offset, 192);
        assert_eq!(u.light_pos.offset, 208);
        assert_eq!(u.lighting.offset, 220);
        assert_eq!(iface.uniform_size, 224);
        assert_eq!(iface.uniform_binding, 0);
    }

    #[test]
    fn bundled_shader_lights_from_model_space_vertex() {
        assert!(SHOE_SHADER.contains("u.lightPos - vertex"));
        assert!(!SHOE_SHADER.contains("u.lightPos - world"));
    }

    // ── failures ──────────────────────────────────────────────────────────

    const MINIMAL: &str = r#"
struct Uniforms {
    ModelViewProjectionMatrix: mat4x4<f32>,
    NormalMatrix: mat4x4<f32>,
    TranslationMatrix: mat4x4<f32>,
    color: vec4<f32>,
    lightPos: vec3<f32>,
    lighting: u32,
}

@group(0) @binding(0) var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(3) vertex: vec3<f32>, @location(5) normal: vec3<f32>) -> @builtin(position) vec4<f32> {
    return u.ModelViewProjectionMatrix * vec4<f32>(vertex + normal * 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return u.color;
}
"#;

    #[test]
    fn reflects_custom_locations() {
        let iface = interface(MINIMAL).unwrap();
        assert_eq!(iface.attributes, AttributeLocations { vertex: 3, normal: 5 });
    }

    #[test]
    fn syntax_error_carries_diagnostic() {
        let err = compile("fn broken( {").unwrap_err();
        let ProgramError::Compile(log) = err else { panic!("expected compile error") };
        assert!(!log.is_empty());
    }

    #[test]
    fn missing_fragment_entry_is_link_error() {
        let src = MINIMAL.replace("fn fs_main", "fn fs_other");
        assert!(matches!(interface(&src), Err(ProgramError::Link(_))));
    }

    #[test]
    fn missing_uniform_is_reported_by_name() {
        let src = MINIMAL.replace("lightPos", "light_position");
        assert_eq!(interface(&src), Err(ProgramError::MissingUniform("lightPos")));
    }

    #[test]
    fn missing_attribute_is_reported_by_name() {
        let src = MINIMAL
            .replace("normal: vec3<f32>", "norm: vec3<f32>")
            .replace("normal * 0.0", "norm * 0.0");
        assert_eq!(interface(&src), Err(ProgramError::MissingAttribute("normal")));
    }

    #[test]
    fn wrong_uniform_type_is_rejected() {
        let src = MINIMAL.replace("color: vec4<f32>", "color: vec3<f32>");
        let src = src.replace("return u.color;", "return vec4<f32>(u.color, 1.0);");
        assert_eq!(
            interface(&src),
            Err(ProgramError::UniformType { name: "color", expected: "vec4<f32>" })
        );
    }
}
