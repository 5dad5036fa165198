/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

impl From<Color> for glam::Vec4 {
    fn from(c: Color) -> Self {
        glam::Vec4::from_array(c.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yellow_is_opaque() {
        assert_eq!(Color::YELLOW.to_array(), [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn converts_to_shader_vec4() {
        let v: glam::Vec4 = Color::YELLOW.into();
        assert_eq!(v, glam::Vec4::new(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn converts_to_wgpu_clear_color() {
        let c: wgpu::Color = Color::BLACK.into();
        assert_eq!(c, wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 });
    }
}
