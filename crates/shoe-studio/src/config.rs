use shoe_engine::paint::Color;
use shoe_geometry::{CameraRig, Grid, LightIndicator};

/// Fixed scene parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Parameter domain and resolution of the surface.
    pub grid: Grid,
    /// Light indicator sphere tessellation.
    pub light: LightIndicator,
    /// Projection and the fixed tilt/distance in front of the trackball view.
    pub camera: CameraRig,
    pub surface_color: Color,
    pub clear_color: Color,
    /// Orbit radians per wall-clock second.
    pub orbit_speed: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            light: LightIndicator::default(),
            camera: CameraRig::default(),
            surface_color: Color::YELLOW,
            clear_color: Color::BLACK,
            orbit_speed: 1.0,
        }
    }
}
