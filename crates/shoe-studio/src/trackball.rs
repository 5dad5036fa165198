use glam::{Mat4, Quat, Vec3};
use shoe_engine::coords::Viewport;
use shoe_engine::input::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Virtual trackball turning primary-button drags into a view rotation.
///
/// Pointer positions are mapped onto a unit hemisphere facing the viewer;
/// each drag step rotates the view by the arc between consecutive points.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackballRotator {
    rotation: Quat,
    drag_from: Option<Vec3>,
}

impl Default for TrackballRotator {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            drag_from: None,
        }
    }
}

impl TrackballRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view matrix (a pure rotation).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation)
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Starts a drag at `(x, y)` in `[-1, 1]`, +Y up.
    pub fn press(&mut self, x: f32, y: f32) {
        self.drag_from = Some(sphere_point(x, y));
    }

    /// Continues a drag; ignored when no drag is in progress.
    pub fn drag(&mut self, x: f32, y: f32) {
        let Some(from) = self.drag_from else { return };
        let to = sphere_point(x, y);
        self.rotation = (Quat::from_rotation_arc(from, to) * self.rotation).normalize();
        self.drag_from = Some(to);
    }

    pub fn release(&mut self) {
        self.drag_from = None;
    }

    /// Feeds one input event. Returns `true` when the view changed.
    pub fn handle_event(&mut self, ev: &InputEvent, viewport: Viewport) -> bool {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
                ..
            }) => {
                match state {
                    MouseButtonState::Pressed => {
                        if let Some((ux, uy)) = viewport.to_unit_square(*x, *y) {
                            self.press(ux, uy);
                        }
                    }
                    MouseButtonState::Released => self.release(),
                }
                false
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) if self.is_dragging() => {
                match viewport.to_unit_square(*x, *y) {
                    Some((ux, uy)) => {
                        self.drag(ux, uy);
                        true
                    }
                    None => false,
                }
            }

            InputEvent::Focused(false) | InputEvent::PointerLeft => {
                self.release();
                false
            }

            _ => false,
        }
    }
}

/// Projects a unit-square point onto the unit hemisphere `z ≥ 0`.
///
/// Points outside the unit circle land on the rim.
fn sphere_point(x: f32, y: f32) -> Vec3 {
    let d2 = x * x + y * y;
    if d2 <= 1.0 {
        Vec3::new(x, y, (1.0 - d2).sqrt())
    } else {
        Vec3::new(x, y, 0.0).normalize_or(Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_rotation(m: Mat4) -> bool {
        let r = glam::Mat3::from_mat4(m);
        (r * r.transpose()).abs_diff_eq(glam::Mat3::IDENTITY, 1e-5)
            && (r.determinant() - 1.0).abs() < 1e-5
            && m.w_axis.abs_diff_eq(glam::Vec4::W, 1e-6)
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn starts_at_identity() {
        assert_eq!(TrackballRotator::new().view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut tb = TrackballRotator::new();
        tb.drag(0.5, 0.5);
        assert_eq!(tb.view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn drag_yields_pure_rotation() {
        let mut tb = TrackballRotator::new();
        tb.press(-0.2, 0.1);
        tb.drag(0.4, -0.3);
        tb.drag(1.5, 0.9);
        let view = tb.view_matrix();
        assert_ne!(view, Mat4::IDENTITY);
        assert!(is_rotation(view));
    }

    #[test]
    fn horizontal_drag_turns_about_y() {
        let mut tb = TrackballRotator::new();
        tb.press(0.0, 0.0);
        tb.drag(0.5, 0.0);
        let front = tb.view_matrix().transform_vector3(Vec3::Z);
        assert!(front.x > 0.0);
        assert!(front.y.abs() < 1e-6);
    }

    #[test]
    fn release_stops_rotation() {
        let mut tb = TrackballRotator::new();
        tb.press(0.0, 0.0);
        tb.drag(0.3, 0.0);
        tb.release();
        let held = tb.view_matrix();
        tb.drag(-0.8, 0.6);
        assert_eq!(tb.view_matrix(), held);
    }

    #[test]
    fn rim_points_are_unit() {
        assert!((sphere_point(3.0, 4.0).length() - 1.0).abs() < 1e-6);
        assert_eq!(sphere_point(0.0, 0.0), Vec3::Z);
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn rotation_matches_view_matrix() {
        let mut tb = TrackballRotator::new();
        tb.press(0.0, 0.0);
        tb.drag(0.3, -0.2);
        assert_ne!(tb.rotation(), Quat::IDENTITY);
        assert_eq!(Mat4::from_quat(tb.rotation()), tb.view_matrix());
    }

    #[test]
    fn pointer_events_drive_the_drag() {
        let vp = Viewport::new(100.0, 100.0);
        let mut tb = TrackballRotator::new();

        let moved = InputEvent::PointerMoved(PointerMoveEvent { x: 70.0, y: 50.0 });
        assert!(!tb.handle_event(&moved, vp));
        assert_eq!(tb.view_matrix(), Mat4::IDENTITY);

        tb.handle_event(&button(MouseButtonState::Pressed, 50.0, 50.0), vp);
        assert!(tb.is_dragging());
        assert!(tb.handle_event(&moved, vp));
        assert!(is_rotation(tb.view_matrix()));

        tb.handle_event(&button(MouseButtonState::Released, 70.0, 50.0), vp);
        assert!(!tb.is_dragging());
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut tb = TrackballRotator::new();
        tb.press(0.0, 0.0);
        tb.handle_event(&InputEvent::Focused(false), Viewport::new(10.0, 10.0));
        assert!(!tb.is_dragging());
    }
}
