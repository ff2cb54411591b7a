use super::drag_session::DragSession;
use super::error::{OrbitConfigError, OrbitInputError};
use super::rotation_state::RotationState;
use super::settings::OrbitSettings;
use super::stage::StageTable;
use serde::Serialize;

/// Callback invoked with the new stage whenever it changes.
pub type StageListener = Box<dyn FnMut(Option<u32>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Left,
    Right,
}

impl KeyDirection {
    fn sign(self) -> f64 {
        match self {
            KeyDirection::Left => 1.0,
            KeyDirection::Right => -1.0,
        }
    }
}

/// Host-agnostic input delivered to the controller in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    DragStart { client_x: f64 },
    DragMove { client_x: f64 },
    DragEnd,
    KeyRotate(KeyDirection),
    KeyRelease(KeyDirection),
    /// The host window lost focus, so pending releases will never arrive.
    FocusLost,
}

/// Stage transition reported by [`OrbitController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageChange {
    pub previous: Option<u32>,
    pub current: Option<u32>,
}

/// Turns pointer/keyboard input and a per-frame tick into a damped rotation
/// angle, and tracks which stage faces the viewer.
///
/// The controller owns its [`RotationState`] exclusively. Input handlers move
/// the angle directly; [`tick`](Self::tick) applies auto-rotation and damping
/// whenever no manual rotation is in progress.
pub struct OrbitController {
    settings: OrbitSettings,
    stages: StageTable,
    rotation: RotationState,
    drag: DragSession,
    left_held: bool,
    right_held: bool,
    stage: Option<u32>,
    stage_listener: Option<StageListener>,
}

impl OrbitController {
    /// Attach a controller to a target whose orientation starts at `initial_angle`.
    pub fn attach(settings: OrbitSettings, stages: StageTable, initial_angle: f64) -> Self {
        Self {
            settings,
            stages,
            rotation: RotationState::new(initial_angle),
            drag: DragSession::default(),
            left_held: false,
            right_held: false,
            stage: None,
            stage_listener: None,
        }
    }

    /// Release the controller, dropping any listener, and hand back the final rotation.
    pub fn detach(self) -> RotationState {
        self.rotation
    }

    pub fn set_stage_listener(&mut self, listener: StageListener) {
        self.stage_listener = Some(listener);
    }

    pub fn angle(&self) -> f64 {
        self.rotation.angle()
    }

    pub fn velocity(&self) -> f64 {
        self.rotation.velocity()
    }

    pub fn stage(&self) -> Option<u32> {
        self.stage
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn stages(&self) -> &StageTable {
        &self.stages
    }

    /// True while a drag or an arrow key holds the rotation under manual control.
    pub fn is_manual_rotation(&self) -> bool {
        self.drag.is_active() || self.left_held || self.right_held
    }

    pub fn set_auto_rotation_rate(&mut self, rate: f64) -> Result<(), OrbitConfigError> {
        if !rate.is_finite() {
            return Err(OrbitConfigError::NonFiniteParameter {
                name: "auto_rotation_rate",
                value: rate,
            });
        }
        self.settings.auto_rotation_rate = rate;
        Ok(())
    }

    pub fn on_drag_start(&mut self, client_x: f64) {
        self.drag.begin(client_x);
    }

    /// Rotate by the horizontal pointer travel since the last event, as a
    /// fraction of `viewport_width`. Ignored when no drag is active.
    pub fn on_drag_move(
        &mut self,
        client_x: f64,
        viewport_width: f64,
    ) -> Result<(), OrbitInputError> {
        if !self.drag.is_active() {
            return Ok(());
        }
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(OrbitInputError::InvalidViewportWidth(viewport_width));
        }
        if !client_x.is_finite() {
            return Err(OrbitInputError::NonFiniteCoordinate(client_x));
        }
        let last_x = self.drag.last_pointer_x();
        let delta = (client_x - last_x) / viewport_width;
        if !delta.is_finite() {
            return Err(OrbitInputError::NonFiniteCoordinate(last_x));
        }

        let step = delta * self.settings.drag_sensitivity;
        self.rotation.advance(step);
        self.rotation.set_velocity(step);
        self.drag.set_last_pointer_x(client_x);
        Ok(())
    }

    /// End the drag. The last drag velocity is kept so damping can coast it out.
    pub fn on_drag_end(&mut self) {
        self.drag.end();
    }

    pub fn on_key_rotate(&mut self, direction: KeyDirection) {
        *self.key_held(direction) = true;
        self.rotation.advance(direction.sign() * self.settings.key_step);
        self.rotation.set_velocity(match direction {
            KeyDirection::Left => self.settings.key_velocity_left,
            KeyDirection::Right => self.settings.key_velocity_right,
        });
    }

    /// Release one arrow key. Manual rotation lasts while either key is down.
    pub fn on_key_release(&mut self, direction: KeyDirection) {
        *self.key_held(direction) = false;
    }

    /// Drop every held key and any drag in progress.
    pub fn on_focus_lost(&mut self) {
        self.left_held = false;
        self.right_held = false;
        self.drag.end();
    }

    fn key_held(&mut self, direction: KeyDirection) -> &mut bool {
        match direction {
            KeyDirection::Left => &mut self.left_held,
            KeyDirection::Right => &mut self.right_held,
        }
    }

    pub fn handle(
        &mut self,
        input: OrbitInput,
        viewport_width: f64,
    ) -> Result<(), OrbitInputError> {
        match input {
            OrbitInput::DragStart { client_x } => self.on_drag_start(client_x),
            OrbitInput::DragMove { client_x } => {
                return self.on_drag_move(client_x, viewport_width);
            }
            OrbitInput::DragEnd => self.on_drag_end(),
            OrbitInput::KeyRotate(direction) => self.on_key_rotate(direction),
            OrbitInput::KeyRelease(direction) => self.on_key_release(direction),
            OrbitInput::FocusLost => self.on_focus_lost(),
        }
        Ok(())
    }

    /// Advance one frame. Returns the stage transition, if any, after
    /// notifying the listener.
    pub fn tick(&mut self) -> Option<StageChange> {
        if !self.is_manual_rotation() {
            let residual = self
                .rotation
                .damp(self.settings.damping_factor, self.settings.velocity_epsilon);
            self.rotation.advance(self.settings.auto_rotation_rate + residual);
        }

        let current = self.stages.lookup(self.rotation.angle());
        if current == self.stage {
            return None;
        }

        let change = StageChange {
            previous: self.stage,
            current,
        };
        self.stage = current;
        if let Some(listener) = self.stage_listener.as_mut() {
            listener(current);
        }
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::sync::{Arc, Mutex};

    fn controller() -> OrbitController {
        OrbitController::attach(OrbitSettings::default(), StageTable::default(), 0.0)
    }

    fn still_settings() -> OrbitSettings {
        OrbitSettings {
            auto_rotation_rate: 0.0,
            ..Default::default()
        }
    }

    fn still_controller() -> OrbitController {
        OrbitController::attach(still_settings(), StageTable::default(), 0.0)
    }

    #[test]
    fn drag_scenario_sets_angle_and_velocity() {
        let mut orbit = controller();
        orbit.on_drag_start(100.0);
        assert!(orbit.is_manual_rotation());
        orbit.on_drag_move(150.0, 500.0).unwrap();

        let expected = 0.1 * 0.01 * PI;
        assert!((orbit.angle() - expected).abs() < 1e-6);
        assert!((orbit.velocity() - expected).abs() < 1e-6);

        // Manual rotation suppresses auto-rotation and damping.
        orbit.tick();
        assert!((orbit.angle() - expected).abs() < 1e-6);
        assert!((orbit.velocity() - expected).abs() < 1e-6);
    }

    #[test]
    fn drag_direction_follows_pointer() {
        let mut orbit = still_controller();
        orbit.on_drag_start(300.0);
        orbit.on_drag_move(320.0, 800.0).unwrap();
        let after_right = orbit.angle();
        assert!(after_right > 0.0);

        orbit.on_drag_move(200.0, 800.0).unwrap();
        assert!(orbit.angle() < after_right);
        assert!(orbit.velocity() < 0.0);
    }

    #[test]
    fn velocity_reflects_latest_move_only() {
        let mut orbit = still_controller();
        orbit.on_drag_start(0.0);
        orbit.on_drag_move(100.0, 100.0).unwrap();
        orbit.on_drag_move(110.0, 100.0).unwrap();
        assert!((orbit.velocity() - 0.1 * 0.01 * PI).abs() < 1e-6);
    }

    #[test]
    fn restarting_a_drag_resets_the_anchor() {
        let mut orbit = still_controller();
        orbit.on_drag_start(100.0);
        orbit.on_drag_start(400.0);
        orbit.on_drag_move(400.0, 500.0).unwrap();
        assert_eq!(orbit.angle(), 0.0);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut orbit = still_controller();
        assert_eq!(orbit.on_drag_move(250.0, 500.0), Ok(()));
        assert_eq!(orbit.angle(), 0.0);
        assert_eq!(orbit.velocity(), 0.0);
    }

    #[test]
    fn invalid_viewport_is_rejected_without_side_effects() {
        let mut orbit = still_controller();
        orbit.on_drag_start(100.0);
        assert_eq!(
            orbit.on_drag_move(150.0, 0.0),
            Err(OrbitInputError::InvalidViewportWidth(0.0))
        );
        assert!(matches!(
            orbit.on_drag_move(150.0, f64::NAN),
            Err(OrbitInputError::InvalidViewportWidth(_))
        ));
        assert_eq!(
            orbit.on_drag_move(150.0, -10.0),
            Err(OrbitInputError::InvalidViewportWidth(-10.0))
        );
        assert_eq!(orbit.angle(), 0.0);
        assert_eq!(orbit.velocity(), 0.0);

        // The anchor was not moved by the rejected updates.
        orbit.on_drag_move(150.0, 500.0).unwrap();
        assert!((orbit.angle() - 0.1 * 0.01 * PI).abs() < 1e-6);
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut orbit = still_controller();
        orbit.on_drag_start(10.0);
        assert!(matches!(
            orbit.on_drag_move(f64::INFINITY, 500.0),
            Err(OrbitInputError::NonFiniteCoordinate(_))
        ));
        assert!(orbit.angle().is_finite());
    }

    #[test]
    fn key_steps_keep_asymmetric_velocities() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Left);
        assert!((orbit.angle() - 0.005 * PI).abs() < 1e-6);
        assert_eq!(orbit.velocity(), 0.007);
        orbit.on_key_release(KeyDirection::Left);

        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Right);
        assert!((orbit.angle() + 0.005 * PI).abs() < 1e-6);
        assert_eq!(orbit.velocity(), -0.057);
    }

    #[test]
    fn held_key_suspends_damping_until_release() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Right);
        let held = orbit.angle();
        orbit.tick();
        orbit.tick();
        assert_eq!(orbit.angle(), held);
        assert_eq!(orbit.velocity(), -0.057);

        orbit.on_key_release(KeyDirection::Right);
        assert!(!orbit.is_manual_rotation());
        orbit.tick();
        assert!(orbit.angle() < held);
        assert!((orbit.velocity() + 0.057 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn damping_reaches_zero_within_bound() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Right);
        orbit.on_key_release(KeyDirection::Right);

        let v0 = orbit.velocity().abs();
        let bound = ((0.001f64 / v0).ln() / 0.95f64.ln()).ceil() as usize;
        for _ in 0..bound - 1 {
            orbit.tick();
        }
        assert_ne!(orbit.velocity(), 0.0);
        orbit.tick();
        assert_eq!(orbit.velocity(), 0.0);

        let settled = orbit.angle();
        for _ in 0..10 {
            orbit.tick();
        }
        assert_eq!(orbit.angle(), settled);
    }

    #[test]
    fn settled_controller_advances_by_auto_rate_only() {
        let mut orbit = controller();
        orbit.on_drag_start(0.0);
        orbit.on_drag_move(400.0, 500.0).unwrap();
        orbit.on_drag_end();

        for _ in 0..200 {
            orbit.tick();
        }
        assert_eq!(orbit.velocity(), 0.0);

        let rate = orbit.settings().auto_rotation_rate;
        for _ in 0..20 {
            let before = orbit.angle();
            orbit.tick();
            assert!((orbit.angle() - before - rate).abs() < 1e-4);
        }
    }

    #[test]
    fn idle_auto_rotation_crosses_stage_boundaries() {
        let mut orbit = controller();
        let rate = 0.005 * PI;
        let mut transitions = Vec::new();

        for tick in 1..=200 {
            let before = orbit.angle();
            if let Some(change) = orbit.tick() {
                transitions.push((tick, change.current));
            }
            assert!(orbit.angle() > before);
            assert!((orbit.angle() - before - rate).abs() < 1e-4);
        }

        assert_eq!(
            transitions,
            vec![(55, Some(1)), (83, None), (90, Some(2)), (166, None)]
        );
    }

    #[test]
    fn listener_fires_only_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut orbit = controller();
        orbit.set_stage_listener(Box::new(move |stage| {
            sink.lock().unwrap().push(stage);
        }));
        for _ in 0..100 {
            orbit.tick();
        }

        assert_eq!(*seen.lock().unwrap(), vec![Some(1), None, Some(2)]);
        assert_eq!(orbit.stage(), Some(2));
    }

    #[test]
    fn initial_angle_stage_is_reported_on_first_tick() {
        let settings = OrbitSettings {
            auto_rotation_rate: 0.0,
            ..Default::default()
        };
        let mut orbit = OrbitController::attach(settings, StageTable::default(), 4.0);
        assert_eq!(orbit.stage(), None);
        assert_eq!(
            orbit.tick(),
            Some(StageChange {
                previous: None,
                current: Some(3),
            })
        );
        assert_eq!(orbit.tick(), None);
    }

    #[test]
    fn negative_angles_resolve_through_normalization() {
        let settings = OrbitSettings {
            auto_rotation_rate: 0.0,
            ..Default::default()
        };
        let mut orbit = OrbitController::attach(settings, StageTable::default(), -0.6);
        orbit.tick();
        // -0.6 wraps to roughly 5.68, inside the fourth range.
        assert_eq!(orbit.stage(), Some(4));
    }

    #[test]
    fn detach_returns_final_rotation() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Left);
        let state = orbit.detach();
        assert!((state.angle() - 0.005 * PI).abs() < 1e-6);
        assert_eq!(state.velocity(), 0.007);
    }

    #[test]
    fn auto_rotation_rate_must_be_finite() {
        let mut orbit = controller();
        assert!(orbit.set_auto_rotation_rate(f64::NAN).is_err());
        assert_eq!(orbit.set_auto_rotation_rate(0.0), Ok(()));
        orbit.tick();
        assert_eq!(orbit.angle(), 0.0);
    }

    #[test]
    fn auto_rotation_keeps_advancing_after_days_of_idling() {
        // Roughly six and a half days of idle rotation at 60 frames per second.
        let start = 0.005 * PI * 60.0 * 3600.0 * 24.0 * 6.5;
        let mut orbit =
            OrbitController::attach(OrbitSettings::default(), StageTable::default(), start);
        let rate = orbit.settings().auto_rotation_rate;

        for _ in 0..1000 {
            let before = orbit.angle();
            orbit.tick();
            assert!((orbit.angle() - before - rate).abs() < 1e-9);
        }
        assert!((orbit.angle() - start - 1000.0 * rate).abs() < 1e-6);
    }

    #[test]
    fn small_drags_keep_their_size_at_large_angles() {
        let mut orbit =
            OrbitController::attach(still_settings(), StageTable::default(), 20_000.0);
        orbit.on_drag_start(100.0);
        orbit.on_drag_move(200.0, 1000.0).unwrap();

        let expected = 0.1 * 0.01 * PI;
        assert!((orbit.angle() - 20_000.0 - expected).abs() < 1e-9);
        assert!((orbit.velocity() - expected).abs() < 1e-12);
    }

    #[test]
    fn focus_loss_releases_keys_and_drag() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Left);
        orbit.on_drag_start(10.0);
        assert!(orbit.is_manual_rotation());

        orbit.handle(OrbitInput::FocusLost, 500.0).unwrap();
        assert!(!orbit.is_manual_rotation());

        // Damping resumes on the next frame.
        let held = orbit.angle();
        orbit.tick();
        assert!(orbit.angle() > held);
        assert!((orbit.velocity() - 0.007 * 0.95).abs() < 1e-12);

        // The ended drag no longer follows the pointer.
        let coasting = orbit.angle();
        orbit.on_drag_move(400.0, 500.0).unwrap();
        assert_eq!(orbit.angle(), coasting);
    }

    #[test]
    fn manual_rotation_lasts_while_either_key_is_down() {
        let mut orbit = still_controller();
        orbit.on_key_rotate(KeyDirection::Left);
        orbit.on_key_rotate(KeyDirection::Right);
        orbit.on_key_release(KeyDirection::Right);
        assert!(orbit.is_manual_rotation());

        orbit.on_key_release(KeyDirection::Left);
        assert!(!orbit.is_manual_rotation());
    }
}
