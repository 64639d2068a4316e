//! Turning a pointer drag on the cube's surface into one quarter turn.
//!
//! A gesture starts with a [`Pick`]. Pointer deltas are accumulated until the
//! drag lines up clearly with the screen image of one of the two cube axes
//! lying in the touched face. That axis is the *movement axis*; the layer
//! turns about the axis perpendicular to both it and the face normal, in the
//! sense that carries the touched face along the drag.
//!
//! At most one move is emitted per gesture. The orbit camera is suspended for
//! the lifetime of the gesture.

use glam::{Vec2, Vec3};
use tracing::{debug, trace};

use crate::camera::{OrbitControl, Projector};
use crate::config::ResolverConfig;
use crate::geometry::{Axis, Direction, Move};
use crate::pick::Pick;

/// Outcome of evaluating the accumulated drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Drag still within the jitter dead zone.
    DeadZone,
    /// The drag does not clearly follow either candidate axis yet.
    Undecided { score: f32 },
    Decided { turn: Move, movement_axis: Axis, score: f32 },
}

/// State of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub pick: Pick,
    pub world_normal: Vec3,
    /// Accumulated pointer movement in pixels (y down).
    pub drag: Vec2,
}

impl Session {
    pub fn new(pick: Pick) -> Self {
        Self {
            pick,
            world_normal: pick.world_normal(),
            drag: Vec2::ZERO,
        }
    }
}

/// The two axes spanning the face with outward normal `normal`.
fn candidate_axes(normal: Vec3, dominance: f32) -> [Axis; 2] {
    if normal.x.abs() > dominance {
        [Axis::Y, Axis::Z]
    } else if normal.y.abs() > dominance {
        [Axis::X, Axis::Z]
    } else {
        [Axis::X, Axis::Y]
    }
}

/// Unit screen-space direction of `axis` at `point`.
fn screen_direction(projector: &impl Projector, point: Vec3, axis: Axis) -> Vec2 {
    (projector.project(point + axis.unit()) - projector.project(point)).normalize_or_zero()
}

/// The axis perpendicular to both the movement axis and the face normal.
fn rotation_axis(movement: Axis, normal: Vec3, dominance: f32) -> Axis {
    let perpendicular = movement.unit().cross(normal);
    if perpendicular.y.abs() > dominance {
        Axis::Y
    } else if perpendicular.z.abs() > dominance {
        Axis::Z
    } else {
        Axis::X
    }
}

/// Evaluates a session's accumulated drag.
pub fn resolve(
    config: &ResolverConfig,
    session: &Session,
    projector: &impl Projector,
) -> Resolution {
    let drag = session.drag;
    if drag.x.abs() < config.dead_zone_px && drag.y.abs() < config.dead_zone_px {
        return Resolution::DeadZone;
    }
    // screen space is y-up, pixels are y-down
    let drag_dir = Vec2::new(drag.x, -drag.y).normalize_or_zero();
    let point = session.pick.point;
    let normal = session.world_normal;

    let [first, second] = candidate_axes(normal, config.axis_dominance).map(|axis| {
        let direction = screen_direction(projector, point, axis);
        (axis, direction, drag_dir.dot(direction).abs())
    });
    let (winner, runner_up) = if second.2 > first.2 {
        (second, first)
    } else {
        (first, second)
    };
    let (movement_axis, movement_dir, score) = winner;
    if score <= config.confidence || score - runner_up.2 < config.ambiguity_margin {
        return Resolution::Undecided { score };
    }

    let axis = rotation_axis(movement_axis, normal, config.axis_dominance);
    let layer = axis.component(session.pick.transform.translation).round() as i32;

    // a positive turn about `axis` carries the face along normal x movement
    let mut positive = drag_dir.dot(movement_dir) > 0.0;
    if normal.cross(movement_axis.unit()).dot(axis.unit()) < 0.0 {
        positive = !positive;
    }

    Resolution::Decided {
        turn: Move::new(axis, layer, Direction::from_positive(positive)),
        movement_axis,
        score,
    }
}

/// Per-gesture drag interpreter. Holds no state across gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureResolver {
    config: ResolverConfig,
    session: Option<Session>,
}

impl GestureResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a gesture on a successful pick and suspends orbiting.
    ///
    /// A gesture left open by a missed pointer-up is discarded.
    pub fn begin(&mut self, pick: Pick, orbit: &mut impl OrbitControl) {
        if self.session.replace(Session::new(pick)).is_some() {
            trace!("discarding unfinished gesture");
        }
        trace!(cubie = pick.cubie.0, normal = ?pick.world_normal(), "gesture started");
        orbit.suspend();
    }

    /// Feeds one pointer movement. Returns the move once the drag is
    /// unambiguous; the gesture is then over and later samples are ignored.
    pub fn drag(
        &mut self,
        dx: f32,
        dy: f32,
        projector: &impl Projector,
        orbit: &mut impl OrbitControl,
    ) -> Option<Move> {
        let session = self.session.as_mut()?;
        session.drag += Vec2::new(dx, dy);

        match resolve(&self.config, session, projector) {
            Resolution::DeadZone => {
                trace!(drag = ?session.drag, "within dead zone");
                None
            }
            Resolution::Undecided { score } => {
                trace!(score, "drag not decisive yet");
                None
            }
            Resolution::Decided {
                turn,
                movement_axis,
                score,
            } => {
                debug!(%turn, %movement_axis, score, "gesture resolved");
                self.session = None;
                orbit.resume();
                Some(turn)
            }
        }
    }

    /// Pointer released. Ends the gesture if it did not produce a move.
    pub fn end(&mut self, orbit: &mut impl OrbitControl) {
        if self.session.take().is_some() {
            debug!("gesture ended without a move");
            orbit.resume();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use super::*;
    use crate::camera::Camera;
    use crate::cubie::CubieId;
    use crate::engine::RotationEngine;
    use crate::geometry::Transform;

    #[derive(Default)]
    struct RecordingOrbit {
        suspended: bool,
        suspends: usize,
        resumes: usize,
    }

    impl OrbitControl for RecordingOrbit {
        fn suspend(&mut self) {
            self.suspended = true;
            self.suspends += 1;
        }

        fn resume(&mut self) {
            self.suspended = false;
            self.resumes += 1;
        }
    }

    fn face_pick(cell: IVec3, normal: Vec3) -> Pick {
        let centre = cell.as_vec3();
        Pick {
            cubie: CubieId::from_home(cell),
            local_normal: normal,
            point: centre + normal * 0.5,
            transform: Transform::at_grid(cell),
        }
    }

    fn front_camera() -> Camera {
        Camera::look_at(Vec3::new(0.0, 0.0, 8.0), Vec3::ZERO, Vec3::Y)
    }

    /// Pixel delta that moves the pointer along `screen` (y-up) by `length`.
    fn pixels(screen: Vec2, length: f32) -> (f32, f32) {
        (screen.x * length, -screen.y * length)
    }

    #[test]
    fn test_horizontal_drag_on_front_face_turns_row() {
        let camera = front_camera();
        let pick = face_pick(IVec3::new(1, -1, 1), Vec3::Z);
        let mut session = Session::new(pick);
        let x_dir = screen_direction(&camera, pick.point, Axis::X);
        let (dx, dy) = pixels(x_dir, 40.0);
        session.drag = Vec2::new(dx, dy);

        match resolve(&ResolverConfig::default(), &session, &camera) {
            Resolution::Decided {
                turn,
                movement_axis,
                score,
            } => {
                assert_eq!(movement_axis, Axis::X);
                assert!(score >= 0.99, "score {score}");
                assert_eq!(turn.axis, Axis::Y);
                assert_eq!(turn.layer, -1);
                assert_eq!(turn.direction, Direction::Positive);
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_diagonal_drag_never_decides() {
        let camera = front_camera();
        let mut resolver = GestureResolver::default();
        let mut orbit = RecordingOrbit::default();
        resolver.begin(face_pick(IVec3::new(0, 0, 1), Vec3::Z), &mut orbit);

        for _ in 0..50 {
            assert_eq!(resolver.drag(20.0, -20.0, &camera, &mut orbit), None);
        }
        assert!(resolver.is_active());
        assert!(orbit.suspended);

        resolver.end(&mut orbit);
        assert!(!resolver.is_active());
        assert!(!orbit.suspended);
        assert_eq!((orbit.suspends, orbit.resumes), (1, 1));
    }

    #[test]
    fn test_jitter_is_ignored() {
        let camera = front_camera();
        let mut resolver = GestureResolver::default();
        let mut orbit = RecordingOrbit::default();
        resolver.begin(face_pick(IVec3::new(0, 0, 1), Vec3::Z), &mut orbit);
        assert_eq!(resolver.drag(1.0, -1.5, &camera, &mut orbit), None);
        assert_eq!(
            resolve(resolver.config(), resolver.session().unwrap(), &camera),
            Resolution::DeadZone
        );
        assert!(resolver.is_active());
    }

    #[test]
    fn test_accumulated_drag_crosses_threshold() {
        let camera = front_camera();
        let mut resolver = GestureResolver::default();
        let mut orbit = RecordingOrbit::default();
        resolver.begin(face_pick(IVec3::new(0, 1, 1), Vec3::Z), &mut orbit);

        assert_eq!(resolver.drag(10.0, -10.0, &camera, &mut orbit), None);
        let turn = resolver.drag(0.0, -40.0, &camera, &mut orbit);
        // upward drag on the front face rolls the x=0 column away from the viewer
        assert_eq!(turn, Some(Move::new(Axis::X, 0, Direction::Negative)));
        assert!(!resolver.is_active());
        assert!(!orbit.suspended);

        // gesture is over: nothing more is emitted
        assert_eq!(resolver.drag(0.0, -40.0, &camera, &mut orbit), None);
        resolver.end(&mut orbit);
        assert_eq!(orbit.resumes, 1);
    }

    #[test]
    fn test_drag_without_gesture_is_ignored() {
        let camera = front_camera();
        let mut resolver = GestureResolver::default();
        let mut orbit = RecordingOrbit::default();
        assert_eq!(resolver.drag(50.0, 0.0, &camera, &mut orbit), None);
        resolver.end(&mut orbit);
        assert_eq!((orbit.suspends, orbit.resumes), (0, 0));
    }

    #[test]
    fn test_candidate_axes_priority() {
        assert_eq!(candidate_axes(Vec3::NEG_X, 0.9), [Axis::Y, Axis::Z]);
        assert_eq!(candidate_axes(Vec3::Y, 0.9), [Axis::X, Axis::Z]);
        assert_eq!(candidate_axes(Vec3::NEG_Z, 0.9), [Axis::X, Axis::Y]);
    }

    /// Every face, both in-face axes, both senses: the emitted turn must carry
    /// the touched face along the drag.
    #[test]
    fn test_direction_for_all_faces() {
        let config = ResolverConfig::default();
        for normal_axis in Axis::ALL {
            for sign in [1.0f32, -1.0] {
                let normal = normal_axis.unit() * sign;
                let up = if normal_axis == Axis::Y { Vec3::Z } else { Vec3::Y };
                let camera = Camera::look_at(normal * 8.0, Vec3::ZERO, up);
                let [a, b] = candidate_axes(normal, config.axis_dominance);
                // corner cubie on this face
                let cell = (normal + a.unit() + b.unit()).round().as_ivec3();
                let pick = face_pick(cell, normal);

                for movement in [a, b] {
                    for sense in [1.0f32, -1.0] {
                        let mut session = Session::new(pick);
                        let screen = screen_direction(&camera, pick.point, movement) * sense;
                        let (dx, dy) = pixels(screen, 30.0);
                        session.drag = Vec2::new(dx, dy);

                        let Resolution::Decided { turn, movement_axis, .. } =
                            resolve(&config, &session, &camera)
                        else {
                            panic!("no move for normal {normal} along {movement} x{sense}");
                        };
                        assert_eq!(movement_axis, movement);
                        assert_ne!(turn.axis, movement);
                        assert_ne!(turn.axis, normal_axis);
                        assert_eq!(turn.layer, 1);

                        let spin = turn.axis.unit() * turn.direction.sign() as f32;
                        let velocity = spin.cross(pick.point);
                        assert!(
                            velocity.dot(movement.unit() * sense) > 0.0,
                            "normal {normal}, drag {movement} x{sense} gave {turn}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_resolved_turn_moves_picked_cubie_along_drag() {
        let camera = Camera::look_at(Vec3::new(5.0, 6.0, 7.0), Vec3::ZERO, Vec3::Y);
        let cell = IVec3::new(1, 1, 1);
        let pick = face_pick(cell, Vec3::Y);
        let mut resolver = GestureResolver::default();
        let mut orbit = RecordingOrbit::default();
        resolver.begin(pick, &mut orbit);

        let screen = screen_direction(&camera, pick.point, Axis::Z);
        let (dx, dy) = pixels(screen, 25.0);
        let turn = resolver.drag(dx, dy, &camera, &mut orbit);
        assert_eq!(turn, Some(Move::new(Axis::X, 1, Direction::Positive)));

        let mut engine = RotationEngine::default();
        engine.turn(turn.unwrap());
        let moved = engine.store().get(CubieId::from_home(cell)).map(|c| c.grid_position);
        assert_eq!(moved, Some(IVec3::new(1, -1, 1)));
    }
}
