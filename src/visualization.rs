//! Interactive 3D view of the cube using kiss3d.
//!
//! Left-drag on the cube turns a layer; left-drag elsewhere orbits the camera.

use std::time::Instant;

use kiss3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use twister::camera::{pixel_to_ndc, OrbitControl, ViewProjection};
use twister::cubie::{CubieId, NUM_CUBIES};
use twister::geometry::{Axis, Direction, Move, Transform};
use twister::{Config, Puzzle};

/// Edge length of a rendered cubie (slightly under 1.0 for visible gaps).
const CUBIE_SIZE: f32 = 0.95;
const STICKER_SIZE: f32 = 0.8;
const STICKER_THICKNESS: f32 = 0.02;

const CONTROLS: &str =
    "[drag] turn/orbit, [Space] scramble, [U] undo all, [R] reset, [QWE/ASD/ZXC] turn, [Tab] reverse";

/// Sticker colour for the outward face along `axis` on the `positive` side.
fn face_color(axis: Axis, positive: bool) -> Color {
    match (axis, positive) {
        (Axis::X, true) => Color::new(0.8, 0.1, 0.1, 1.0),  // red
        (Axis::X, false) => Color::new(1.0, 0.5, 0.0, 1.0), // orange
        (Axis::Y, true) => Color::new(1.0, 1.0, 1.0, 1.0),  // white
        (Axis::Y, false) => Color::new(1.0, 0.9, 0.1, 1.0), // yellow
        (Axis::Z, true) => Color::new(0.1, 0.7, 0.2, 1.0),  // green
        (Axis::Z, false) => Color::new(0.1, 0.3, 0.9, 1.0), // blue
    }
}

fn body_color() -> Color {
    Color::new(0.08, 0.08, 0.08, 1.0)
}

/// A cubie in the 3D scene; stickers are child nodes and follow it.
struct RenderedCubie {
    id: CubieId,
    node: SceneNode3d,
}

fn to_scene_vec(v: glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

fn to_scene_quat(q: glam::Quat) -> Quat {
    Quat::from_array(q.to_array())
}

/// Builds one body cube per cubie with stickers on the faces that are
/// outward in the solved cube.
fn build_scene(scene: &mut SceneNode3d) -> Vec<RenderedCubie> {
    (0..NUM_CUBIES)
        .map(|index| {
            let id = CubieId(index);
            let home = id.home();
            let mut node = scene
                .add_cube(CUBIE_SIZE, CUBIE_SIZE, CUBIE_SIZE)
                .set_color(body_color())
                .set_position(to_scene_vec(home.as_vec3()));

            for axis in Axis::ALL {
                let side = axis.grid_component(home);
                if side == 0 {
                    continue;
                }
                let mut extent = glam::Vec3::splat(STICKER_SIZE);
                extent[axis.index()] = STICKER_THICKNESS;
                let offset = axis.unit() * side as f32 * (CUBIE_SIZE / 2.0);
                node.add_cube(extent.x, extent.y, extent.z)
                    .set_color(face_color(axis, side > 0))
                    .set_position(to_scene_vec(offset));
            }

            RenderedCubie { id, node }
        })
        .collect()
}

/// The orbit camera as seen by the gesture resolver: suspending it unbinds
/// the rotate button so a cube drag does not also swing the view.
struct Orbit<'a>(&'a mut OrbitCamera3d);

impl OrbitControl for Orbit<'_> {
    fn suspend(&mut self) {
        self.0.rebind_rotate_button(None);
    }

    fn resume(&mut self) {
        self.0
            .rebind_rotate_button(Some(kiss3d::event::MouseButton::Button1));
    }
}

fn view_projection(camera: &OrbitCamera3d) -> ViewProjection {
    ViewProjection::new(glam::Mat4::from_cols_array(
        &camera.transformation().to_cols_array(),
    ))
}

fn keyboard_move(key: kiss3d::event::Key, direction: Direction) -> Option<Move> {
    use kiss3d::event::Key;
    let (axis, layer) = match key {
        Key::Q => (Axis::X, -1),
        Key::W => (Axis::X, 0),
        Key::E => (Axis::X, 1),
        Key::A => (Axis::Y, -1),
        Key::S => (Axis::Y, 0),
        Key::D => (Axis::Y, 1),
        Key::Z => (Axis::Z, -1),
        Key::X => (Axis::Z, 0),
        Key::C => (Axis::Z, 1),
        _ => return None,
    };
    Some(Move::new(axis, layer, direction))
}

/// Opens the interactive viewer.
pub fn display(config: Config) {
    pollster::block_on(display_async(config));
}

async fn display_async(config: Config) {
    let mut puzzle = Puzzle::new(config);
    let mut rng = match config.scramble.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut window = Window::new(&format!("Twister - {CONTROLS}")).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(9.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut rendered_cubies = build_scene(&mut scene);

    let mut cursor: Option<glam::Vec2> = None;
    let mut keyboard_direction = Direction::Positive;
    let mut last_frame = Instant::now();

    loop {
        let size = window.size();
        let viewport = glam::Vec2::new(size.x as f32, size.y as f32);

        for event in window.events().iter() {
            use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
            match event.value {
                WindowEvent::CursorPos(x, y, _) => {
                    let position = glam::Vec2::new(x as f32, y as f32);
                    if let Some(previous) = cursor.replace(position) {
                        let delta = position - previous;
                        if puzzle.is_gesture_active() {
                            let projector = view_projection(&camera);
                            let mut orbit = Orbit(&mut camera);
                            puzzle.pointer_move(delta.x, delta.y, &projector, &mut orbit);
                        }
                    }
                }
                WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                    let ray = cursor
                        .map(|pixel| pixel_to_ndc(pixel, viewport))
                        .and_then(|ndc| view_projection(&camera).ray(ndc));
                    if let Some(ray) = ray {
                        puzzle.pointer_down(ray, &mut Orbit(&mut camera));
                    }
                }
                WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                    puzzle.pointer_up(&mut Orbit(&mut camera));
                }
                WindowEvent::Key(key, Action::Press, _) => match key {
                    Key::Space => {
                        let moves = puzzle.scramble(&mut rng);
                        let notation: Vec<String> = moves.iter().map(Move::to_string).collect();
                        info!("scramble: {}", notation.join(" "));
                    }
                    Key::U => {
                        puzzle.start_undo();
                    }
                    Key::R => puzzle.reset(&mut Orbit(&mut camera)),
                    Key::Tab => {
                        keyboard_direction = keyboard_direction.reversed();
                        info!(?keyboard_direction, "keyboard turns reversed");
                    }
                    other => {
                        if let Some(turn) = keyboard_move(other, keyboard_direction) {
                            puzzle.request_turn(turn, true);
                        }
                    }
                },
                _ => {}
            }
        }

        let now = Instant::now();
        puzzle.tick(now - last_frame);
        last_frame = now;

        let mut transforms = [Transform::IDENTITY; NUM_CUBIES];
        for (id, transform) in puzzle.engine().world_cubies() {
            transforms[id.0] = transform;
        }
        for cubie in &mut rendered_cubies {
            let transform = transforms[cubie.id.0];
            cubie.node.set_position(to_scene_vec(transform.translation));
            cubie.node.set_rotation(to_scene_quat(transform.rotation));
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
