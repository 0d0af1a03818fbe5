#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, is_key_released, KeyCode},
    math::Vec2 as MacroquadVec2,
};
use maze_chase_core::{Direction, InputEvent};
use maze_chase_rendering::{
    Color, DrawCommand, Presentation, RenderingBackend, Scene, TextAnchor,
};
use std::time::Duration;

/// Default interval between simulation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on ticks simulated in a single frame after a stall.
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Edge-triggered key observations gathered during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservations {
    /// Arrow keys pressed this frame, indexed like [`Direction::ALL`].
    pub pressed: [bool; 4],
    /// Arrow keys released this frame, indexed like [`Direction::ALL`].
    pub released: [bool; 4],
    /// `P` toggles the pause overlay.
    pub pause: bool,
    /// `Escape` leaves the game.
    pub quit: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        let mut observations = Self {
            pause: is_key_pressed(KeyCode::P),
            quit: is_key_pressed(KeyCode::Escape),
            ..Self::default()
        };
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            let key = arrow_key(direction);
            observations.pressed[index] = is_key_pressed(key);
            observations.released[index] = is_key_released(key);
        }
        observations
    }

    /// Appends the inputs these observations stand for.
    ///
    /// Releases come before presses so that switching keys within one frame
    /// leaves the new direction active.
    pub fn collect_inputs(&self, out: &mut Vec<InputEvent>) {
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            if self.released[index] {
                out.push(InputEvent::StopMove(direction));
            }
        }
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            if self.pressed[index] {
                out.push(InputEvent::Move(direction));
            }
        }
        if self.pause {
            out.push(InputEvent::TogglePause);
        }
        if self.quit {
            out.push(InputEvent::Quit);
        }
    }
}

fn arrow_key(direction: Direction) -> KeyCode {
    match direction {
        Direction::Above => KeyCode::Up,
        Direction::Below => KeyCode::Down,
        Direction::Left => KeyCode::Left,
        Direction::Right => KeyCode::Right,
    }
}

/// Converts variable frame times into a whole number of fixed ticks.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickAccumulator {
    interval: Duration,
    accumulated: Duration,
}

impl TickAccumulator {
    /// Creates an accumulator firing once per `interval` (at least 1 ms).
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
        }
    }

    /// Adds a frame's duration and returns how many ticks became due.
    ///
    /// Time beyond [`MAX_TICKS_PER_FRAME`] ticks is dropped.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulated += frame;
        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
            if due == MAX_TICKS_PER_FRAME {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        due
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    tick_interval: Duration,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that ticks every [`DEFAULT_TICK_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures the interval between simulation ticks.
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update: F) -> Result<()>
    where
        F: FnMut(&[InputEvent]) -> Option<Scene> + 'static,
    {
        let Self {
            swap_interval,
            tick_interval,
        } = self;

        let Presentation {
            window_title,
            window_width,
            window_height,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_width).context("window width out of range")?,
            window_height: i32::try_from(window_height).context("window height out of range")?,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut pending_inputs = Vec::new();
            let mut accumulator = TickAccumulator::new(tick_interval);

            'frames: loop {
                KeyObservations::poll().collect_inputs(&mut pending_inputs);

                let dt_seconds = macroquad::time::get_frame_time();
                let due = accumulator.advance(Duration::from_secs_f32(dt_seconds.max(0.0)));
                for _ in 0..due {
                    match update(&pending_inputs) {
                        Some(next) => scene = next,
                        None => break 'frames,
                    }
                    pending_inputs.clear();
                }

                macroquad::window::clear_background(to_macroquad_color(scene.clear_color));
                draw_scene(&scene);
                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene) {
    for command in &scene.commands {
        match command {
            DrawCommand::Rect {
                origin,
                size,
                color,
            } => macroquad::shapes::draw_rectangle(
                origin.x,
                origin.y,
                size.x,
                size.y,
                to_macroquad_color(*color),
            ),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => macroquad::shapes::draw_circle(
                center.x,
                center.y,
                *radius,
                to_macroquad_color(*color),
            ),
            DrawCommand::Polygon { points, color } => draw_polygon(points, *color),
            DrawCommand::Text {
                text,
                anchor,
                size,
                color,
            } => draw_text(text, *anchor, *size, *color),
        }
    }
}

// Outlines produced by the scene builder are convex, so a fan covers them.
fn draw_polygon(points: &[Vec2], color: Color) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    let color = to_macroquad_color(color);
    for pair in rest.windows(2) {
        macroquad::shapes::draw_triangle(
            to_macroquad_vec(first),
            to_macroquad_vec(pair[0]),
            to_macroquad_vec(pair[1]),
            color,
        );
    }
}

fn draw_text(text: &str, anchor: TextAnchor, size: f32, color: Color) {
    let font_size = size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
    let dimensions = macroquad::text::measure_text(text, None, font_size, 1.0);
    let top_left = match anchor {
        TextAnchor::At(position) => position,
        TextAnchor::ScreenCenter => Vec2::new(
            (macroquad::window::screen_width() - dimensions.width) / 2.0,
            (macroquad::window::screen_height() - dimensions.height) / 2.0,
        ),
    };

    let _ = macroquad::text::draw_text(
        text,
        top_left.x,
        top_left.y + dimensions.offset_y,
        f32::from(font_size),
        to_macroquad_color(color),
    );
}

fn to_macroquad_vec(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
