#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.
//!
//! The world never draws. It exposes a [`WorldSnapshot`] that the
//! [`SceneBuilder`] turns into an ordered list of primitive draw requests,
//! which any [`RenderingBackend`] can replay.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{
    Cell, EntityColor, EntityKind, EntitySnapshot, GameState, InputEvent, WorldSnapshot,
};
use std::{error::Error, fmt};

/// Side length of a maze cell in pixels.
pub const DEFAULT_CELL_SIZE: f32 = 20.0;
/// Default window width in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
/// Default window height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
/// Font size used for the HUD and overlays.
pub const TEXT_SIZE: f32 = 20.0;

/// Overlay shown while paused.
pub const PAUSE_TEXT: &str = "P A U S E";
/// Overlay shown once every life is lost.
pub const GAME_OVER_TEXT: &str = "G A M E   O V E R";
/// Overlay shown once every pellet is eaten.
pub const VICTORY_TEXT: &str = "C O N G R A T U L A T I O N S   Y O U   W I N  ! ! !";

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black, used for floors and the player's face.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white, used for pursuer eyes.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque blue, used for walls.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 255);
    /// Opaque yellow, used for pellets and text.
    pub const YELLOW: Self = Self::from_rgb_u8(255, 255, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<EntityColor> for Color {
    fn from(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Where a piece of text is placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAnchor {
    /// Top-left corner of the text in screen pixels.
    At(Vec2),
    /// Centred on the window.
    ScreenCenter,
}

/// Primitive draw request replayed by backends in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle.
    Rect {
        /// Top-left corner in pixels.
        origin: Vec2,
        /// Width and height in pixels.
        size: Vec2,
        /// Fill color.
        color: Color,
    },
    /// Filled circle.
    Circle {
        /// Centre in pixels.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Filled polygon described by its outline.
    Polygon {
        /// Outline vertices in drawing order.
        points: Vec<Vec2>,
        /// Fill color.
        color: Color,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// Placement of the text.
        anchor: TextAnchor,
        /// Font size in pixels.
        size: f32,
        /// Text color.
        color: Color,
    },
}

/// Ordered draw requests for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Solid color used to clear the frame before drawing.
    pub clear_color: Color,
    /// Draw requests, maze first, then HUD, entities and overlays.
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            commands: Vec::new(),
        }
    }

    /// Appends a draw request.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Texts drawn by the scene, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Opening of the player's mouth, advanced once per built frame.
///
/// The opening grows by one pixel per frame until it passes the radius, then
/// shrinks back to zero and repeats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthAnimation {
    opening: f32,
    speed: f32,
}

impl Default for MouthAnimation {
    fn default() -> Self {
        Self {
            opening: 0.0,
            speed: 1.0,
        }
    }
}

impl MouthAnimation {
    /// Advances the animation and returns the opening clamped to `0..=radius`.
    pub fn advance(&mut self, radius: f32) -> f32 {
        self.opening += self.speed;
        if self.opening > radius {
            self.speed = -1.0;
        }
        if self.opening <= 0.0 {
            self.speed = 1.0;
        }
        self.opening.clamp(0.0, radius.max(0.0))
    }
}

/// Converts world snapshots into scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBuilder {
    cell_size: f32,
}

impl SceneBuilder {
    /// Creates a builder drawing cells `cell_size` pixels wide.
    pub fn new(cell_size: f32) -> Result<Self, RenderingError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self { cell_size })
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Builds the scene for `snapshot`, advancing the mouth animation.
    #[must_use]
    pub fn build(&self, snapshot: &WorldSnapshot, mouth: &mut MouthAnimation) -> Scene {
        let mut scene = Scene::new(Color::BLACK);

        self.push_maze(snapshot, &mut scene);
        self.push_hud(snapshot, &mut scene);
        for entity in &snapshot.entities {
            match entity.kind {
                EntityKind::Player => self.push_player(entity, mouth, &mut scene),
                EntityKind::Pursuer => self.push_pursuer(entity, &mut scene),
            }
        }

        let overlay = match snapshot.state {
            GameState::Playing => None,
            GameState::Paused => Some(PAUSE_TEXT),
            GameState::GameOver => Some(GAME_OVER_TEXT),
            GameState::Victory => Some(VICTORY_TEXT),
        };
        if let Some(text) = overlay {
            scene.push(DrawCommand::Text {
                text: text.to_owned(),
                anchor: TextAnchor::ScreenCenter,
                size: TEXT_SIZE,
                color: Color::YELLOW,
            });
        }

        scene
    }

    fn push_maze(&self, snapshot: &WorldSnapshot, scene: &mut Scene) {
        let size = self.cell_size;
        let half = (size / 2.0).floor();
        for (row, column, cell) in snapshot.iter_cells() {
            let origin = Vec2::new(column as f32 * size, row as f32 * size);
            let color = match cell {
                Cell::Wall => Color::BLUE,
                Cell::Empty | Cell::Pellet => Color::BLACK,
            };
            scene.push(DrawCommand::Rect {
                origin,
                size: Vec2::splat(size),
                color,
            });

            if cell == Cell::Pellet {
                scene.push(DrawCommand::Circle {
                    center: origin + Vec2::splat(half),
                    radius: (size / 10.0).floor(),
                    color: Color::YELLOW,
                });
            }
        }
    }

    fn push_hud(&self, snapshot: &WorldSnapshot, scene: &mut Scene) {
        let x = self.cell_size * 30.0;
        let lines = [
            (format!("Score {}", snapshot.score), 50.0),
            (format!("Lifes {}", snapshot.lives), 100.0),
        ];
        for (text, y) in lines {
            scene.push(DrawCommand::Text {
                text,
                anchor: TextAnchor::At(Vec2::new(x, y)),
                size: TEXT_SIZE,
                color: Color::YELLOW,
            });
        }
    }

    fn push_player(&self, entity: &EntitySnapshot, mouth: &mut MouthAnimation, scene: &mut Scene) {
        let radius = (self.cell_size / 2.0).floor();
        let center = Vec2::new(
            entity.column * self.cell_size + radius,
            entity.row * self.cell_size + radius,
        );
        let opening = mouth.advance(radius);

        scene.push(DrawCommand::Circle {
            center,
            radius,
            color: entity.color.into(),
        });
        scene.push(DrawCommand::Polygon {
            points: vec![
                center,
                center + Vec2::new(radius, -opening),
                center + Vec2::new(radius, opening),
            ],
            color: Color::BLACK,
        });
        scene.push(DrawCommand::Circle {
            center: center + Vec2::new(radius / 3.0, -radius * 0.7),
            radius: radius / 10.0,
            color: Color::BLACK,
        });
    }

    fn push_pursuer(&self, entity: &EntitySnapshot, scene: &mut Scene) {
        let size = self.cell_size;
        let slice = (size / 8.0).floor();
        let origin = Vec2::new(entity.column * size, entity.row * size);
        let at = |x: f32, y: f32| origin + Vec2::new(x, y);

        scene.push(DrawCommand::Polygon {
            points: vec![
                at(0.0, size),
                at(slice, slice * 2.0),
                at(slice * 2.0, (slice / 2.0).floor()),
                at(slice * 3.0, 0.0),
                at(slice * 5.0, 0.0),
                at(slice * 6.0, (slice / 2.0).floor()),
                at(slice * 7.0, slice * 2.0),
                at(size, size),
            ],
            color: entity.color.into(),
        });

        for eye_x in [slice * 2.5, slice * 5.5] {
            let center = at(eye_x, slice * 2.5);
            scene.push(DrawCommand::Circle {
                center,
                radius: slice,
                color: Color::WHITE,
            });
            scene.push(DrawCommand::Circle {
                center,
                radius: (slice / 2.0).floor(),
                color: Color::BLACK,
            });
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Scene displayed before the first update.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor with the default window size.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            scene,
        }
    }

    /// Overrides the window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// `update` is called once per simulation tick with the inputs collected
    /// since the previous call. It returns the scene to draw from then on, or
    /// `None` to close the window.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(&[InputEvent]) -> Option<Scene> + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite size.
    InvalidCellSize {
        /// Provided size that failed validation.
        cell_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{Direction, EntityId};

    fn snapshot(state: GameState) -> WorldSnapshot {
        WorldSnapshot {
            rows: 3,
            columns: 3,
            cells: vec![
                Cell::Wall,
                Cell::Wall,
                Cell::Wall,
                Cell::Wall,
                Cell::Pellet,
                Cell::Wall,
                Cell::Wall,
                Cell::Wall,
                Cell::Wall,
            ],
            entities: vec![
                EntitySnapshot {
                    id: EntityId::PLAYER,
                    kind: EntityKind::Player,
                    row: 1.0,
                    column: 1.0,
                    color: EntityColor::from_rgb(255, 255, 0),
                    heading: None,
                },
                EntitySnapshot {
                    id: EntityId::new(1),
                    kind: EntityKind::Pursuer,
                    row: 1.0,
                    column: 1.0,
                    color: EntityColor::from_rgb(255, 0, 0),
                    heading: Some(Direction::Below),
                },
            ],
            score: 7,
            lives: 3,
            state,
            tick: 12,
        }
    }

    fn builder() -> SceneBuilder {
        SceneBuilder::new(DEFAULT_CELL_SIZE).expect("positive cell size")
    }

    #[test]
    fn zero_cell_size_is_rejected_without_panicking() {
        assert_eq!(
            SceneBuilder::new(0.0),
            Err(RenderingError::InvalidCellSize { cell_size: 0.0 })
        );
        assert!(SceneBuilder::new(f32::NAN).is_err());
    }

    #[test]
    fn maze_precedes_hud_and_entities() {
        let scene = builder().build(&snapshot(GameState::Playing), &mut MouthAnimation::default());

        // 9 cell rects plus one pellet dot.
        assert!(scene.commands[..10].iter().all(|command| matches!(
            command,
            DrawCommand::Rect { .. } | DrawCommand::Circle { .. }
        )));
        assert_eq!(
            scene.commands[4],
            DrawCommand::Rect {
                origin: Vec2::new(20.0, 20.0),
                size: Vec2::splat(20.0),
                color: Color::BLACK,
            }
        );
        assert_eq!(
            scene.commands[5],
            DrawCommand::Circle {
                center: Vec2::new(30.0, 30.0),
                radius: 2.0,
                color: Color::YELLOW,
            }
        );
        assert_eq!(
            scene.commands[10],
            DrawCommand::Text {
                text: "Score 7".to_owned(),
                anchor: TextAnchor::At(Vec2::new(600.0, 50.0)),
                size: TEXT_SIZE,
                color: Color::YELLOW,
            }
        );
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["Score 7", "Lifes 3"]);
        assert_eq!(scene.clear_color, Color::BLACK);
    }

    #[test]
    fn player_and_pursuer_shapes() {
        let scene = builder().build(&snapshot(GameState::Playing), &mut MouthAnimation::default());
        let entities = &scene.commands[12..];

        assert_eq!(
            entities[0],
            DrawCommand::Circle {
                center: Vec2::new(30.0, 30.0),
                radius: 10.0,
                color: Color::YELLOW,
            }
        );
        assert_eq!(
            entities[1],
            DrawCommand::Polygon {
                points: vec![
                    Vec2::new(30.0, 30.0),
                    Vec2::new(40.0, 29.0),
                    Vec2::new(40.0, 31.0),
                ],
                color: Color::BLACK,
            }
        );

        let DrawCommand::Polygon { points, color } = &entities[3] else {
            panic!("pursuer body must be a polygon");
        };
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], Vec2::new(20.0, 40.0));
        assert_eq!(points[3], Vec2::new(26.0, 20.0));
        assert_eq!(*color, Color::from_rgb_u8(255, 0, 0));
        assert_eq!(
            entities[4],
            DrawCommand::Circle {
                center: Vec2::new(25.0, 25.0),
                radius: 2.0,
                color: Color::WHITE,
            }
        );
        assert_eq!(entities.len(), 3 + 1 + 4);
    }

    #[test]
    fn overlays_follow_state() {
        let mouth = &mut MouthAnimation::default();
        let cases = [
            (GameState::Playing, None),
            (GameState::Paused, Some(PAUSE_TEXT)),
            (GameState::GameOver, Some(GAME_OVER_TEXT)),
            (GameState::Victory, Some(VICTORY_TEXT)),
        ];

        for (state, expected) in cases {
            let scene = builder().build(&snapshot(state), mouth);
            let last = scene.commands.last().cloned();
            match expected {
                Some(text) => assert_eq!(
                    last,
                    Some(DrawCommand::Text {
                        text: text.to_owned(),
                        anchor: TextAnchor::ScreenCenter,
                        size: TEXT_SIZE,
                        color: Color::YELLOW,
                    })
                ),
                None => assert!(!matches!(last, Some(DrawCommand::Text { .. }))),
            }
        }
    }

    #[test]
    fn mouth_opening_oscillates_within_radius() {
        let mut mouth = MouthAnimation::default();
        let openings: Vec<f32> = (0..30).map(|_| mouth.advance(10.0)).collect();

        assert_eq!(&openings[..3], &[1.0, 2.0, 3.0]);
        assert!(openings.iter().all(|opening| (0.0..=10.0).contains(opening)));
        assert!(openings.contains(&10.0));
        assert!(openings.contains(&0.0));
    }

    #[test]
    fn entity_colors_convert_to_unit_channels() {
        let color = Color::from(EntityColor::from_rgb(255, 0, 255));

        assert_eq!(color, Color::new(1.0, 0.0, 1.0, 1.0));
    }
}
