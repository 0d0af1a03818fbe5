//! Run loop state: the world plus the systems that drive it.

use anyhow::{bail, Context, Result};
use maze_chase_core::{Command, Event, InputEvent};
use maze_chase_rendering::{MouthAnimation, Scene, SceneBuilder};
use maze_chase_system_bootstrap::Bootstrap;
use maze_chase_system_controls::{ControlFlow, Controls};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World};

use crate::config::GameConfig;

/// Owns the world and advances it one tick at a time.
#[derive(Debug)]
pub(crate) struct Session {
    bootstrap: Bootstrap,
    world: World,
    pursuit: Pursuit,
    controls: Controls,
    scene_builder: SceneBuilder,
    mouth: MouthAnimation,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(config: &GameConfig, seed: u64) -> Result<Self> {
        let bootstrap = Bootstrap::with_lives(config.lives);
        let world = bootstrap.build().context("invalid world configuration")?;
        let scene_builder =
            SceneBuilder::new(config.cell_size).context("invalid presentation settings")?;

        Ok(Self {
            bootstrap,
            world,
            pursuit: Pursuit::new(seed),
            controls: Controls::default(),
            scene_builder,
            mouth: MouthAnimation::default(),
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn welcome_banner(&self) -> &str {
        self.bootstrap.welcome_banner(&self.world)
    }

    pub(crate) fn summary(&self) -> String {
        self.bootstrap.summary(&self.world)
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.controls.should_quit()
    }

    /// Applies `inputs`, then simulates one tick and lets the pursuers answer.
    ///
    /// Returns `ControlFlow::Quit` without ticking once quitting was requested.
    pub(crate) fn step(&mut self, inputs: &[InputEvent]) -> Result<ControlFlow> {
        self.commands.clear();
        self.events.clear();

        if self.controls.handle(inputs, &mut self.commands) == ControlFlow::Quit {
            return Ok(ControlFlow::Quit);
        }
        self.commands.push(Command::Tick);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        let mut steering = Vec::new();
        self.pursuit.handle(&self.events, &mut steering);
        for command in steering {
            world::apply(&mut self.world, command, &mut self.events);
        }

        for event in &self.events {
            if let Event::InvariantViolated { entity, position } = event {
                bail!(
                    "entity {} left the maze at row {}, column {}",
                    entity.get(),
                    position.row(),
                    position.column()
                );
            }
        }

        Ok(ControlFlow::Continue)
    }

    /// Builds the scene for the current world state.
    pub(crate) fn scene(&mut self) -> Scene {
        self.scene_builder
            .build(&query::snapshot(&self.world), &mut self.mouth)
    }

    /// One frame of the windowed loop: `None` once the player quits.
    pub(crate) fn frame(&mut self, inputs: &[InputEvent]) -> Result<Option<Scene>> {
        match self.step(inputs)? {
            ControlFlow::Quit => Ok(None),
            ControlFlow::Continue => Ok(Some(self.scene())),
        }
    }

    /// Runs `ticks` ticks without input.
    pub(crate) fn run_headless(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            let _ = self.step(&[])?;
            if query::state(&self.world).is_terminal() {
                break;
            }
        }
        Ok(())
    }
}
