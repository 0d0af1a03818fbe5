//! Per-tick movement resolution.

use maze_chase_core::{EntityId, EntityKind, Event, GameState, GridPos};
use tracing::{debug, error, info, trace};

use crate::{
    entity::{Movable, Player, Pursuer},
    grid::GridMap,
    state::Trigger,
    World,
};

/// Whether the remaining entities of a tick still get resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Outcome of resolving one entity against the grid.
#[derive(Clone, Copy, Debug)]
enum Resolution {
    Caught {
        pursuer: EntityId,
    },
    Moved {
        entity: EntityId,
        kind: EntityKind,
        from: GridPos,
        to: GridPos,
    },
    Denied {
        entity: EntityId,
        at: GridPos,
        intention: GridPos,
    },
}

/// Advances the world by one tick while the game is running.
pub(crate) fn tick(world: &mut World, out_events: &mut Vec<Event>) {
    if world.machine.state() != GameState::Playing {
        return;
    }

    world.tick_index = world.tick_index.saturating_add(1);
    out_events.push(Event::TimeAdvanced {
        tick: world.tick_index,
    });

    let slots = world.pursuers.len() + 1;
    for slot in 0..slots {
        if let Some(entity) = movable_mut(&mut world.player, &mut world.pursuers, slot) {
            entity.compute_intention();
        }
    }

    for slot in 0..slots {
        let player_position = world.player.position();
        let Some(entity) = movable_mut(&mut world.player, &mut world.pursuers, slot) else {
            continue;
        };
        let resolution = resolve(&world.grid, entity, player_position);
        if settle(world, resolution, out_events) == Flow::Halt {
            break;
        }
    }

    if !world.machine.state().is_terminal() {
        for pursuer in &world.pursuers {
            if let Some(options) = pursuer.pending_decision() {
                out_events.push(Event::PursuerDecisionRequested {
                    pursuer: pursuer.id(),
                    options,
                });
            }
        }
    }

    check_containment(world, out_events);
}

/// Slot `0` is the player, pursuers follow in registration order.
fn movable_mut<'a>(
    player: &'a mut Player,
    pursuers: &'a mut [Pursuer],
    slot: usize,
) -> Option<&'a mut dyn Movable> {
    match slot.checked_sub(1) {
        None => Some(player),
        Some(index) => pursuers
            .get_mut(index)
            .map(|pursuer| pursuer as &mut dyn Movable),
    }
}

fn resolve(grid: &GridMap, entity: &mut dyn Movable, player_position: GridPos) -> Resolution {
    let position = entity.position();
    let intention = entity.intention();
    let options = grid.available_directions(position);

    if options.is_junction() {
        entity.resolve_corner(options);
    }

    if entity.kind() == EntityKind::Pursuer && position == player_position {
        return Resolution::Caught {
            pursuer: entity.id(),
        };
    }

    if grid.contains(intention) && grid.is_passable(intention) {
        entity.accept_movement();
        Resolution::Moved {
            entity: entity.id(),
            kind: entity.kind(),
            from: position,
            to: intention,
        }
    } else {
        entity.deny_movement(options);
        Resolution::Denied {
            entity: entity.id(),
            at: position,
            intention,
        }
    }
}

fn settle(world: &mut World, resolution: Resolution, out_events: &mut Vec<Event>) -> Flow {
    match resolution {
        Resolution::Caught { pursuer } => {
            world.lives = world.lives.saturating_sub(1);
            debug!(pursuer = pursuer.get(), lives = world.lives, "player caught");
            out_events.push(Event::LifeLost {
                pursuer,
                lives: world.lives,
            });

            if world.lives == 0 {
                return transition(world, Trigger::LivesExhausted, out_events);
            }

            world.player.teleport(world.respawn);
            debug!(
                row = world.respawn.row(),
                column = world.respawn.column(),
                "player respawned"
            );
            out_events.push(Event::PlayerRespawned { at: world.respawn });
            Flow::Continue
        }
        Resolution::Moved {
            entity,
            kind,
            from,
            to,
        } => {
            if from != to {
                out_events.push(Event::EntityMoved { entity, from, to });
            }

            // The pellet under the player before the move is the one eaten.
            if kind == EntityKind::Player && world.grid.consume_pellet(from) {
                world.score = world.score.saturating_add(1);
                out_events.push(Event::PelletConsumed {
                    cell: from,
                    score: world.score,
                });

                if world.score >= world.victory_threshold {
                    return transition(world, Trigger::PelletsExhausted, out_events);
                }
            }
            Flow::Continue
        }
        Resolution::Denied {
            entity,
            at,
            intention,
        } => {
            trace!(
                entity = entity.get(),
                row = intention.row(),
                column = intention.column(),
                "movement denied"
            );
            out_events.push(Event::MovementDenied {
                entity,
                at,
                intention,
            });
            Flow::Continue
        }
    }
}

fn transition(world: &mut World, trigger: Trigger, out_events: &mut Vec<Event>) -> Flow {
    if let Some((from, to)) = world.machine.fire(trigger) {
        info!(?from, ?to, score = world.score, lives = world.lives, "game state changed");
        out_events.push(Event::GameStateChanged { from, to });
    }
    Flow::Halt
}

fn check_containment(world: &World, out_events: &mut Vec<Event>) {
    let player = &world.player;
    let entities = std::iter::once((player.id(), player.position())).chain(
        world
            .pursuers
            .iter()
            .map(|pursuer| (pursuer.id(), pursuer.position())),
    );

    for (entity, position) in entities {
        if !world.grid.is_passable(position) {
            error!(
                entity = entity.get(),
                row = position.row(),
                column = position.column(),
                "entity left the passable area"
            );
            out_events.push(Event::InvariantViolated { entity, position });
        }
    }
}
