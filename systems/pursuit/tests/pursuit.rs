use maze_chase_core::{Command, Direction, Event, GameState, GridPos, Velocity};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World, WorldConfig};

fn drive(world: &mut World, pursuit: &mut Pursuit, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);

    let mut commands = Vec::new();
    pursuit.handle(&events, &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn pursuers_leave_spawn_through_offered_openings() {
    let mut world = World::new(&WorldConfig::default()).expect("standard config");
    let mut pursuit = Pursuit::new(3);

    let events = drive(&mut world, &mut pursuit, Command::Tick);

    let spawn_options = query::available_directions(&world, GridPos::new(15, 13));
    let steered: Vec<Direction> = events
        .iter()
        .filter_map(|event| match event {
            Event::PursuerSteered { direction, .. } => Some(*direction),
            _ => None,
        })
        .collect();
    assert_eq!(steered.len(), 4);
    assert!(steered
        .iter()
        .all(|direction| spawn_options.contains(*direction)));

    let _ = drive(&mut world, &mut pursuit, Command::Tick);
    for (_, position) in query::pursuer_positions(&world) {
        assert_ne!(position, GridPos::new(15, 13));
    }
}

#[test]
fn steering_offers_come_from_the_cell_the_tick_started_on() {
    let mut world = World::new(&WorldConfig::default()).expect("standard config");
    let mut pursuit = Pursuit::new(99);

    for _ in 0..500 {
        let before = query::pursuer_positions(&world);
        let events = drive(&mut world, &mut pursuit, Command::Tick);

        for event in &events {
            if let Event::PursuerSteered { pursuer, direction } = event {
                let (_, at) = before
                    .iter()
                    .copied()
                    .find(|(id, _)| id == pursuer)
                    .expect("steered pursuer exists");
                assert!(query::available_directions(&world, at).contains(*direction));
            }
            assert!(!matches!(event, Event::InvariantViolated { .. }));
        }
    }
}

#[test]
fn long_running_session_keeps_everyone_inside() {
    let mut world = World::new(&WorldConfig::default()).expect("standard config");
    let mut pursuit = Pursuit::new(2024);
    let turns = [
        Direction::Right,
        Direction::Below,
        Direction::Left,
        Direction::Above,
    ];

    for step in 0..1_000usize {
        if step % 13 == 0 {
            let _ = drive(
                &mut world,
                &mut pursuit,
                Command::SetPlayerVelocity {
                    velocity: Velocity::from_direction(turns[(step / 13) % turns.len()]),
                },
            );
        }
        let events = drive(&mut world, &mut pursuit, Command::Tick);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::InvariantViolated { .. })));

        let grid = query::grid(&world);
        assert!(grid.is_passable(query::player_position(&world)));
        for (_, position) in query::pursuer_positions(&world) {
            assert!(grid.is_passable(position));
        }
        assert_eq!(
            query::score(&world) + grid.pellet_count(),
            query::victory_threshold(&world)
        );
        if query::state(&world) != GameState::Playing {
            break;
        }
    }
}
