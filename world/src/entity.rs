//! Entity motion model shared by the player and the pursuers.

use maze_chase_core::{Direction, Directions, EntityColor, EntityId, EntityKind, GridPos, Velocity};

/// Motion contract the rules engine drives every tick.
///
/// The intention is always the position plus one step of velocity or
/// direction; it is either committed by [`Movable::accept_movement`] or
/// cancelled by [`Movable::deny_movement`].
pub(crate) trait Movable {
    fn id(&self) -> EntityId;

    fn kind(&self) -> EntityKind;

    fn position(&self) -> GridPos;

    fn intention(&self) -> GridPos;

    /// Proposes the next position from the current state.
    fn compute_intention(&mut self);

    /// Commits the intention into the position.
    fn accept_movement(&mut self);

    /// Cancels the intention. `options` are the open directions around the
    /// current cell.
    fn deny_movement(&mut self, options: Directions);

    /// Invoked when the current cell is a junction, before movement is
    /// resolved.
    fn resolve_corner(&mut self, options: Directions);
}

/// The player-controlled entity.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    position: GridPos,
    intention: GridPos,
    velocity: Velocity,
}

impl Player {
    pub(crate) fn spawn(position: GridPos) -> Self {
        Self {
            position,
            intention: position,
            velocity: Velocity::ZERO,
        }
    }

    pub(crate) fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub(crate) fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Moves the player without going through intention resolution.
    pub(crate) fn teleport(&mut self, position: GridPos) {
        self.position = position;
        self.intention = position;
    }
}

impl Movable for Player {
    fn id(&self) -> EntityId {
        EntityId::PLAYER
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn position(&self) -> GridPos {
        self.position
    }

    fn intention(&self) -> GridPos {
        self.intention
    }

    fn compute_intention(&mut self) {
        self.intention = self.position.offset(
            i32::from(self.velocity.row()),
            i32::from(self.velocity.column()),
        );
    }

    fn accept_movement(&mut self) {
        self.position = self.intention;
    }

    fn deny_movement(&mut self, _options: Directions) {
        self.intention = self.position;
    }

    // Player direction only ever changes through input.
    fn resolve_corner(&mut self, _options: Directions) {}
}

/// An autonomously moving pursuer.
#[derive(Clone, Debug)]
pub(crate) struct Pursuer {
    id: EntityId,
    position: GridPos,
    intention: GridPos,
    direction: Direction,
    color: EntityColor,
    pending: Option<Directions>,
}

impl Pursuer {
    pub(crate) fn spawn(
        id: EntityId,
        position: GridPos,
        direction: Direction,
        color: EntityColor,
    ) -> Self {
        Self {
            id,
            position,
            intention: position,
            direction,
            color,
            pending: None,
        }
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn color(&self) -> EntityColor {
        self.color
    }

    /// Outstanding decision request raised during the last tick.
    pub(crate) fn pending_decision(&self) -> Option<Directions> {
        self.pending
    }

    /// Adopts `direction` when it answers the outstanding request.
    ///
    /// Returns `false` and leaves the pursuer untouched when no request is
    /// pending or the direction was not among the offered options.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        match self.pending {
            Some(options) if options.contains(direction) => {
                self.direction = direction;
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    fn request_decision(&mut self, options: Directions) {
        if !options.is_empty() {
            self.pending = Some(options);
        }
    }
}

impl Movable for Pursuer {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Pursuer
    }

    fn position(&self) -> GridPos {
        self.position
    }

    fn intention(&self) -> GridPos {
        self.intention
    }

    // A request only lives until the next tick starts.
    fn compute_intention(&mut self) {
        self.pending = None;
        self.intention = self.position.step(self.direction);
    }

    fn accept_movement(&mut self) {
        self.position = self.intention;
    }

    fn deny_movement(&mut self, options: Directions) {
        self.intention = self.position;
        self.request_decision(options);
    }

    fn resolve_corner(&mut self, options: Directions) {
        self.request_decision(options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(directions: &[Direction]) -> Directions {
        directions.iter().copied().collect()
    }

    #[test]
    fn player_intention_follows_velocity() {
        let mut player = Player::spawn(GridPos::new(5, 5));
        player.set_velocity(Velocity::from_direction(Direction::Left));

        player.compute_intention();
        assert_eq!(player.intention(), GridPos::new(5, 4));

        player.accept_movement();
        assert_eq!(player.position(), GridPos::new(5, 4));
    }

    #[test]
    fn stationary_player_intends_to_stay() {
        let mut player = Player::spawn(GridPos::new(2, 3));
        player.compute_intention();

        assert_eq!(player.intention(), player.position());
    }

    #[test]
    fn denial_cancels_intention() {
        let mut player = Player::spawn(GridPos::new(1, 1));
        player.set_velocity(Velocity::from_direction(Direction::Above));
        player.compute_intention();

        player.deny_movement(Directions::NONE);

        assert_eq!(player.intention(), GridPos::new(1, 1));
        assert_eq!(player.position(), GridPos::new(1, 1));
    }

    #[test]
    fn pursuer_intention_recomputed_from_position() {
        let mut pursuer = Pursuer::spawn(
            EntityId::new(1),
            GridPos::new(4, 4),
            Direction::Right,
            EntityColor::from_rgb(255, 0, 0),
        );

        pursuer.compute_intention();
        pursuer.compute_intention();

        assert_eq!(pursuer.intention(), GridPos::new(4, 5));
    }

    #[test]
    fn pursuer_denial_raises_decision_request() {
        let mut pursuer = Pursuer::spawn(
            EntityId::new(1),
            GridPos::new(4, 4),
            Direction::Below,
            EntityColor::from_rgb(0, 255, 255),
        );
        pursuer.compute_intention();
        let open = options(&[Direction::Left, Direction::Right]);

        pursuer.deny_movement(open);

        assert_eq!(pursuer.intention(), pursuer.position());
        assert_eq!(pursuer.pending_decision(), Some(open));
    }

    #[test]
    fn steering_only_accepts_offered_directions() {
        let mut pursuer = Pursuer::spawn(
            EntityId::new(2),
            GridPos::new(4, 4),
            Direction::Below,
            EntityColor::from_rgb(255, 140, 0),
        );
        assert!(!pursuer.steer(Direction::Left));

        pursuer.resolve_corner(options(&[Direction::Above, Direction::Left, Direction::Right]));
        assert!(!pursuer.steer(Direction::Below));
        assert_eq!(pursuer.direction(), Direction::Below);

        assert!(pursuer.steer(Direction::Left));
        assert_eq!(pursuer.direction(), Direction::Left);
        assert_eq!(pursuer.pending_decision(), None);
    }

    #[test]
    fn unanswered_request_expires_next_tick() {
        let mut pursuer = Pursuer::spawn(
            EntityId::new(3),
            GridPos::new(4, 4),
            Direction::Below,
            EntityColor::from_rgb(255, 15, 192),
        );
        pursuer.resolve_corner(options(&[Direction::Above, Direction::Left, Direction::Right]));

        pursuer.compute_intention();

        assert_eq!(pursuer.pending_decision(), None);
        assert!(!pursuer.steer(Direction::Left));
    }

    #[test]
    fn player_ignores_corners() {
        let mut player = Player::spawn(GridPos::new(1, 1));
        player.set_velocity(Velocity::from_direction(Direction::Right));

        player.resolve_corner(options(&[Direction::Above, Direction::Below, Direction::Left]));

        assert_eq!(player.velocity(), Velocity::from_direction(Direction::Right));
    }
}
