#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuer steering system that answers decision requests with random turns.

use maze_chase_core::{Command, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Seed used by [`Pursuit::default`].
pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

/// Pure system that reacts to decision requests and emits steering commands.
///
/// Each request is answered with a uniformly random direction drawn from the
/// offered options, so a pursuer never turns into a wall it was told about.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates a pursuit system whose choices replay identically for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events and emits one steering command per request.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::PursuerDecisionRequested { pursuer, options } = event else {
                continue;
            };
            if options.is_empty() {
                continue;
            }

            let pick = self.rng.gen_range(0..options.len());
            if let Some(direction) = options.nth(pick) {
                trace!(pursuer = pursuer.get(), ?direction, "pursuer steered");
                out.push(Command::SteerPursuer {
                    pursuer: *pursuer,
                    direction,
                });
            }
        }
    }
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
