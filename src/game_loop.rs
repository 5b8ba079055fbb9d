//! Frame-loop driver.
//!
//! `FrameLoop` owns the game state, the clock and the RNG.  Each call to
//! [`FrameLoop::step`] runs exactly one tick (input, simulation, collisions)
//! and then renders it; the caller polls the returned [`LoopSignal`] to decide
//! whether to keep looping.  Frame pacing is the caller's business.

use log::info;
use rand::Rng;

use crate::assets::SpriteTable;
use crate::clock::Clock;
use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::player::InputSnapshot;
use crate::render::{draw_frame, RenderSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    GameOver,
    FormationCleared,
}

pub fn signal_for(state: &GameState) -> LoopSignal {
    if state.is_game_over() {
        LoopSignal::GameOver
    } else if state.formation_cleared() {
        LoopSignal::FormationCleared
    } else {
        LoopSignal::Continue
    }
}

pub struct FrameLoop<C: Clock, R: Rng> {
    state: GameState,
    sprites: SpriteTable,
    clock: C,
    rng: R,
}

impl<C: Clock, R: Rng> FrameLoop<C, R> {
    pub fn new(config: GameConfig, sprites: SpriteTable, clock: C, rng: R) -> Self {
        let state = init_state(config, clock.now_ms());
        Self::from_state(state, sprites, clock, rng)
    }

    /// Resume from an existing state instead of a fresh game.
    pub fn from_state(state: GameState, sprites: SpriteTable, clock: C, rng: R) -> Self {
        FrameLoop {
            state,
            sprites,
            clock,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn signal(&self) -> LoopSignal {
        signal_for(&self.state)
    }

    /// Run one tick and render it.  Once the game has ended the state is
    /// frozen and only redrawn.
    pub fn step<S: RenderSink + ?Sized>(&mut self, input: &InputSnapshot, sink: &mut S) -> LoopSignal {
        let before = self.signal();
        if before == LoopSignal::Continue {
            let now = self.clock.now_ms();
            self.state = tick(&self.state, input, now, &mut self.rng);
        }
        self.render(sink);

        let after = self.signal();
        if after != before {
            match after {
                LoopSignal::GameOver => info!("game over, final score {}", self.state.score),
                LoopSignal::FormationCleared => {
                    info!("formation cleared, final score {}", self.state.score)
                }
                LoopSignal::Continue => {}
            }
        }
        after
    }

    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        draw_frame(&self.state, &self.sprites, sink);
    }

    /// Start a fresh game with the same config and sprites.
    pub fn restart(&mut self) {
        let config = self.state.config.clone();
        self.state = init_state(config, self.clock.now_ms());
        info!("game restarted");
    }
}
