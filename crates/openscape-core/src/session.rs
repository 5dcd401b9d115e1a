//! Session: a running world with its own seeded random source.
//!
//! `Session` owns everything a dispatch needs: the configuration, the static
//! terrain, the current [`WorldState`], the handler registry and a
//! [`ChaCha8Rng`] seeded from a master seed. Callers feed it actions and read
//! back snapshots.
//!
//! # Determinism
//!
//! Given the same seed and the same sequence of `(action, now_ms)` inputs, a
//! session produces identical states. Every random draw goes through the
//! session's generator; the wall clock only affects effect expiry.
//!
//! # Example
//!
//! ```
//! use openscape_core::config::SimConfig;
//! use openscape_core::dispatch::Action;
//! use openscape_core::session::Session;
//!
//! let mut session = Session::new(SimConfig::default(), 42);
//! for i in 0..10 {
//!     session.step(i * 600);
//! }
//! assert_eq!(session.tick(), 10);
//!
//! let state = session.submit(Action::CloseInterface, 6_000);
//! assert!(state.open_interface.is_none());
//! ```

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::dispatch::{Action, DispatchContext, Dispatcher};
use crate::error::SaveError;
use crate::state::{SaveData, WorldState};
use crate::terrain::Terrain;
use crate::world;

// =============================================================================
// Session
// =============================================================================

/// A running simulation.
pub struct Session {
    config: SimConfig,
    terrain: Terrain,
    state: WorldState,
    dispatcher: Dispatcher,
    rng: ChaCha8Rng,
    seed: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tick", &self.state.tick)
            .field("seed", &self.seed)
            .field("dispatcher", &self.dispatcher)
            .field("resources", &self.state.resources.len())
            .field("npcs", &self.state.npcs.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session with a freshly generated world.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation configuration
    /// * `seed` - Master seed for world generation and every later roll
    ///
    /// # Example
    ///
    /// ```
    /// use openscape_core::config::SimConfig;
    /// use openscape_core::session::Session;
    ///
    /// let session = Session::new(SimConfig::default(), 12345);
    /// assert_eq!(session.tick(), 0);
    /// assert_eq!(session.seed(), 12345);
    /// ```
    #[must_use]
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let terrain = Terrain::generate(config.map_size);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = world::new_world(&config, &terrain, &mut rng);
        tracing::info!(seed, map_size = config.map_size, "session started");
        Self {
            config,
            terrain,
            state,
            dispatcher: Dispatcher::with_default_handlers(),
            rng,
            seed,
        }
    }

    /// Resumes a session from saved data on freshly generated terrain.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if the save is inconsistent.
    pub fn resume(config: SimConfig, seed: u64, save: SaveData) -> Result<Self, SaveError> {
        let state = WorldState::from_save(save, &config)?;
        let terrain = Terrain::generate(config.map_size);
        tracing::info!(seed, "session resumed");
        Ok(Self::with_state(config, terrain, state, seed))
    }

    /// Wraps an existing state and terrain.
    #[must_use]
    pub fn with_state(config: SimConfig, terrain: Terrain, state: WorldState, seed: u64) -> Self {
        Self {
            config,
            terrain,
            state,
            dispatcher: Dispatcher::with_default_handlers(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Dispatches `action` and makes the result the current state.
    ///
    /// Messages beyond the configured capacity are trimmed after every
    /// dispatch, not only on ticks.
    pub fn submit(&mut self, action: Action, now_ms: u64) -> &WorldState {
        let mut ctx = DispatchContext::new(&self.terrain, &self.config, &mut self.rng, now_ms);
        let mut next = self.dispatcher.dispatch(&self.state, &action, &mut ctx);
        next.trim_messages(self.config.message_capacity);
        self.state = next;
        &self.state
    }

    /// Advances one tick.
    pub fn step(&mut self, now_ms: u64) -> &WorldState {
        self.submit(Action::Tick, now_ms)
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Current tick.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    /// Master seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Static terrain.
    #[must_use]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Handler registry, for replacing or removing handlers.
    #[must_use]
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Persisted subset of the current state.
    #[must_use]
    pub fn save(&self) -> SaveData {
        self.state.to_save()
    }
}

// =============================================================================
// Tests
// =============================================================================
