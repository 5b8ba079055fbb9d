//! Simulation core for a single-screen invaders shooter.
//!
//! The library owns every rule of the game: entities, the enemy formation,
//! barriers, collision resolution and the per-tick driver.  Window, input
//! polling and pixel output live outside; the core only consumes an
//! [`player::InputSnapshot`] and a [`clock::Clock`] and emits draw items to a
//! [`render::RenderSink`].

pub mod assets;
pub mod barrier;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod game_loop;
pub mod geometry;
pub mod player;
pub mod render;
