//! Deterministic simulation core of a grid-based bomb arena game.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod input;
pub mod logging;
pub mod map;
pub mod net;
pub mod systems;
