//! Platform-independent site logic. No DOM, no network, no timers.

pub mod badges;
pub mod config;
pub mod menu;
pub mod paths;
pub mod repos;
pub mod resources;
pub mod reveal;
pub mod store;
pub mod subscribe;
pub mod theme;
pub mod typing;
