pub mod config;
pub mod game;
pub mod games;
pub mod protocol;
