pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod player;
pub mod roster;
pub mod startup;
pub mod storage;
pub mod words;
