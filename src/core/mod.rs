//! Core module - shared building blocks for catalog commands

pub mod catalog;
pub mod model;
pub mod render;
pub mod util;
