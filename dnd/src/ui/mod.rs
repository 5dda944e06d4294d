//! UI module for the character sheet viewer

pub mod render;
pub mod theme;
pub mod widgets;
