//! # raylang-render
//!
//! The boundary between scene construction and the external ray tracer.
//! A [`Renderer`] takes an encoded wire document, turns it into whatever it
//! renders from, and writes the image named by the scene. This crate never
//! traces rays itself.

pub mod command;
pub mod renderer;

pub use command::{CommandRenderer, StagedScene};
pub use renderer::{submit, RenderOutcome, Renderer};
