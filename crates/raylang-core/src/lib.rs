//! # raylang-core
//!
//! Core types shared by every Raylang crate.
//! This crate holds the value types a scene is made of (vectors, matrices,
//! colors), the error taxonomy, the `raylang.toml` configuration and
//! content hashing for encoded scene documents.

pub mod color;
pub mod config;
pub mod error;
pub mod hash;
pub mod math;

pub use color::Color;
pub use config::{RaylangConfig, RenderDefaults, RendererConfig};
pub use error::{RaylangError, RaylangResult};
pub use hash::ContentHash;
pub use math::{Matrix4, Vector3};
