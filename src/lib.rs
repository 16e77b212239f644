//! Inkspire - a two-step AI tattoo design workflow
//!
//! Generates a flat 2D tattoo design from a text description, then composites
//! that design onto a photorealistic body-part mockup at a chosen placement and
//! size. Image generation is delegated to a Gemini image model.

pub mod ai;
pub mod app;
pub mod error;
pub mod gallery;
pub mod generator;
pub mod image;
pub mod image_ref;
pub mod models;
pub mod prompts;
pub mod studio;
pub mod styles;

pub use error::{Error, Result};
