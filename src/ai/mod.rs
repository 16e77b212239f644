//! AI service integration for tattoo image generation
//!
//! Provides the image-generation seam used by the design and mockup steps,
//! a Gemini implementation, and a scriptable mock for tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageGenerationClient;

use crate::image_ref::ImageRef;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Sends `prompt`, plus `reference` as an extra input part when present,
    /// and returns the first image the service produced.
    async fn generate_image(&self, prompt: &str, reference: Option<&ImageRef>)
        -> Result<ImageRef>;
}
