//! The two generation steps: flat design, then body mockup.

use crate::ai::ImageGenerationService;
use crate::image_ref::ImageRef;
use crate::models::{GenerationRequest, MockupRequest};
use crate::{prompts, Result};
use tracing::{error, info};

pub struct TattooGenerator {
    images: Box<dyn ImageGenerationService>,
}

impl TattooGenerator {
    pub fn new(images: Box<dyn ImageGenerationService>) -> Self {
        Self { images }
    }

    /// Step one. Blank subjects are rejected before the service is called.
    pub async fn generate_design(&self, request: &GenerationRequest) -> Result<ImageRef> {
        request.validate()?;

        let prompt = prompts::design_prompt(request);
        info!(
            "Generating {} design ({} chars of prompt)",
            request.style.label(),
            prompt.len()
        );

        self.images
            .generate_image(&prompt, None)
            .await
            .inspect_err(|e| error!("Error generating tattoo design: {}", e))
    }

    /// Step two. The design travels with the prompt as a reference part.
    pub async fn generate_mockup(&self, request: &MockupRequest) -> Result<ImageRef> {
        let prompt = prompts::mockup_prompt(request.style, &request.settings);
        info!(
            "Generating mockup on {} ({})",
            request.settings.placement.label(),
            request.settings.effective_size()
        );

        self.images
            .generate_image(&prompt, Some(&request.design))
            .await
            .inspect_err(|e| error!("Error generating tattoo mockup: {}", e))
    }
}
