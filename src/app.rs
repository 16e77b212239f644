//! Command-line orchestration: run the workflow and save results to disk.

use crate::ai::gemini::GeminiHttpClient;
use crate::ai::{GeminiImageClient, ImageGenerationService};
use crate::generator::TattooGenerator;
use crate::image::{design_file_stem, mockup_file_stem, ImageProcessor};
use crate::image_ref::ImageRef;
use crate::models::{Config, GenerationRequest, MockupSettings, TattooStyle};
use crate::studio::Studio;
use crate::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use uuid::Uuid;

/// Files written for one gallery record.
#[derive(Debug, Clone)]
pub struct SavedImage {
    pub id: String,
    pub design_path: Option<PathBuf>,
    pub mockup_path: Option<PathBuf>,
}

pub struct App {
    studio: Studio,
    processor: ImageProcessor,
}

impl App {
    /// Build an app around any image service, writing into `output_dir`.
    pub fn with_service(
        images: Box<dyn ImageGenerationService>,
        output_dir: &Path,
    ) -> Result<Self> {
        Ok(Self {
            studio: Studio::new(TattooGenerator::new(images)),
            processor: ImageProcessor::new(output_dir)?,
        })
    }

    /// Construct an app from environment configuration, using a fresh
    /// per-session directory under the configured output root.
    pub fn from_config(config: &Config) -> Result<Self> {
        let date = Local::now().format("%Y-%m-%d").to_string();
        let output_dir = config
            .output_dir
            .join(format!("{}_{}", date, Uuid::new_v4()));

        let mut http = GeminiHttpClient::new(
            config.gemini_api_key.clone(),
            config.image_model.clone(),
            config.request_timeout,
        );
        if let Some(base_url) = &config.gemini_base_url {
            http = http.with_base_url(base_url.clone());
        }
        info!("Image provider: Gemini (model: {})", http.model());

        let app = Self::with_service(Box::new(GeminiImageClient::from_http(http)), &output_dir)?;
        info!("Created output directory: {}", output_dir.display());
        Ok(app)
    }

    pub fn studio(&self) -> &Studio {
        &self.studio
    }

    pub fn output_dir(&self) -> &Path {
        self.processor.output_dir()
    }

    /// Generates a design, optionally followed by its mockup, and saves both.
    ///
    /// The design file is written before the mockup is attempted, so it
    /// survives a mockup failure.
    pub async fn design(&self, request: &GenerationRequest, with_mockup: bool) -> Result<SavedImage> {
        let image = self.studio.generate_design(request).await?;
        let design_path = self
            .processor
            .save(&image.design, &design_file_stem(&image.id))
            .await?;

        let mut saved = SavedImage {
            id: image.id.clone(),
            design_path: Some(design_path),
            mockup_path: None,
        };

        if with_mockup {
            let updated = self
                .studio
                .generate_mockup(&image.id, request.mockup_settings())
                .await
                .inspect_err(|e| error!("Mockup for design {} failed: {}", image.id, e))?;
            saved.mockup_path = self.save_mockup(&updated.id, updated.mockup.as_ref()).await?;
        }

        Ok(saved)
    }

    /// Renders a mockup for a design file that was produced elsewhere.
    pub async fn mockup_from_file(
        &self,
        design: &Path,
        style: TattooStyle,
        settings: MockupSettings,
    ) -> Result<SavedImage> {
        let reference = self.processor.load_reference(design).await?;

        let mut request = GenerationRequest::new(
            design
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "imported design".to_string()),
        );
        request.style = style;
        request.placement = settings.placement;
        request.placement_detail = settings.placement_detail.clone();
        request.size = settings.size.clone();

        let imported = self.studio.import_design(reference, &request);
        info!("Imported {} as design {}", design.display(), imported.id);

        let updated = self.studio.generate_mockup(&imported.id, settings).await?;
        Ok(SavedImage {
            id: updated.id.clone(),
            design_path: None,
            mockup_path: self.save_mockup(&updated.id, updated.mockup.as_ref()).await?,
        })
    }

    async fn save_mockup(
        &self,
        id: &str,
        mockup: Option<&ImageRef>,
    ) -> Result<Option<PathBuf>> {
        match mockup {
            Some(mockup) => Ok(Some(
                self.processor.save(mockup, &mockup_file_stem(id)).await?,
            )),
            None => Ok(None),
        }
    }
}
