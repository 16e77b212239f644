//! Session state for the design → mockup workflow.
//!
//! A [`Studio`] owns the generator and the gallery. Each step has its own
//! in-flight flag: while a design (or mockup) request is outstanding, another
//! request of the same kind is refused rather than queued. Failures leave the
//! gallery as it was and record a message for the user.

use crate::gallery::{Gallery, ViewMode};
use crate::generator::TattooGenerator;
use crate::image_ref::ImageRef;
use crate::models::{GeneratedImage, GenerationRequest, MockupRequest, MockupSettings};
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Marks a step as running until dropped.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, step: &str) -> Result<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            warn!("Rejected {} request: one is already running", step);
            return Err(Error::InProgress(step.to_string()));
        }
        Ok(Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct Studio {
    generator: TattooGenerator,
    gallery: Mutex<Gallery>,
    design_in_flight: AtomicBool,
    mockup_in_flight: AtomicBool,
}

impl Studio {
    pub fn new(generator: TattooGenerator) -> Self {
        Self {
            generator,
            gallery: Mutex::new(Gallery::new()),
            design_in_flight: AtomicBool::new(false),
            mockup_in_flight: AtomicBool::new(false),
        }
    }

    fn gallery(&self) -> MutexGuard<'_, Gallery> {
        self.gallery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_generating_design(&self) -> bool {
        self.design_in_flight.load(Ordering::Acquire)
    }

    pub fn is_generating_mockup(&self) -> bool {
        self.mockup_in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the gallery, newest first.
    pub fn images(&self) -> Vec<GeneratedImage> {
        self.gallery().images().to_vec()
    }

    pub fn get(&self, id: &str) -> Option<GeneratedImage> {
        self.gallery().get(id).cloned()
    }

    pub fn active(&self) -> Option<GeneratedImage> {
        self.gallery().active().cloned()
    }

    pub fn view(&self) -> ViewMode {
        self.gallery().view()
    }

    pub fn last_error(&self) -> Option<String> {
        self.gallery().last_error().map(str::to_string)
    }

    pub fn select(&self, id: &str) -> Result<GeneratedImage> {
        self.gallery().select(id).cloned()
    }

    pub fn delete(&self, id: &str) -> Option<GeneratedImage> {
        let removed = self.gallery().delete(id);
        if removed.is_some() {
            info!("Deleted design {}", id);
        }
        removed
    }

    /// Adds an externally produced design so it can be visualized.
    pub fn import_design(&self, design: ImageRef, request: &GenerationRequest) -> GeneratedImage {
        self.gallery().insert(design, request)
    }

    /// Step one: generate a design and put it at the front of the gallery.
    pub async fn generate_design(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        request.validate()?;
        let _in_flight = InFlight::acquire(&self.design_in_flight, "design")?;
        self.gallery().clear_error();

        match self.generator.generate_design(request).await {
            Ok(design) => {
                let image = {
                    let mut gallery = self.gallery();
                    gallery.insert(design, request)
                };
                info!("Stored design {}", image.id);
                Ok(image)
            }
            Err(e) => {
                self.gallery()
                    .record_error(format!("Failed to generate the design. {}", e));
                Err(e)
            }
        }
    }

    /// Re-runs step one with the parameters stored on an existing record.
    pub async fn regenerate_design(&self, id: &str) -> Result<GeneratedImage> {
        let request = self
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("No generated image with id {}", id)))?
            .to_request();
        self.generate_design(&request).await
    }

    /// Step two: render (or re-render) the mockup for a stored design.
    ///
    /// The view switches to the mockup while the request runs and falls back to
    /// the design view if it fails.
    pub async fn generate_mockup(
        &self,
        id: &str,
        settings: MockupSettings,
    ) -> Result<GeneratedImage> {
        let _in_flight = InFlight::acquire(&self.mockup_in_flight, "mockup")?;

        let request = {
            let mut gallery = self.gallery();
            let image = gallery
                .get(id)
                .ok_or_else(|| Error::NotFound(format!("No generated image with id {}", id)))?;
            let request = MockupRequest {
                design: image.design.clone(),
                style: image.style,
                settings,
            };
            gallery.clear_error();
            gallery.set_view(ViewMode::Mockup);
            request
        };

        let result = self.generator.generate_mockup(&request).await.and_then(|mockup| {
            self.gallery()
                .attach_mockup(id, mockup, &request.settings)
        });

        let mut gallery = self.gallery();
        match result {
            Ok(image) => {
                info!("Attached mockup to design {}", id);
                Ok(image)
            }
            Err(e) => {
                gallery.record_error(format!("Failed to create the mockup. {}", e));
                gallery.set_view(ViewMode::Design);
                Err(e)
            }
        }
    }
}
