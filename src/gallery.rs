//! In-memory session gallery.
//!
//! Holds generated designs newest-first together with the active selection,
//! the view being shown and the last error message. Nothing here is persisted.

use crate::image_ref::ImageRef;
use crate::models::{GeneratedImage, GenerationRequest, MockupSettings};
use crate::{Error, Result};
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Design,
    Mockup,
}

#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<GeneratedImage>,
    active: Option<String>,
    view: ViewMode,
    last_error: Option<String>,
    last_id: i64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond timestamp, bumped past the previous id when the clock has
    /// not advanced so ids stay unique.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    /// Records a fresh design at the front of the list and makes it active.
    pub fn insert(&mut self, design: ImageRef, request: &GenerationRequest) -> GeneratedImage {
        let id = self.next_id();
        let image = GeneratedImage::from_request(
            id.to_string(),
            design,
            request,
            Utc::now().timestamp_millis(),
        );

        self.images.insert(0, image.clone());
        self.active = Some(image.id.clone());
        self.view = ViewMode::Design;
        image
    }

    pub fn images(&self) -> &[GeneratedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedImage> {
        self.images.iter().find(|image| image.id == id)
    }

    fn get_or_not_found(&self, id: &str) -> Result<&GeneratedImage> {
        self.get(id)
            .ok_or_else(|| Error::NotFound(format!("No generated image with id {}", id)))
    }

    pub fn active(&self) -> Option<&GeneratedImage> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Makes `id` the active design and shows its design view.
    pub fn select(&mut self, id: &str) -> Result<&GeneratedImage> {
        self.get_or_not_found(id)?;
        self.active = Some(id.to_string());
        self.view = ViewMode::Design;
        self.get_or_not_found(id)
    }

    /// Removes a record, clearing the active selection if it pointed at it.
    pub fn delete(&mut self, id: &str) -> Option<GeneratedImage> {
        let position = self.images.iter().position(|image| image.id == id)?;
        let removed = self.images.remove(position);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Some(removed)
    }

    /// Stores a mockup on an existing record, replacing any previous one, and
    /// remembers the placement it was rendered with.
    pub fn attach_mockup(
        &mut self,
        id: &str,
        mockup: ImageRef,
        settings: &MockupSettings,
    ) -> Result<GeneratedImage> {
        let image = self
            .images
            .iter_mut()
            .find(|image| image.id == id)
            .ok_or_else(|| Error::NotFound(format!("No generated image with id {}", id)))?;

        image.mockup = Some(mockup);
        image.placement = settings.placement;
        image.placement_detail = settings.placement_detail.clone();
        image.size = settings.size.clone();
        Ok(image.clone())
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}
