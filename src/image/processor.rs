use crate::image_ref::ImageRef;
use crate::{Error, Result};
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub struct ImageProcessor {
    output_dir: PathBuf,
}

impl ImageProcessor {
    pub fn new(output_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// PNG, JPEG and WebP are sent as-is once they decode. Anything else the
    /// `image` crate can read is re-encoded to PNG.
    fn prepare_reference_sync(bytes: Vec<u8>) -> Result<ImageRef> {
        let image = image::load_from_memory(&bytes)?;
        match image::guess_format(&bytes)? {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP => {
                Ok(ImageRef::from_bytes(&bytes))
            }
            other => {
                tracing::debug!("Re-encoding {:?} reference as PNG", other);
                let mut png = Vec::new();
                image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
                Ok(ImageRef::from_bytes(&png))
            }
        }
    }

    /// Reads a design from disk and prepares it as a reference part.
    pub async fn load_reference(&self, path: &Path) -> Result<ImageRef> {
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());

        tokio::task::spawn_blocking(move || Self::prepare_reference_sync(bytes))
            .await
            .map_err(|e| Error::Invariant(format!("Image processing task join error: {}", e)))?
    }

    /// Writes `image` as `<output_dir>/<stem>.<ext>` and returns the path.
    pub async fn save(&self, image: &ImageRef, stem: &str) -> Result<PathBuf> {
        let bytes = image.decode()?;
        let path = self
            .output_dir
            .join(format!("{}.{}", stem, image.file_extension()));

        tokio::fs::write(&path, &bytes).await?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
