//! Image file handling
//!
//! Loads design files from disk as reference images and writes generated
//! designs and mockups into the session output directory.

pub mod processor;

pub use processor::ImageProcessor;

/// File stem for a saved design.
pub fn design_file_stem(id: &str) -> String {
    format!("inkspire-{}", id)
}

/// File stem for a saved mockup.
pub fn mockup_file_stem(id: &str) -> String {
    format!("inkspire-{}-mockup", id)
}
