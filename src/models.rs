//! Data models and structures
//!
//! Defines the tattoo parameters a user picks, the generation and mockup
//! requests built from them, the generated-image records kept by the gallery,
//! and the environment configuration.

use crate::image_ref::ImageRef;
use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Size used whenever the user leaves the size field blank.
pub const DEFAULT_SIZE: &str = "15 cm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TattooStyle {
    Realism,
    OldSchool,
    NeoTraditional,
    Watercolor,
    #[default]
    Blackwork,
    Minimalist,
    Geometric,
    Japanese,
    Dotwork,
    TrashPolka,
    Tribal,
    Biomechanical,
    Sketch,
}

impl TattooStyle {
    pub const ALL: [TattooStyle; 13] = [
        TattooStyle::Realism,
        TattooStyle::OldSchool,
        TattooStyle::NeoTraditional,
        TattooStyle::Watercolor,
        TattooStyle::Blackwork,
        TattooStyle::Minimalist,
        TattooStyle::Geometric,
        TattooStyle::Japanese,
        TattooStyle::Dotwork,
        TattooStyle::TrashPolka,
        TattooStyle::Tribal,
        TattooStyle::Biomechanical,
        TattooStyle::Sketch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TattooStyle::Realism => "Realism",
            TattooStyle::OldSchool => "Old School (Traditional)",
            TattooStyle::NeoTraditional => "Neo-Traditional",
            TattooStyle::Watercolor => "Watercolor",
            TattooStyle::Blackwork => "Blackwork",
            TattooStyle::Minimalist => "Minimalist / Fine Line",
            TattooStyle::Geometric => "Geometric",
            TattooStyle::Japanese => "Japanese (Irezumi)",
            TattooStyle::Dotwork => "Dotwork",
            TattooStyle::TrashPolka => "Trash Polka",
            TattooStyle::Tribal => "Tribal",
            TattooStyle::Biomechanical => "Biomechanical",
            TattooStyle::Sketch => "Sketch / Illustrative",
        }
    }
}

impl fmt::Display for TattooStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    BlackAndGrey,
    FullColor,
    RedAndBlack,
}

impl ColorScheme {
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::BlackAndGrey => "Black and grey",
            ColorScheme::FullColor => "Full color",
            ColorScheme::RedAndBlack => "Red and black only",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPlacement {
    #[default]
    Forearm,
    Shoulder,
    Chest,
    Back,
    Neck,
    BehindEar,
    Thigh,
    Calf,
    Ankle,
    Hand,
}

impl BodyPlacement {
    pub fn label(&self) -> &'static str {
        match self {
            BodyPlacement::Forearm => "Forearm",
            BodyPlacement::Shoulder => "Upper arm / Shoulder",
            BodyPlacement::Chest => "Chest",
            BodyPlacement::Back => "Back",
            BodyPlacement::Neck => "Neck / Nape",
            BodyPlacement::BehindEar => "Behind the ear",
            BodyPlacement::Thigh => "Thigh",
            BodyPlacement::Calf => "Calf",
            BodyPlacement::Ankle => "Ankle",
            BodyPlacement::Hand => "Hand",
        }
    }

    /// Whether the mockup needs the mastoid-skin rule instead of landing on the ear itself.
    pub fn is_behind_ear(&self) -> bool {
        matches!(self, BodyPlacement::BehindEar)
    }
}

impl fmt::Display for BodyPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `None` for absent or whitespace-only optional text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn size_or_default(size: &str) -> &str {
    let trimmed = size.trim();
    if trimmed.is_empty() {
        DEFAULT_SIZE
    } else {
        trimmed
    }
}

/// Parameters for step one: the flat 2D design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub subject: String,
    pub style: TattooStyle,
    pub color_scheme: ColorScheme,
    pub placement: BodyPlacement,
    pub placement_detail: Option<String>,
    pub size: String,
    pub additional_details: Option<String>,
}

impl GenerationRequest {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            style: TattooStyle::default(),
            color_scheme: ColorScheme::default(),
            placement: BodyPlacement::default(),
            placement_detail: None,
            size: DEFAULT_SIZE.to_string(),
            additional_details: None,
        }
    }

    /// Rejects requests that must never reach the image service.
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(Error::Validation(
                "Tattoo subject must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn effective_size(&self) -> &str {
        size_or_default(&self.size)
    }

    /// Placement settings to reuse when visualizing this design.
    pub fn mockup_settings(&self) -> MockupSettings {
        MockupSettings {
            placement: self.placement,
            placement_detail: self.placement_detail.clone(),
            size: self.size.clone(),
        }
    }
}

/// Placement parameters for step two; editable independently of the design.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MockupSettings {
    pub placement: BodyPlacement,
    pub placement_detail: Option<String>,
    pub size: String,
}

impl MockupSettings {
    pub fn effective_size(&self) -> &str {
        size_or_default(&self.size)
    }
}

#[derive(Debug, Clone)]
pub struct MockupRequest {
    pub design: ImageRef,
    pub style: TattooStyle,
    pub settings: MockupSettings,
}

/// A design kept in the session gallery, with the fields needed to regenerate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub design: ImageRef,
    pub mockup: Option<ImageRef>,
    pub subject: String,
    pub style: TattooStyle,
    pub color_scheme: ColorScheme,
    pub placement: BodyPlacement,
    pub placement_detail: Option<String>,
    pub size: String,
    pub additional_details: Option<String>,
    pub created_at: i64,
}

impl GeneratedImage {
    pub fn from_request(
        id: String,
        design: ImageRef,
        request: &GenerationRequest,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            design,
            mockup: None,
            subject: request.subject.clone(),
            style: request.style,
            color_scheme: request.color_scheme,
            placement: request.placement,
            placement_detail: request.placement_detail.clone(),
            size: request.size.clone(),
            additional_details: request.additional_details.clone(),
            created_at,
        }
    }

    /// Rebuilds the request that produced this design.
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            subject: self.subject.clone(),
            style: self.style,
            color_scheme: self.color_scheme,
            placement: self.placement,
            placement_detail: self.placement_detail.clone(),
            size: size_or_default(&self.size).to_string(),
            additional_details: self.additional_details.clone(),
        }
    }

    pub fn mockup_settings(&self) -> MockupSettings {
        MockupSettings {
            placement: self.placement,
            placement_detail: self.placement_detail.clone(),
            size: self.size.clone(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub gemini_base_url: Option<String>,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                Error::Config(format!(
                    "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => Duration::from_secs(120),
        };

        Ok(Self {
            gemini_api_key,
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").ok(),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_serialization_uses_kebab_case_ids() {
        let json = serde_json::to_string(&BodyPlacement::BehindEar).unwrap();
        assert_eq!(json, "\"behind-ear\"");

        let style: TattooStyle = serde_json::from_str("\"trash-polka\"").unwrap();
        assert_eq!(style, TattooStyle::TrashPolka);
    }

    #[test]
    fn test_form_defaults() {
        let request = GenerationRequest::new("wolf");
        assert_eq!(request.style, TattooStyle::Blackwork);
        assert_eq!(request.color_scheme, ColorScheme::BlackAndGrey);
        assert_eq!(request.placement, BodyPlacement::Forearm);
        assert_eq!(request.size, DEFAULT_SIZE);
    }

    #[test]
    fn test_validate_rejects_blank_subject() {
        let err = GenerationRequest::new("   \n").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(GenerationRequest::new("rose").validate().is_ok());
    }

    #[test]
    fn test_blank_size_falls_back_to_default() {
        let mut request = GenerationRequest::new("rose");
        request.size = "  ".to_string();
        assert_eq!(request.effective_size(), "15 cm");

        request.size = "8 cm".to_string();
        assert_eq!(request.effective_size(), "8 cm");
    }

    #[test]
    fn test_only_behind_ear_is_flagged() {
        let flagged: Vec<_> = BodyPlacement::value_variants()
            .iter()
            .filter(|p| p.is_behind_ear())
            .collect();
        assert_eq!(flagged, vec![&BodyPlacement::BehindEar]);
    }

    #[test]
    fn test_record_round_trips_to_request() {
        let mut request = GenerationRequest::new("koi \"flow\"");
        request.style = TattooStyle::Japanese;
        request.placement_detail = Some("inner side".to_string());
        request.additional_details = Some("waves".to_string());

        let record = GeneratedImage::from_request(
            "1".to_string(),
            ImageRef::new("image/png", "AAAA"),
            &request,
            1,
        );
        assert_eq!(record.to_request(), request);
    }

    #[test]
    fn test_to_request_fills_blank_size() {
        let mut request = GenerationRequest::new("moth");
        request.size = String::new();
        let record =
            GeneratedImage::from_request("1".to_string(), ImageRef::new("image/png", "AA"), &request, 1);
        assert_eq!(record.to_request().size, DEFAULT_SIZE);
    }
}
