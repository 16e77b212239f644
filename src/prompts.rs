//! Prompt construction for the design and mockup steps.
//!
//! Templates live in `data/prompts` and use `{{key}}` placeholders.

use crate::models::{non_blank, GenerationRequest, MockupSettings, TattooStyle};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DESIGN: &str = include_str!("../data/prompts/design.txt");
pub const MOCKUP: &str = include_str!("../data/prompts/mockup.txt");
pub const BEHIND_EAR_RULE: &str = include_str!("../data/prompts/behind_ear.txt");

/// Sentinel sent in place of literal text when the subject quotes nothing.
pub const NO_TEXT: &str = "NO TEXT";

/// Visual guidance used when the subject consists only of quoted text.
pub const LETTERING_FALLBACK: &str = "Calligraphic styling, artistic lettering composition";

const DEFAULT_PLACEMENT_DETAIL: &str = "Natural placement";

static QUOTED_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("quoted text pattern is valid"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A subject split into what should be drawn and what should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectParts {
    pub visual_subject: String,
    /// Quoted fragments joined by spaces, quotes kept, or [`NO_TEXT`].
    pub text_to_inscribe: String,
}

impl SubjectParts {
    pub fn has_text(&self) -> bool {
        self.text_to_inscribe != NO_TEXT
    }
}

pub fn split_subject(subject: &str) -> SubjectParts {
    let quoted: Vec<&str> = QUOTED_TEXT
        .find_iter(subject)
        .map(|m| m.as_str())
        .collect();

    let stripped = QUOTED_TEXT.replace_all(subject, "");
    let visual_subject = WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string();

    if quoted.is_empty() {
        return SubjectParts {
            visual_subject,
            text_to_inscribe: NO_TEXT.to_string(),
        };
    }

    SubjectParts {
        visual_subject: if visual_subject.is_empty() {
            LETTERING_FALLBACK.to_string()
        } else {
            visual_subject
        },
        text_to_inscribe: quoted.join(" "),
    }
}

/// Instruction for step one. No reference image accompanies it.
pub fn design_prompt(request: &GenerationRequest) -> String {
    let parts = split_subject(&request.subject);
    let additional_details = non_blank(request.additional_details.as_deref())
        .map(|details| format!("Additional details: {}\n", details))
        .unwrap_or_default();

    render(
        DESIGN,
        &[
            ("visual_subject", &parts.visual_subject),
            ("text_to_inscribe", &parts.text_to_inscribe),
            ("no_text", NO_TEXT),
            ("style", request.style.label()),
            ("color_scheme", request.color_scheme.label()),
            ("size", request.effective_size()),
            ("additional_details", &additional_details),
        ],
    )
}

/// Instruction for step two, sent alongside the design image.
pub fn mockup_prompt(style: TattooStyle, settings: &MockupSettings) -> String {
    let placement_rule = if settings.placement.is_behind_ear() {
        BEHIND_EAR_RULE
    } else {
        ""
    };

    render(
        MOCKUP,
        &[
            ("placement", settings.placement.label()),
            (
                "placement_detail",
                non_blank(settings.placement_detail.as_deref()).unwrap_or(DEFAULT_PLACEMENT_DETAIL),
            ),
            ("size", settings.effective_size()),
            ("style", style.label()),
            ("placement_rule", placement_rule),
        ],
    )
}

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass, so values that happen to contain placeholder
/// syntax are inserted verbatim. Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}
