//! Read-only reference catalog describing each tattoo style.

use crate::models::TattooStyle;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StyleDefinition {
    pub style: TattooStyle,
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
}

static CATALOG: [StyleDefinition; 13] = [
    StyleDefinition {
        style: TattooStyle::Realism,
        name: "Realism / Photorealism",
        description: "Art that looks like a photograph. Relies on high contrast and intricate shading to create depth and a three-dimensional feel.",
        traits: &["No hard outlines", "Smooth shading", "High contrast", "3D effect"],
    },
    StyleDefinition {
        style: TattooStyle::OldSchool,
        name: "Old School (Traditional)",
        description: "The classic Western style. Known for iconic imagery such as anchors, roses, eagles and swallows, and for exceptional longevity.",
        traits: &[
            "Bold black outlines",
            "Limited palette (red, green, yellow)",
            "Flat 2D look",
            "Iconic symbolism",
        ],
    },
    StyleDefinition {
        style: TattooStyle::NeoTraditional,
        name: "Neo-Traditional",
        description: "An evolution of Old School. Keeps the bold lines but adds more detail, depth and a wider, more vivid palette.",
        traits: &[
            "Varied line weight",
            "Wider color palette",
            "Art Nouveau influences",
            "Decorative elements",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Watercolor,
        name: "Watercolor",
        description: "Imitates watercolor painting on canvas. Often drops outlines entirely and uses washes of color for a soft, artistic effect.",
        traits: &[
            "No outlines",
            "Paint splashes and drips",
            "Soft tonal transitions",
            "Pastel and vivid colors",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Blackwork,
        name: "Blackwork",
        description: "Tattoos made exclusively with black ink. Emphasizes shape, pattern and negative space rather than shading.",
        traits: &[
            "High contrast",
            "Solid black fills",
            "Use of negative space",
            "Bold patterns",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Minimalist,
        name: "Minimalist / Fine Line",
        description: "Focused on simplicity. Designs are reduced to their most basic elements using very thin, delicate lines.",
        traits: &[
            "Single-needle lines",
            "Simple shapes",
            "Small scale",
            "Plenty of breathing room",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Geometric,
        name: "Geometric",
        description: "Uses geometric shapes and lines to build complex, often symmetrical patterns. Can be spiritual (sacred geometry) or abstract.",
        traits: &[
            "Perfect symmetry",
            "Straight lines",
            "Figures (circles, triangles)",
            "Mathematical precision",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Japanese,
        name: "Japanese (Irezumi)",
        description: "A traditional style dating back to the Edo period. Follows strict rules about imagery, flow and backgrounds such as wind and waves.",
        traits: &[
            "Flowing composition fitted to the body",
            "Mythical beasts (dragons, koi)",
            "Backgrounds (wind, water)",
            "Bold colors",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Dotwork,
        name: "Dotwork",
        description: "Images built entirely or mostly from individual dots. Shading comes from dot density (stippling).",
        traits: &[
            "Stippled texture",
            "Mandalas",
            "Soft shading effects",
            "Intricate detail",
        ],
    },
    StyleDefinition {
        style: TattooStyle::TrashPolka,
        name: "Trash Polka",
        description: "A collage-like style from Germany. Mixes realistic imagery with abstract chaos, in black and red only.",
        traits: &[
            "Black and red only",
            "Collage aesthetic",
            "Smears and chaotic lines",
            "Typography / text",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Biomechanical,
        name: "Biomechanical",
        description: "Designed to look like torn skin revealing robotic or alien machinery underneath.",
        traits: &[
            "Torn-skin effect",
            "Gears and pistons",
            "3D depth",
            "Metallic textures",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Sketch,
        name: "Sketch / Illustrative",
        description: "Imitates a raw sketch from an artist's notebook, complete with construction lines and loose, artistic strokes.",
        traits: &[
            "Raw pencil lines",
            "Unfinished look",
            "Artistic freedom",
            "Hatching",
        ],
    },
    StyleDefinition {
        style: TattooStyle::Tribal,
        name: "Tribal",
        description: "Rooted in indigenous heritage (Polynesian, Maori and others). Uses thick, solid black lines that follow the anatomy of the muscles.",
        traits: &[
            "Solid black",
            "Flowing curves",
            "Cultural meaning",
            "Abstract patterns",
        ],
    },
];

pub fn catalog() -> &'static [StyleDefinition] {
    &CATALOG
}

pub fn find(style: TattooStyle) -> Option<&'static StyleDefinition> {
    CATALOG.iter().find(|definition| definition.style == style)
}
