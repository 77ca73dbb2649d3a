/**
 * Section Renderer Dispatch
 * Maps a section's type to its content-shape convention. Shape validation
 * is advisory: decoding applies render-time defaults and ignores unknown
 * fields, never failing a render over a malformed payload.
 */
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::models::Section;

/// Closed set of section types. Anything the store holds outside this set
/// dispatches as `Custom`, keeping the data model permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Contact,
    Custom,
}

impl SectionKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "hero" => SectionKind::Hero,
            "about" => SectionKind::About,
            "projects" => SectionKind::Projects,
            "contact" => SectionKind::Contact,
            _ => SectionKind::Custom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Projects => "projects",
            SectionKind::Contact => "contact",
            SectionKind::Custom => "custom",
        }
    }

    /// Fallback heading when a section has no stored title.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionKind::Hero => "Welcome to My Portfolio",
            SectionKind::About => "About Me",
            SectionKind::Projects => "My Projects",
            SectionKind::Contact => "Get In Touch",
            SectionKind::Custom => "",
        }
    }
}

// Field names match the payloads the admin editor stores (camelCase).

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub subtitle: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub secondary_button_text: String,
    pub secondary_button_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AboutContent {
    pub description: String,
    pub image: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectsContent {
    pub description: String,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub github: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactContent {
    pub description: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub social: SocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
}

/// Type-resolved view of a section's content, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    Hero(HeroContent),
    About(AboutContent),
    Projects(ProjectsContent),
    Contact(ContactContent),
    Custom(Map<String, Value>),
}

/// Decode with defaults; a payload that does not fit the shape at all
/// renders as the empty shape rather than erroring.
fn decode<T: for<'de> Deserialize<'de> + Default>(content: &Value) -> T {
    serde_json::from_value(content.clone()).unwrap_or_default()
}

/// Resolve a section's content into its typed view.
pub fn content_view(section: &Section) -> ContentView {
    match SectionKind::parse(&section.kind) {
        SectionKind::Hero => ContentView::Hero(decode(&section.content)),
        SectionKind::About => ContentView::About(decode(&section.content)),
        SectionKind::Projects => ContentView::Projects(decode(&section.content)),
        SectionKind::Contact => ContentView::Contact(decode(&section.content)),
        SectionKind::Custom => ContentView::Custom(
            section
                .content
                .as_object()
                .cloned()
                .unwrap_or_default(),
        ),
    }
}

/// Display heading: the stored title, or the type fallback when empty.
pub fn display_title(section: &Section) -> String {
    if section.title.is_empty() {
        SectionKind::parse(&section.kind).default_title().to_string()
    } else {
        section.title.clone()
    }
}
