//! Data documents the page is rendered from.
//!
//! Both documents are read-only snapshots for one render. Decoding is lenient
//! at the field level: a missing field, a `null`, or a value of the wrong kind
//! leaves the field empty instead of rejecting the whole document.
//!
//! | Document             | Type               | Default                     |
//! |----------------------|--------------------|-----------------------------|
//! | `data/config.json`   | [`SiteConfig`]     | [`defaults::site_config`]   |
//! | `data/projects.json` | `Vec<`[`Project`]`>` | [`defaults::projects`]    |

pub mod defaults;
mod lenient;

use serde::{Deserialize, Serialize};

/// Site profile: identity, free text, and the repeated sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub twitter: String,
    #[serde(deserialize_with = "lenient::string")]
    pub resume_url: String,

    #[serde(deserialize_with = "lenient::string")]
    pub hero_tagline: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hero_subtitle: String,
    #[serde(deserialize_with = "lenient::string")]
    pub about_text: String,
    #[serde(deserialize_with = "lenient::string")]
    pub contact_text: String,

    #[serde(deserialize_with = "lenient::strings")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::list")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub socials: Vec<SocialLink>,
}

/// One education timeline entry; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub school: String,
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub focus: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub highlights: Vec<String>,
}

/// One experience card; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub highlights: Vec<String>,
}

/// A credential with optional identifier, skill tag and link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub org: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issued: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub skills: String,
    #[serde(deserialize_with = "lenient::string")]
    pub link: String,
}

/// External profile link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "lenient::string")]
    pub label: String,
    #[serde(deserialize_with = "lenient::string")]
    pub href: String,
}

/// One entry of the project list.
///
/// `featured` is carried for document compatibility; nothing reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub tech: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: String,
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
    #[serde(deserialize_with = "lenient::string")]
    pub demo: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::number")]
    pub stars: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub featured: bool,
}

impl Project {
    /// Text the free-text query is matched against, lowercased.
    ///
    /// Title, description, tags and tech labels joined by single spaces.
    pub fn haystack(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2 + self.tags.len() + self.tech.len());
        parts.push(&self.title);
        parts.push(&self.description);
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.tech.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }

    /// Whether the project carries exactly this tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
