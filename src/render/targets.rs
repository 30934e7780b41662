//! Named insertion points, bound once from the page skeleton by element id.
//!
//! Missing required ids fail the bind; optional ids bind to `None` and the
//! renderers skip them.

use super::RenderError;
use crate::dom::{Document, NodeId};

fn required(doc: &Document, id: &'static str) -> Result<NodeId, RenderError> {
    doc.get_element_by_id(id).ok_or(RenderError::MissingTarget(id))
}

fn optional(doc: &Document, id: &str) -> Option<NodeId> {
    doc.get_element_by_id(id)
}

/// Profile fields and repeated profile sections.
#[derive(Debug, Clone, Copy)]
pub struct ConfigTargets {
    pub brand_name: NodeId,
    pub hero_title: NodeId,
    pub hero_subtitle: NodeId,
    pub resume_link: NodeId,
    pub resume_button: Option<NodeId>,
    pub linkedin_link: NodeId,
    pub github_link: Option<NodeId>,
    pub email_link: NodeId,
    pub location_text: NodeId,
    pub phone_row: Option<NodeId>,
    pub phone_link: Option<NodeId>,
    pub footer_name: NodeId,
    pub year: NodeId,
    pub about_text: NodeId,
    pub contact_text: Option<NodeId>,
    pub socials: NodeId,
    pub highlights: NodeId,
    pub education: Option<NodeId>,
    pub education_list: Option<NodeId>,
    pub experience: Option<NodeId>,
    pub experience_row: Option<NodeId>,
    pub certifications: Option<NodeId>,
    pub cert_list: Option<NodeId>,
    pub skills_list: NodeId,
}

impl ConfigTargets {
    pub fn bind(doc: &Document) -> Result<Self, RenderError> {
        Ok(Self {
            brand_name: required(doc, "brandName")?,
            hero_title: required(doc, "heroTitle")?,
            hero_subtitle: required(doc, "heroSubtitle")?,
            resume_link: required(doc, "resumeLink")?,
            resume_button: optional(doc, "resumeButton"),
            linkedin_link: required(doc, "linkedinLink")?,
            github_link: optional(doc, "githubLink"),
            email_link: required(doc, "emailLink")?,
            location_text: required(doc, "locationText")?,
            phone_row: optional(doc, "phoneRow"),
            phone_link: optional(doc, "phoneLink"),
            footer_name: required(doc, "footerName")?,
            year: required(doc, "year")?,
            about_text: required(doc, "aboutText")?,
            contact_text: optional(doc, "contactText"),
            socials: required(doc, "socials")?,
            highlights: required(doc, "highlights")?,
            education: optional(doc, "education"),
            education_list: optional(doc, "educationList"),
            experience: optional(doc, "experience"),
            experience_row: optional(doc, "experienceRow"),
            certifications: optional(doc, "certifications"),
            cert_list: optional(doc, "certList"),
            skills_list: required(doc, "skillsList")?,
        })
    }
}

/// The three list controls.
#[derive(Debug, Clone, Copy)]
pub struct FilterTargets {
    pub search_input: NodeId,
    pub tag_filter: NodeId,
    pub sort_select: NodeId,
}

impl FilterTargets {
    pub fn bind(doc: &Document) -> Result<Self, RenderError> {
        Ok(Self {
            search_input: required(doc, "searchInput")?,
            tag_filter: required(doc, "tagFilter")?,
            sort_select: required(doc, "sortSelect")?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridTargets {
    pub grid: NodeId,
}

impl GridTargets {
    pub fn bind(doc: &Document) -> Result<Self, RenderError> {
        Ok(Self {
            grid: required(doc, "projectsGrid")?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ModalTargets {
    pub modal: NodeId,
    pub body: NodeId,
}

impl ModalTargets {
    pub fn bind(doc: &Document) -> Result<Self, RenderError> {
        Ok(Self {
            modal: required(doc, "projectModal")?,
            body: required(doc, "modalBody")?,
        })
    }
}

/// Page chrome wired to behavior, all optional.
#[derive(Debug, Clone, Copy)]
pub struct ChromeTargets {
    pub theme_toggle: Option<NodeId>,
    pub nav_toggle: Option<NodeId>,
    pub nav: Option<NodeId>,
}

impl ChromeTargets {
    pub fn bind(doc: &Document) -> Self {
        Self {
            theme_toggle: optional(doc, "themeToggle"),
            nav_toggle: optional(doc, "navToggle"),
            nav: doc.query(".site-nav"),
        }
    }
}

/// Every handle set of the page.
#[derive(Debug, Clone, Copy)]
pub struct Targets {
    pub config: ConfigTargets,
    pub filters: FilterTargets,
    pub grid: GridTargets,
    pub modal: ModalTargets,
    pub chrome: ChromeTargets,
}

impl Targets {
    pub fn bind(doc: &Document) -> Result<Self, RenderError> {
        Ok(Self {
            config: ConfigTargets::bind(doc)?,
            filters: FilterTargets::bind(doc)?,
            grid: GridTargets::bind(doc)?,
            modal: ModalTargets::bind(doc)?,
            chrome: ChromeTargets::bind(doc),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dom::parse_html, page::DEFAULT_SKELETON};

    #[test]
    fn test_default_skeleton_binds_everything() {
        let doc = parse_html(DEFAULT_SKELETON.as_bytes()).unwrap();
        let targets = Targets::bind(&doc).unwrap();

        assert!(targets.config.resume_button.is_some());
        assert!(targets.config.phone_row.is_some());
        assert!(targets.config.education_list.is_some());
        assert!(targets.config.cert_list.is_some());
        assert!(targets.chrome.nav.is_some());
        assert!(targets.chrome.theme_toggle.is_some());
    }

    #[test]
    fn test_missing_required_target() {
        let doc = parse_html(b"<html><body><div id=\"projectsGrid\"></div></body></html>").unwrap();
        assert!(matches!(
            ConfigTargets::bind(&doc),
            Err(RenderError::MissingTarget("brandName"))
        ));
        assert!(GridTargets::bind(&doc).is_ok());
        assert!(matches!(
            ModalTargets::bind(&doc),
            Err(RenderError::MissingTarget("projectModal"))
        ));
    }

    #[test]
    fn test_optional_targets_absent() {
        let doc = parse_html(b"<html><body></body></html>").unwrap();
        let chrome = ChromeTargets::bind(&doc);
        assert!(chrome.theme_toggle.is_none());
        assert!(chrome.nav_toggle.is_none());
        assert!(chrome.nav.is_none());
    }
}
