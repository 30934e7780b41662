//! Site profile projection.

use super::{ConfigTargets, append_text_if, external_link, list_items};
use crate::{
    dom::{Document, NodeId},
    model::{CertificationEntry, EducationEntry, ExperienceEntry, SiteConfig},
};

/// Render the profile into its targets.
///
/// Idempotent: every list container is cleared before it is filled. `year`
/// is passed in so the projection does not read the clock.
pub fn render_config(doc: &mut Document, targets: &ConfigTargets, config: &SiteConfig, year: i32) {
    render_scalars(doc, targets, config, year);
    render_phone(doc, targets, &config.phone);

    doc.clear_children(targets.socials);
    for social in &config.socials {
        let link = external_link(doc, &social.href, &social.label, None);
        let li = doc.create_element("li");
        doc.append(li, link);
        doc.append(targets.socials, li);
    }

    doc.clear_children(targets.highlights);
    list_items(doc, targets.highlights, config.highlights.iter().map(String::as_str));

    render_section(doc, targets.education, targets.education_list, &config.education, education_item);
    render_section(doc, targets.experience, targets.experience_row, &config.experience, experience_card);
    render_section(doc, targets.certifications, targets.cert_list, &config.certifications, cert_card);

    doc.clear_children(targets.skills_list);
    list_items(doc, targets.skills_list, config.skills.iter().map(String::as_str));
}

fn render_scalars(doc: &mut Document, targets: &ConfigTargets, config: &SiteConfig, year: i32) {
    let resume = or_anchor(&config.resume_url);

    doc.set_text(targets.brand_name, &config.name);
    let hero = if config.hero_tagline.is_empty() {
        &config.role
    } else {
        &config.hero_tagline
    };
    doc.set_text(targets.hero_title, hero);
    doc.set_text(targets.hero_subtitle, &config.hero_subtitle);

    doc.set_attr(targets.resume_link, "href", resume);
    if let Some(button) = targets.resume_button {
        doc.set_attr(button, "href", resume);
        if resume == "#" {
            doc.remove_attr(button, "target");
        } else {
            doc.set_attr(button, "target", "_blank");
        }
    }

    doc.set_attr(targets.linkedin_link, "href", or_anchor(&config.linkedin));
    if let Some(github) = targets.github_link {
        doc.set_attr(github, "href", or_anchor(&config.github));
    }
    let mailto = if config.email.is_empty() {
        "#".to_owned()
    } else {
        format!("mailto:{}", config.email)
    };
    doc.set_attr(targets.email_link, "href", &mailto);

    doc.set_text(targets.location_text, &config.location);
    doc.set_text(targets.footer_name, &config.name);
    doc.set_text(targets.year, &year.to_string());
    doc.set_text(targets.about_text, &config.about_text);
    if let Some(contact) = targets.contact_text {
        doc.set_text(contact, &config.contact_text);
    }
}

fn render_phone(doc: &mut Document, targets: &ConfigTargets, phone: &str) {
    let (Some(row), Some(link)) = (targets.phone_row, targets.phone_link) else {
        return;
    };
    if phone.is_empty() {
        doc.set_display(row, false);
    } else {
        doc.set_text(link, phone);
        doc.set_attr(link, "href", &format!("tel:{}", normalize_phone(phone)));
        doc.set_display(row, true);
    }
}

/// Digits only, keeping a leading `+`.
///
/// `"+1 (555) 010-2030"` becomes `"+15550102030"`.
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.trim_start();
    let mut out = String::with_capacity(phone.len());
    if phone.starts_with('+') {
        out.push('+');
    }
    out.extend(phone.chars().filter(char::is_ascii_digit));
    out
}

fn or_anchor(url: &str) -> &str {
    if url.is_empty() { "#" } else { url }
}

/// Fill a section's container and hide the section when there is nothing.
///
/// Without a container nothing is touched.
fn render_section<T>(
    doc: &mut Document,
    section: Option<NodeId>,
    container: Option<NodeId>,
    entries: &[T],
    item: fn(&mut Document, &T) -> NodeId,
) {
    let Some(container) = container else {
        return;
    };
    doc.clear_children(container);
    for entry in entries {
        let node = item(doc, entry);
        doc.append(container, node);
    }
    if let Some(section) = section {
        doc.set_display(section, !entries.is_empty());
    }
}

/// `header` (first two parts) + `meta` (last two parts), shared by the
/// education and experience layouts.
fn header_and_meta(
    doc: &mut Document,
    item: NodeId,
    prefix: &str,
    header: [(&str, &str); 2],
    meta: [(&str, &str); 2],
) {
    let header_class = format!("{prefix}-header");
    let header_node = doc.el("div", &[("class", header_class.as_str())]);
    for (class, text) in header {
        append_text_if(doc, header_node, "span", &format!("{prefix}-{class}"), text);
    }
    let meta_class = format!("{prefix}-meta");
    let meta_node = doc.el("div", &[("class", meta_class.as_str())]);
    for (class, text) in meta {
        append_text_if(doc, meta_node, "span", &format!("{prefix}-{class}"), text);
    }
    doc.append_all(item, [header_node, meta_node]);
}

fn highlights_list(doc: &mut Document, item: NodeId, class: &str, highlights: &[String]) {
    if highlights.is_empty() {
        return;
    }
    let list = doc.el("ul", &[("class", class)]);
    list_items(doc, list, highlights.iter().map(String::as_str));
    doc.append(item, list);
}

fn education_item(doc: &mut Document, ed: &EducationEntry) -> NodeId {
    let item = doc.el("article", &[("class", "timeline-item")]);
    header_and_meta(
        doc,
        item,
        "timeline",
        [("degree", ed.degree.as_str()), ("duration", ed.duration.as_str())],
        [("school", ed.school.as_str()), ("location", ed.location.as_str())],
    );
    append_text_if(doc, item, "p", "timeline-focus", &ed.focus);
    highlights_list(doc, item, "timeline-highlights", &ed.highlights);
    item
}

fn experience_card(doc: &mut Document, exp: &ExperienceEntry) -> NodeId {
    let card = doc.el("article", &[("class", "experience-card")]);
    header_and_meta(
        doc,
        card,
        "experience",
        [("role", exp.role.as_str()), ("duration", exp.duration.as_str())],
        [("company", exp.company.as_str()), ("location", exp.location.as_str())],
    );
    append_text_if(doc, card, "p", "experience-summary", &exp.summary);
    highlights_list(doc, card, "experience-highlights", &exp.highlights);
    card
}

fn cert_card(doc: &mut Document, cert: &CertificationEntry) -> NodeId {
    let card = doc.el("article", &[("class", "cert-card")]);

    let header = doc.el("div", &[("class", "cert-header")]);
    let title = doc.el_text("span", &[("class", "cert-title")], &cert.title);
    doc.append(header, title);
    append_text_if(doc, header, "span", "cert-issued", &cert.issued);

    let meta = doc.el("div", &[("class", "cert-meta")]);
    append_text_if(doc, meta, "span", "cert-org", &cert.org);
    if !cert.id.is_empty() {
        append_text_if(doc, meta, "span", "cert-id", &format!("ID {}", cert.id));
    }
    append_text_if(doc, meta, "span", "cert-skill", &cert.skills);

    doc.append_all(card, [header, meta]);
    if !cert.link.is_empty() {
        let link = external_link(doc, &cert.link, "View credential", Some("cert-link"));
        doc.append(card, link);
    }
    card
}
