//! `folio list`: print the projects the page would show.

use crate::{
    build::load_data,
    cli::Cli,
    config::FolioConfig,
    model::Project,
    pipeline::{self, ALL_TAGS_LABEL, SortMode},
};
use anyhow::Result;
use colored::Colorize;

/// Print visible projects (and optionally the tag universe) for the CLI controls.
pub fn list_projects(config: &'static FolioConfig, cli: &'static Cli) -> Result<()> {
    let data = load_data(config);
    let filter = cli.filter();
    let sort = SortMode::parse(&filter.sort);

    let visible = pipeline::visible_projects(&data.projects, &filter.query, &filter.tag, sort);
    for project in &visible {
        println!("{}", format_project(project).bold());
        if let Some(detail) = format_detail(project) {
            println!("    {}", detail.dimmed());
        }
    }
    println!(
        "{} of {} projects, sorted by {}",
        visible.len(),
        data.projects.len(),
        sort.as_str()
    );

    if wants_tags(cli) {
        let tags = pipeline::tag_universe(&data.projects);
        println!("{}", format_tags(&tags).cyan());
    }
    Ok(())
}

fn wants_tags(cli: &Cli) -> bool {
    matches!(cli.command, crate::cli::Commands::List { tags: true, .. })
}

/// `Title [tag, tag]`, or the bare title without tags.
fn format_project(project: &Project) -> String {
    if project.tags.is_empty() {
        project.title.clone()
    } else {
        format!("{} [{}]", project.title, project.tags.join(", "))
    }
}

/// Date and rating line, when either is known.
fn format_detail(project: &Project) -> Option<String> {
    let date = project.date.as_deref().filter(|d| !d.is_empty());
    let stars = project.stars.filter(|s| s.is_finite());
    match (date, stars) {
        (None, None) => None,
        (Some(date), None) => Some(date.to_owned()),
        (None, Some(stars)) => Some(format!("{stars}★")),
        (Some(date), Some(stars)) => Some(format!("{date} · {stars}★")),
    }
}

/// Tag filter options as the page lists them.
fn format_tags(tags: &[&str]) -> String {
    std::iter::once(ALL_TAGS_LABEL)
        .chain(tags.iter().copied())
        .collect::<Vec<_>>()
        .join(" | ")
}
