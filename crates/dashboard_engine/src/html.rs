//! HTML shell around a [`Page`]: sidebar navigation on the left, blocks in the
//! main column, one `Plotly.newPlot` call per chart.

use askama::Template;

use crate::error::Result;
use crate::page::{Block, Page, PageKind};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// How sidebar links are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `/pages/{slug}`, served by the HTTP backend.
    Server,
    /// `{slug}.html`, sibling files of a static export.
    Static,
}

impl LinkStyle {
    pub fn href(self, kind: PageKind) -> String {
        match self {
            LinkStyle::Server => format!("/pages/{}", kind.slug()),
            LinkStyle::Static => format!("{}.html", kind.slug()),
        }
    }
}

struct NavLink {
    href: String,
    title: &'static str,
    active: bool,
}

enum BlockView<'a> {
    Title(&'a str),
    Subheader(&'a str),
    Caption(&'a str),
    Notice(&'a str),
    Divider,
    Chart(String),
}

struct ChartScript {
    id: String,
    data: String,
    layout: String,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    app_title: &'a str,
    page_title: &'a str,
    nav: Vec<NavLink>,
    blocks: Vec<BlockView<'a>>,
    charts: Vec<ChartScript>,
    plotly_cdn: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    app_title: &'a str,
    page_title: &'a str,
    nav: Vec<NavLink>,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "redirect.html")]
struct RedirectTemplate {
    href: String,
    title: &'static str,
}

pub fn render_page(app_title: &str, page: &Page, links: LinkStyle) -> Result<String> {
    let mut blocks = Vec::with_capacity(page.blocks.len());
    let mut charts = Vec::new();

    for block in &page.blocks {
        let view = match block {
            Block::Title { text } => BlockView::Title(text),
            Block::Subheader { text } => BlockView::Subheader(text),
            Block::Caption { text } => BlockView::Caption(text),
            Block::Notice { text } => BlockView::Notice(text),
            Block::Divider => BlockView::Divider,
            Block::Chart { figure } => {
                let id = format!("chart-{}", charts.len());
                charts.push(ChartScript {
                    id: id.clone(),
                    data: script_json(&figure.data)?,
                    layout: script_json(&figure.layout)?,
                });
                BlockView::Chart(id)
            }
        };
        blocks.push(view);
    }

    let template = PageTemplate {
        app_title,
        page_title: page.kind.title(),
        nav: sidebar(Some(page.kind), links),
        blocks,
        charts,
        plotly_cdn: PLOTLY_CDN,
    };
    Ok(template.render()?)
}

/// A page-shaped diagnostic, used when a page cannot be built.
pub fn render_error(
    app_title: &str,
    active: Option<PageKind>,
    heading: &str,
    message: &str,
    links: LinkStyle,
) -> Result<String> {
    let template = ErrorTemplate {
        app_title,
        page_title: heading,
        nav: sidebar(active, links),
        message,
    };
    Ok(template.render()?)
}

/// Forwards to `target`; the `index.html` of a static export.
pub fn render_redirect(target: PageKind, links: LinkStyle) -> Result<String> {
    let template = RedirectTemplate {
        href: links.href(target),
        title: target.title(),
    };
    Ok(template.render()?)
}

// Serialized JSON goes inside <script>; `</` would end the element early.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn sidebar(active: Option<PageKind>, links: LinkStyle) -> Vec<NavLink> {
    PageKind::NAVIGATION
        .into_iter()
        .map(|kind| NavLink {
            href: links.href(kind),
            title: kind.title(),
            active: Some(kind) == active,
        })
        .collect()
}
