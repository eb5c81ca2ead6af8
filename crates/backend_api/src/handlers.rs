use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use dashboard_engine::html::{render_error, render_page, LinkStyle};
use dashboard_engine::{Page, PageKind};
use serde::Serialize;

use crate::{error::ApiError, router::AppState, Result};

fn resolve(slug: String) -> Result<PageKind> {
    PageKind::from_slug(&slug).ok_or(ApiError::PageNotFound(slug))
}

async fn build(state: &AppState, kind: PageKind) -> Result<Page> {
    state.repo.page(kind, &state.settings.reporting).await
}

/// GET /
/// Sends the browser to the landing page
pub async fn index() -> Redirect {
    Redirect::to(&LinkStyle::Server.href(PageKind::landing()))
}

/// GET /pages/:slug
/// Full HTML page; a page that cannot be built is answered with a diagnostic
/// page carrying the error's status code.
pub async fn page_html(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let kind = PageKind::from_slug(&slug);
    let outcome = match resolve(slug) {
        Ok(kind) => build(&state, kind).await.and_then(|page| {
            render_page(&state.settings.app_title, &page, LinkStyle::Server).map_err(ApiError::from)
        }),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!("Serving diagnostic page: {}", e);
            let heading = kind.map(PageKind::title).unwrap_or("Page not found");
            match render_error(
                &state.settings.app_title,
                kind,
                heading,
                &e.to_string(),
                LinkStyle::Server,
            ) {
                Ok(html) => (e.status(), Html(html)).into_response(),
                Err(render_err) => {
                    tracing::error!("Diagnostic page failed to render: {}", render_err);
                    (e.status(), e.to_string()).into_response()
                }
            }
        }
    }
}

/// GET /api/pages/:slug
/// Page blocks with their Plotly figures
pub async fn page_json(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Page>> {
    let kind = resolve(slug)?;
    Ok(Json(build(&state, kind).await?))
}

#[derive(Debug, Serialize)]
pub struct NavigationEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct Navigation {
    pub app_title: String,
    pub pages: Vec<NavigationEntry>,
}

/// GET /api/pages
/// Sidebar entries in display order; the first one is the landing page
pub async fn navigation(State(state): State<AppState>) -> Json<Navigation> {
    let pages = PageKind::NAVIGATION
        .into_iter()
        .map(|kind| NavigationEntry {
            slug: kind.slug(),
            title: kind.title(),
            href: LinkStyle::Server.href(kind),
        })
        .collect();

    Json(Navigation {
        app_title: state.settings.app_title.clone(),
        pages,
    })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "lti-dashboard"
    }))
}
