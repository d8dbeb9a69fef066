//! HTML pages, the login form stub and static files
//!
//! Pages are a page body dropped into the shared layout at its
//! `{{ content }}` placeholder.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::{Form, State},
    http::{Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::server::AppState;
use crate::server::error::AppError;

/// Placeholder in the layout replaced by the page body
pub const CONTENT_PLACEHOLDER: &str = "{{ content }}";

const LAYOUT_FILE: &str = "layout.html";

/// Login form fields
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// Submitted email
    #[serde(default)]
    pub email: String,
    /// Submitted password
    #[serde(default)]
    pub password: String,
}

/// Render `page` inside the layout, both read from `views_dir`
pub async fn render_page(views_dir: &Path, page: &str) -> std::io::Result<String> {
    let layout = tokio::fs::read_to_string(views_dir.join(LAYOUT_FILE)).await?;
    let body = tokio::fs::read_to_string(views_dir.join(page)).await?;
    Ok(layout.replacen(CONTENT_PLACEHOLDER, &body, 1))
}

async fn page(state: &AppState, name: &str) -> Result<Html<String>, AppError> {
    render_page(&state.config.views_dir, name)
        .await
        .map(Html)
        .map_err(|e| AppError::NotFound(format!("{}: {}", name, e)))
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(&state, "index.html").await
}

/// GET /login
pub async fn login(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(&state, "login.html").await
}

/// POST /submit
///
/// Logs the submission and sends the browser back to the home page. There is
/// no account store behind it.
#[instrument(skip_all)]
pub async fn submit_login(Form(form): Form<LoginForm>) -> Redirect {
    info!(
        email = %form.email,
        password_provided = !form.password.is_empty(),
        "Received form submission"
    );
    Redirect::permanent("/")
}

/// Fallback: serve a file from the public directory
pub async fn static_file(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let path = uri.path();
    let Some(file) = resolve_static_path(&state.config.public_dir, path) else {
        debug!("Rejected static path {}", path);
        return Err(AppError::NotFound(path.to_string()));
    };

    match tokio::fs::read(&file).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response()),
        Err(_) => Err(AppError::NotFound(path.to_string())),
    }
}

/// Map a request path onto a file below `public_dir`
///
/// The path is percent-decoded first and must then consist of plain
/// segments only, so nothing outside `public_dir` can be reached.
pub fn resolve_static_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(public_dir.join(relative))
}

fn content_type(file: &Path) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
