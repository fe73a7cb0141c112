//! HTTP server: feeds, sitemap, post pages and JSON listings

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{MarkdownRenderer, Post, ReadingStatus};
use crate::feed::{ATOM_CONTENT_TYPE, RSS_CONTENT_TYPE, SITEMAP_CONTENT_TYPE};
use crate::helpers::{feed_tag, full_date, html_escape, url_for};
use crate::Site;

/// Feeds change at most a few times a day
const FEED_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Any failure while loading content; reported as a bare 500
#[derive(Debug)]
struct ServerError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ServerError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

type HandlerResult<T = Response> = std::result::Result<T, ServerError>;

/// Routes over a shared site; unmatched paths fall through to `public_dir`
pub fn router(site: Arc<Site>) -> Router {
    let public = ServeDir::new(&site.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/rss.xml", get(rss))
        .route("/atom.xml", get(atom))
        .route("/sitemap.xml", get(sitemap))
        .route("/blog/:slug", get(blog_post))
        .route("/api/posts", get(api_posts))
        .route("/api/reading", get(api_reading))
        .route("/api/til", get(api_til))
        .fallback_service(public)
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

/// Serve `site` until the process is stopped
pub async fn start(site: Site, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    if site.config.mode.is_development() {
        tracing::info!("Development mode: content is re-read on every request");
    }

    let app = router(Arc::new(site));

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn xml(content_type: &'static str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        body,
    )
        .into_response()
}

async fn rss(State(site): State<Arc<Site>>) -> HandlerResult {
    Ok(xml(RSS_CONTENT_TYPE, site.rss().await?))
}

async fn atom(State(site): State<Arc<Site>>) -> HandlerResult {
    Ok(xml(ATOM_CONTENT_TYPE, site.atom().await?))
}

async fn sitemap(State(site): State<Arc<Site>>) -> HandlerResult {
    Ok(xml(SITEMAP_CONTENT_TYPE, site.sitemap().await?))
}

async fn blog_post(State(site): State<Arc<Site>>, Path(slug): Path<String>) -> HandlerResult {
    match site.store.post(&slug).await? {
        Some(post) => Ok(Html(render_post(&site, &post)).into_response()),
        None => {
            tracing::debug!("No post {:?}", slug);
            Ok((StatusCode::NOT_FOUND, Html(not_found_page(&site))).into_response())
        }
    }
}

fn render_post(site: &Site, post: &Post) -> String {
    let meta = &post.meta;
    let body = MarkdownRenderer::with_options(true).render(&post.content);
    let rss_href = url_for(&site.config, &site.config.feed.rss_path);
    let atom_href = url_for(&site.config, &site.config.feed.atom_path);

    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | {}</title>\n",
        html_escape(&site.config.language),
        html_escape(&meta.title),
        html_escape(&site.config.title),
    ));
    html.push_str(&feed_tag(&rss_href, &site.config.title, "application/rss+xml"));
    html.push('\n');
    html.push_str(&feed_tag(&atom_href, &site.config.title, "application/atom+xml"));
    html.push('\n');
    html.push_str("</head>\n<body>\n<article>\n<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&meta.title)));
    if let Some(subtitle) = &meta.subtitle {
        html.push_str(&format!(
            "<p class=\"subtitle\">{}</p>\n",
            html_escape(subtitle)
        ));
    }
    html.push_str(&format!(
        "<p class=\"meta\"><time datetime=\"{}\">{}</time>",
        html_escape(&meta.date),
        html_escape(&full_date(&meta.date)),
    ));
    if let Some(minutes) = meta.reading_time {
        html.push_str(&format!(" &middot; {} min read", minutes));
    }
    html.push_str("</p>\n");
    if !meta.tags.is_empty() {
        html.push_str("<ul class=\"tags\">");
        for tag in &meta.tags {
            html.push_str(&format!("<li>{}</li>", html_escape(tag)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</header>\n");
    html.push_str(&body);
    html.push_str("</article>\n</body>\n</html>\n");
    html
}

fn not_found_page(site: &Site) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Not found | {}</title></head>\n<body><h1>Post not found</h1><p><a href=\"{}\">All posts</a></p></body>\n</html>\n",
        html_escape(&site.config.title),
        html_escape(&url_for(&site.config, &site.config.blog_dir)),
    )
}

#[derive(Debug, Default, Deserialize)]
struct TagFilter {
    tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct StatusFilter {
    status: Option<ReadingStatus>,
}

async fn api_posts(
    State(site): State<Arc<Site>>,
    Query(filter): Query<TagFilter>,
) -> HandlerResult<impl IntoResponse> {
    let posts = match filter.tag {
        Some(tag) => site.store.posts_by_tag(&tag).await?,
        None => site.store.post_metadata().await?.to_vec(),
    };
    Ok(Json(posts))
}

async fn api_reading(
    State(site): State<Arc<Site>>,
    Query(filter): Query<StatusFilter>,
) -> HandlerResult<impl IntoResponse> {
    let items = match filter.status {
        Some(status) => site.store.reading_by_status(status).await?,
        None => site.store.reading_list().await?.to_vec(),
    };
    Ok(Json(items))
}

async fn api_til(
    State(site): State<Arc<Site>>,
    Query(filter): Query<TagFilter>,
) -> HandlerResult<impl IntoResponse> {
    let entries = match filter.tag {
        Some(tag) => site.store.til_by_tag(&tag).await?,
        None => site.store.til_entries().await?.to_vec(),
    };
    Ok(Json(entries))
}
