//! Server-rendered front end: a search page over the catalog and a detail
//! page per volume. Pages are plain HTML assembled server-side; the only
//! script is the cover-image fallback handler.

use anyhow::Context as _;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::catalog::{CatalogClient, CatalogError, DEFAULT_MAX_RESULTS, ErrorKind};
use crate::cli::ServeArgs;
use crate::config::CatalogConfig;
use crate::volume::Volume;

const PLACEHOLDER_COVER_PATH: &str = "/placeholder-cover.svg";

const CONFIGURATION_ERROR_TEXT: &str =
    "The application is not configured correctly. Please contact the administrator. (Missing API Key)";

#[derive(Clone)]
struct AppState {
    client: CatalogClient,
}

/// Run the web front end until ctrl-c.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = CatalogConfig::from_env();
    let client = CatalogClient::new(config)?;

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read bound address")?;
    tracing::info!(addr = %local_addr, "serving bookfinder");

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "install ctrl-c handler");
    }
}

fn router(client: CatalogClient) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/book/:id", get(detail_page))
        .route(PLACEHOLDER_COVER_PATH, get(placeholder_cover))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { client })
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = params.q.trim().to_string();

    let mut body = String::new();
    body.push_str("<h1>Book Finder</h1>\n");
    body.push_str(&render_search_form(&query));

    if query.is_empty() {
        body.push_str("<p class=\"muted\">Enter a search term above to find books.</p>\n");
        return Html(page_shell("Book Finder", &body));
    }

    match state.client.search(&query, DEFAULT_MAX_RESULTS).await {
        Ok(results) => {
            if results.total_items == 0 || results.items.is_empty() {
                body.push_str(&format!(
                    "<p class=\"muted\">No results found for \u{201c}{}\u{201d}. Try a different search term.</p>\n",
                    html_escape(&query)
                ));
            } else {
                body.push_str(&format!(
                    "<p class=\"muted\">Showing {} of {} results for \u{201c}{}\u{201d}</p>\n",
                    results.items.len(),
                    results.total_items,
                    html_escape(&query)
                ));
                body.push_str("<div class=\"grid\">\n");
                for volume in &results.items {
                    body.push_str(&render_book_card(volume));
                }
                body.push_str("</div>\n");
            }
        }
        Err(err) => {
            tracing::error!(%err, query, "search page fetch failed");
            body.push_str(&render_error_banner(&search_error_text(&err)));
        }
    }

    Html(page_shell("Book Finder", &body))
}

async fn detail_page(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    let mut body = String::new();
    body.push_str("<p><a href=\"/\">&larr; Back to Search</a></p>\n");

    match state.client.volume(&id).await {
        Ok(volume) => {
            let title = volume.volume_info.title.clone();
            body.push_str(&render_detail(&volume));
            return Html(page_shell(&title, &body));
        }
        Err(err) => {
            tracing::error!(%err, id, "detail page fetch failed");
            body.push_str(&render_error_banner(&detail_error_text(&err, &id)));
        }
    }

    Html(page_shell("Book Details", &body))
}

/// Tiny neutral cover stand-in so result cards render without external
/// assets when the catalog has no image for a volume.
async fn placeholder_cover() -> impl IntoResponse {
    const SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"128\" height=\"192\" viewBox=\"0 0 128 192\">\
<rect width=\"128\" height=\"192\" fill=\"#e5e7eb\"/>\
<path d=\"M34 56h60v4H34zm0 16h60v4H34zm0 16h44v4H34z\" fill=\"#9ca3af\"/>\
<text x=\"64\" y=\"150\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"12\" fill=\"#6b7280\">No cover</text>\
</svg>";
    ([(header::CONTENT_TYPE, "image/svg+xml")], SVG)
}

fn search_error_text(err: &CatalogError) -> String {
    match err {
        CatalogError::MissingApiKey => CONFIGURATION_ERROR_TEXT.to_string(),
        CatalogError::Upstream { message, .. } => {
            format!("Could not retrieve book data. {message}")
        }
        other => other.to_string(),
    }
}

fn detail_error_text(err: &CatalogError, id: &str) -> String {
    match err.kind() {
        ErrorKind::Configuration => CONFIGURATION_ERROR_TEXT.to_string(),
        ErrorKind::NotFound | ErrorKind::InvalidArgument => {
            format!("Book with ID \"{id}\" could not be found.")
        }
        ErrorKind::Upstream => match err {
            CatalogError::Upstream { message, .. } => {
                format!("Could not retrieve book data. {message}")
            }
            other => other.to_string(),
        },
        ErrorKind::Transport => err.to_string(),
    }
}

fn render_search_form(query: &str) -> String {
    format!(
        "<form method=\"get\" action=\"/\" class=\"search\">\n\
  <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Enter your search keywords...\" aria-label=\"Search for books\" />\n\
  <button type=\"submit\">Search</button>\n\
</form>\n",
        html_escape(query)
    )
}

fn render_book_card(volume: &Volume) -> String {
    let info = &volume.volume_info;
    let cover = info.image_links.cover().unwrap_or(PLACEHOLDER_COVER_PATH);
    let authors = info
        .author_line()
        .unwrap_or_else(|| "Unknown Author".to_string());

    let mut out = String::new();
    out.push_str(&format!(
        "<a class=\"card\" href=\"/book/{}\">\n",
        html_escape(&volume.id)
    ));
    out.push_str(&format!(
        "  <img src=\"{}\" alt=\"Cover of {}\" loading=\"lazy\" \
onerror=\"this.onerror=null;this.src='{PLACEHOLDER_COVER_PATH}'\" />\n",
        html_escape(cover),
        html_escape(&info.title)
    ));
    out.push_str(&format!("  <h3>{}</h3>\n", html_escape(&info.title)));
    out.push_str(&format!("  <p>{}</p>\n", html_escape(&authors)));
    out.push_str("</a>\n");
    out
}

fn render_detail(volume: &Volume) -> String {
    let info = &volume.volume_info;
    let cover = info.image_links.cover().unwrap_or(PLACEHOLDER_COVER_PATH);

    let mut out = String::new();
    out.push_str("<article class=\"detail\">\n");
    out.push_str(&format!(
        "  <img src=\"{}\" alt=\"Cover of {}\" \
onerror=\"this.onerror=null;this.src='{PLACEHOLDER_COVER_PATH}'\" />\n",
        html_escape(cover),
        html_escape(&info.title)
    ));
    out.push_str("  <div>\n");
    out.push_str(&format!("    <h1>{}</h1>\n", html_escape(&info.title)));
    if let Some(subtitle) = &info.subtitle {
        out.push_str(&format!("    <h2>{}</h2>\n", html_escape(subtitle)));
    }
    out.push_str(&render_field("Author(s)", info.author_line().as_deref()));
    out.push_str(&render_field("Publisher", info.publisher.as_deref()));
    out.push_str(&render_field("Published Date", info.published_date.as_deref()));
    if let Some(pages) = info.page_count {
        out.push_str(&format!(
            "    <p><strong>Pages:</strong> {pages}</p>\n"
        ));
    }
    if !info.categories.is_empty() {
        out.push_str(&render_field("Categories", Some(&info.categories.join(", "))));
    }
    match &info.description {
        // Descriptions arrive as HTML fragments from the catalog and are
        // rendered as-is.
        Some(description) => {
            out.push_str("    <h3>Description</h3>\n");
            out.push_str(&format!("    <div class=\"description\">{description}</div>\n"));
        }
        None => out.push_str("    <p class=\"muted\">No description available.</p>\n"),
    }
    let mut links = String::new();
    if let Some(preview) = &info.preview_link {
        links.push_str(&format!(
            "      <a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Preview</a>\n",
            html_escape(preview)
        ));
    }
    if let Some(link) = &info.info_link {
        links.push_str(&format!(
            "      <a class=\"button secondary\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">More Info</a>\n",
            html_escape(link)
        ));
    }
    if !links.is_empty() {
        out.push_str("    <div class=\"links\">\n");
        out.push_str(&links);
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
    out.push_str("</article>\n");
    out
}

fn render_field(label: &str, value: Option<&str>) -> String {
    format!(
        "    <p><strong>{label}:</strong> {}</p>\n",
        html_escape(value.unwrap_or("N/A"))
    )
}

fn render_error_banner(message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\"><strong>Error:</strong> {}</div>\n",
        html_escape(message)
    )
}

fn page_shell(title: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\" />\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    out.push_str(&format!("  <title>{}</title>\n", html_escape(title)));
    out.push_str("  <style>\n");
    out.push_str(PAGE_CSS);
    out.push_str("  </style>\n</head>\n<body>\n<main>\n");
    out.push_str(body);
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

const PAGE_CSS: &str = "\
    body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; background: #f9fafb; }\n\
    main { max-width: 64rem; margin: 0 auto; padding: 2rem 1rem; }\n\
    h1 { text-align: center; }\n\
    .muted { color: #6b7280; text-align: center; }\n\
    .search { display: flex; max-width: 36rem; margin: 0 auto 2rem; }\n\
    .search input { flex: 1; padding: 0.6rem 1rem; border: 1px solid #d1d5db; border-radius: 9999px 0 0 9999px; }\n\
    .search button { padding: 0.6rem 1.5rem; border: 0; border-radius: 0 9999px 9999px 0; background: #2563eb; color: #fff; cursor: pointer; }\n\
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(10rem, 1fr)); gap: 1rem; }\n\
    .card { display: block; background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; text-decoration: none; color: inherit; }\n\
    .card img { display: block; height: 12rem; margin: 0 auto 0.5rem; object-fit: contain; }\n\
    .card h3, .card p { margin: 0.25rem 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }\n\
    .detail { display: flex; gap: 2rem; background: #fff; border-radius: 0.5rem; padding: 2rem; }\n\
    .detail img { width: 12rem; align-self: flex-start; object-fit: contain; }\n\
    .error { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: 0.75rem 1rem; border-radius: 0.25rem; text-align: center; }\n\
    .links { margin-top: 1.5rem; display: flex; gap: 1rem; }\n\
    .button { background: #2563eb; color: #fff; padding: 0.5rem 1rem; border-radius: 0.25rem; text-decoration: none; }\n\
    .button.secondary { background: #e5e7eb; color: #1f2937; }\n";

fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
