use std::path::PathBuf;

use rocket::{
    Request, State,
    fs::NamedFile,
    get,
    http::Status,
    response::{self, Responder, content::RawHtml},
    serde::json::Json,
};

use crate::{
    error::UpstreamError,
    model::ViewModel,
    pages::PageRenderer,
    resolver::{Resolution, SearchResultResolver},
};

pub struct AssetDirectory(pub PathBuf);

/// Attaches the resolver's `Cache-Control` directive, if it has one.
pub struct Cached<R> {
    inner: R,
    cache_control: Option<&'static str>,
}

impl<'r, R: Responder<'r, 'static>> Responder<'r, 'static> for Cached<R> {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let mut response = self.inner.respond_to(request)?;
        if let Some(directive) = self.cache_control {
            response.set_raw_header("Cache-Control", directive);
        }
        Ok(response)
    }
}

#[get("/?<search>")]
pub async fn index(
    search: Option<&str>,
    resolver: &State<SearchResultResolver>,
    renderer: &State<PageRenderer>,
) -> Result<Cached<RawHtml<String>>, (Status, RawHtml<String>)> {
    match resolver.resolve(search).await {
        Ok(Resolution {
            view_model,
            cache_control,
        }) => Ok(Cached {
            inner: RawHtml(renderer.render(&view_model)),
            cache_control,
        }),
        Err(error) => {
            log::error!("{error}");
            Err((
                error.http_status(),
                RawHtml(renderer.render_upstream_failure(search.unwrap_or_default())),
            ))
        }
    }
}

#[get("/api/search?<search>")]
pub async fn api_search(
    search: Option<&str>,
    resolver: &State<SearchResultResolver>,
) -> Result<Cached<Json<ViewModel>>, UpstreamError> {
    let Resolution {
        view_model,
        cache_control,
    } = resolver.resolve(search).await?;

    Ok(Cached {
        inner: Json(view_model),
        cache_control,
    })
}

#[get("/assets/<path..>")]
pub async fn asset(path: PathBuf, assets: &State<AssetDirectory>) -> Option<NamedFile> {
    NamedFile::open(assets.0.join(path)).await.ok()
}

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> RawHtml<String> {
    let page = request
        .rocket()
        .state::<PageRenderer>()
        .map(PageRenderer::render_not_found)
        .unwrap_or_else(|| "404 - Page not found".to_owned());

    RawHtml(page)
}
