#[macro_use]
extern crate rocket;

use std::path::PathBuf;

use rocket::figment::Figment;

pub mod api;
pub mod client;
pub mod emojis;
pub mod error;
pub mod lets_encrypt_listener;
pub mod model;
pub mod pages;
pub mod resolver;

use api::AssetDirectory;
use client::SearchClient;
use pages::PageRenderer;
use resolver::SearchResultResolver;

pub fn build_rocket(
    figment: Figment,
    client: Box<dyn SearchClient>,
    assets: PathBuf,
) -> rocket::Rocket<rocket::Build> {
    rocket::custom(figment)
        .manage(SearchResultResolver::new(client))
        .manage(PageRenderer::new(&assets))
        .manage(AssetDirectory(assets))
        .mount("/", routes![api::index, api::api_search, api::asset])
        .register("/", catchers![api::not_found])
}
