use crate::{
    client::SearchClient,
    error::UpstreamError,
    model::{RawSearchItem, UpstreamResult, ViewModel},
};

pub const RESULTS_CACHE_CONTROL: &str = "max-age=60, stale-while-revalidate=60";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub view_model: ViewModel,
    pub cache_control: Option<&'static str>,
}

pub struct SearchResultResolver {
    client: Box<dyn SearchClient>,
}

impl SearchResultResolver {
    pub fn new(client: Box<dyn SearchClient>) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, search: Option<&str>) -> Result<Resolution, UpstreamError> {
        let Some(term) = search.filter(|term| !term.is_empty()) else {
            return Ok(Resolution {
                view_model: ViewModel::empty_search(),
                cache_control: None,
            });
        };

        let raw_items = match self.client.search(term).await? {
            UpstreamResult::Absent | UpstreamResult::Empty => {
                log::info!("no results for {term:?}");
                return Ok(Resolution {
                    view_model: ViewModel::no_results(term),
                    cache_control: None,
                });
            }
            UpstreamResult::Items(raw_items) => raw_items,
        };

        let received = raw_items.len();
        let items: Vec<_> = raw_items
            .into_iter()
            .filter_map(RawSearchItem::into_view_item)
            .collect();
        log::info!("{} of {received} results for {term:?} have images", items.len());

        Ok(Resolution {
            view_model: ViewModel::results_found(term, items),
            cache_control: Some(RESULTS_CACHE_CONTROL),
        })
    }
}
