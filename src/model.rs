use rocket::serde::{Deserialize, Deserializer, Serialize};

/// One entry of the upstream `/search/memes` response, as sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RawSearchItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub meme: RawMeme,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RawMeme {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RawImage {
    pub medium: String,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(crate = "rocket::serde", untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

impl RawSearchItem {
    /// Items without an image are dropped rather than given a placeholder.
    pub fn into_view_item(self) -> Option<ViewItem> {
        let RawSearchItem {
            id,
            meme: RawMeme { name, url, image },
        } = self;

        image.map(|RawImage { medium }| ViewItem {
            id,
            name,
            image: medium,
            url,
        })
    }
}

/// What the upstream handed back, once the body has been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult {
    Absent,
    Empty,
    Items(Vec<RawSearchItem>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ViewItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub enum Status {
    EmptySearch,
    NoResults,
    ResultsFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ViewModel {
    pub status: Status,
    pub search_term: String,
    pub items: Vec<ViewItem>,
}

impl ViewModel {
    pub fn empty_search() -> Self {
        Self {
            status: Status::EmptySearch,
            search_term: String::new(),
            items: Vec::new(),
        }
    }

    pub fn no_results(search_term: &str) -> Self {
        Self {
            status: Status::NoResults,
            search_term: search_term.to_owned(),
            items: Vec::new(),
        }
    }

    pub fn results_found(search_term: &str, items: Vec<ViewItem>) -> Self {
        Self {
            status: Status::ResultsFound,
            search_term: search_term.to_owned(),
            items,
        }
    }
}
