use serde::Deserialize;

/// An item from `/item/{id}.json`. Stories and comments share the shape;
/// fields absent for one kind default to empty.
#[derive(Debug, Deserialize)]
pub struct HNItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub descendants: i64,
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl HNItem {
    pub fn is_visible(&self) -> bool {
        !self.deleted && !self.dead
    }
}
