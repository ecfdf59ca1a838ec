use serde::{Deserialize, Serialize};

/// List-view item, shaped once at the proxy boundary so consumers never
/// re-check the upstream's optional fields.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub place_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub open_now: bool,
}

/// Detail-view item. `photo_url` is the medium-width preview, `photos` the
/// full carousel list at the large width, in upstream order.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub place_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub opening_hours: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoReference>,
}

/// Opaque upstream photo name plus the rewritten proxy URL carrying its width.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PhotoReference {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}
