use std::collections::HashSet;

use crate::models::restaurant::RestaurantDetail;

/// Ordered carousel URL list: the preview photo first, then the full photo
/// list, with exact-duplicate URLs removed. Duplicates are defined by final
/// URL equality, so the same upstream photo at two widths stays twice.
pub fn carousel_photo_urls(base_url: &str, detail: &RestaurantDetail) -> Vec<String> {
    let mut urls = Vec::with_capacity(detail.photos.len() + 1);
    if let Some(photo_url) = &detail.photo_url {
        urls.push(format!("{base_url}{photo_url}"));
    }
    for photo in &detail.photos {
        urls.push(format!("{base_url}{}", photo.url));
    }
    dedup_preserving_order(urls)
}

pub fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|url| seen.insert(url.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::restaurant::PhotoReference;
    use crate::repositories::google_places_repo::{
        photo_proxy_url, CAROUSEL_PHOTO_WIDTH, PREVIEW_PHOTO_WIDTH,
    };

    const BASE: &str = "http://localhost:4000";

    fn detail(photo_names: &[&str], preview: Option<&str>) -> RestaurantDetail {
        RestaurantDetail {
            place_id: "p-1".to_string(),
            name: "Tranan".to_string(),
            address: None,
            phone: None,
            website: None,
            rating: Some(4.3),
            opening_hours: vec![],
            location: None,
            photo_url: preview.map(|name| photo_proxy_url(name, PREVIEW_PHOTO_WIDTH)),
            photos: photo_names
                .iter()
                .map(|name| PhotoReference {
                    name: name.to_string(),
                    url: photo_proxy_url(name, CAROUSEL_PHOTO_WIDTH),
                })
                .collect(),
        }
    }

    #[test]
    fn preview_comes_first_then_carousel_in_order() {
        let detail = detail(&["places/p/photos/a", "places/p/photos/b"], Some("places/p/photos/a"));
        let urls = carousel_photo_urls(BASE, &detail);

        // Same photo at two widths is two distinct URLs, all kept.
        assert_eq!(urls.len(), 3);
        assert!(urls[0].contains("maxwidth=800"));
        assert!(urls[1].contains("maxwidth=1200"));
        assert!(urls.iter().all(|url| url.starts_with(BASE)));
    }

    #[test]
    fn exact_duplicate_urls_are_removed_keeping_first_occurrence() {
        let urls = dedup_preserving_order(vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
            "b".to_string(),
        ]);
        assert_eq!(urls, ["a", "b", "c"]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let once = dedup_preserving_order(vec![
            "x".to_string(),
            "x".to_string(),
            "y".to_string(),
        ]);
        let twice = dedup_preserving_order(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn no_photos_yields_an_empty_carousel() {
        let detail = detail(&[], None);
        assert!(carousel_photo_urls(BASE, &detail).is_empty());
    }
}
