use crate::models::restaurant::RestaurantSummary;

/// Selectable list orderings. `Closest` compares raw latitude only, an
/// acknowledged approximation with no reference point or longitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    BestRated,
    Closest,
    MostReviewed,
}

/// Client-held accumulator over paged search results. Page 1 starts a new
/// search, later pages extend it ("load more").
#[derive(Default, Debug)]
pub struct RestaurantList {
    restaurants: Vec<RestaurantSummary>,
}

impl RestaurantList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_page(&mut self, page: u32, results: Vec<RestaurantSummary>) {
        if page == 1 {
            self.restaurants = results;
        } else {
            self.restaurants.extend(results);
        }
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Presentation-only view: open-now filter plus a stable sort. Never
    /// affects what was fetched or how pagination advances.
    pub fn visible(&self, open_now_only: bool, sort_by: SortBy) -> Vec<RestaurantSummary> {
        let mut visible: Vec<RestaurantSummary> = self
            .restaurants
            .iter()
            .filter(|r| !open_now_only || r.open_now)
            .cloned()
            .collect();

        visible.sort_by(|a, b| match sort_by {
            SortBy::BestRated => b
                .rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0)),
            SortBy::Closest => {
                let a_lat = a.location.as_ref().map(|l| l.lat).unwrap_or(0.0);
                let b_lat = b.location.as_ref().map(|l| l.lat).unwrap_or(0.0);
                a_lat.total_cmp(&b_lat)
            }
            SortBy::MostReviewed => b
                .user_ratings_total
                .unwrap_or(0)
                .cmp(&a.user_ratings_total.unwrap_or(0)),
        });

        visible
    }
}
