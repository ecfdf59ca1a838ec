//! Stockholm restaurant-discovery backend: a thin proxy over the Google
//! Places API (New) plus display-side presenter logic for its consumers.

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod presenter;
pub mod repositories;
