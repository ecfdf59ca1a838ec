pub mod google_places_repo;
