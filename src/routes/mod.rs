pub mod admin;
pub mod candidate_routes;
pub mod health;
pub mod messaging;
pub mod portal;
pub mod template_routes;
