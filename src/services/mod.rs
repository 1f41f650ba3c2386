pub mod sentiment;
pub mod store;
pub mod template_engine;
