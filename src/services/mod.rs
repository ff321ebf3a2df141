pub mod auth_service;
pub mod catalog_service;
pub mod content_service;
pub mod resource;
pub mod settings_service;
pub mod subscriber_service;
pub mod taxonomy_service;
pub mod user_service;
