pub mod page;
pub mod partner;
pub mod post;
pub mod scholarship;
pub mod settings;
pub mod story;
pub mod subscriber;
pub mod taxonomy;
pub mod user;
