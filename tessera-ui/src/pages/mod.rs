//! Pages

pub mod dashboard;
pub mod gallery;

pub use dashboard::Dashboard;
pub use gallery::ExampleGallery;
