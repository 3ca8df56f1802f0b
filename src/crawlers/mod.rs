pub mod controller;
pub mod crawler;
pub mod web;

#[cfg(test)]
mod tests;

pub use controller::{CrawlController, CrawlState};
pub use crawler::{PageFetcher, Readiness};
pub use web::WebFetcher;
