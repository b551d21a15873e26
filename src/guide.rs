//! The travel guide itself: topics, prompt templates and the service that
//! turns a city + topic into the sections shown on the page.

pub mod prompt;
pub mod service;
pub mod topic;

pub use service::{CityGuide, Description, GuideService, GuideSettings, Illustration};
pub use topic::Topic;
