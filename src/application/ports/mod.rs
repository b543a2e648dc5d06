// src/application/ports/mod.rs
pub mod events;
pub mod reports;
pub mod security;
pub mod time;
pub mod util;

pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type TokenManagerPort = dyn security::TokenManager;
pub type ClockPort = dyn time::Clock;
pub type SlugGeneratorPort = dyn util::SlugGenerator;
pub type EventPublisherPort = dyn events::EventPublisher;
pub type ReportRendererPort = dyn reports::ReportRenderer;
