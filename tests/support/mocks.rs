// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use frame_admin::application::{
    ApplicationResult,
    dto::{AuthTokenDto, TokenClaims, TokenSubject},
    error::ApplicationError,
    ports::{
        events::EventPublisher,
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
};
use frame_admin::domain::{events::EntityEvent, user::UserId};
use once_cell::sync::Lazy;
use std::sync::Mutex;

pub static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0)
        .single()
        .expect("valid fixed timestamp")
});

#[derive(Clone, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *FIXED_NOW
    }
}

/// Stores passwords with a marker prefix instead of hashing them.
#[derive(Clone, Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Tokens look like `user:<id>:<username>`.
#[derive(Clone, Default)]
pub struct StaticTokenManager;

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = *FIXED_NOW;
        Ok(AuthTokenDto {
            token: format!("user:{}:{}", subject.user_id.0, subject.username),
            issued_at,
            expires_at: issued_at + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<TokenClaims> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        let rest = token.strip_prefix("user:").ok_or_else(invalid)?;
        let (id, username) = rest.split_once(':').ok_or_else(invalid)?;
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(TokenClaims {
            user_id: UserId::new(id).map_err(|_| invalid())?,
            username: username.to_string(),
            issued_at: *FIXED_NOW,
            expires_at: *FIXED_NOW + Duration::hours(1),
        })
    }
}

/// Keeps every published event in memory.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<EntityEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<EntityEvent> {
        self.events.lock().expect("publisher lock").clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: EntityEvent) -> ApplicationResult<()> {
        self.events.lock().expect("publisher lock").push(event);
        Ok(())
    }
}

/// Transport that is always down.
#[derive(Clone, Default)]
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: EntityEvent) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("event transport unavailable"))
    }
}
