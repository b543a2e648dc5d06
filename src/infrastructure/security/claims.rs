// src/infrastructure/security/claims.rs
use crate::application::{
    dto::TokenClaims,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::UserId;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Read `user(id, name)`, `issued_at(t)` and `expires_at(t)` out of the
/// authority block facts.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<TokenClaims> {
    let mut user: Option<(i64, String)> = None;
    let mut issued_at: Option<SystemTime> = None;
    let mut expires_at: Option<SystemTime> = None;

    for fact in facts {
        let predicate = fact.predicate;
        match predicate.name.as_str() {
            "user" => user = user_terms(&predicate),
            "issued_at" => issued_at = date_term(&predicate),
            "expires_at" => expires_at = date_term(&predicate),
            _ => {}
        }
    }

    let (id, username) = user.ok_or_else(|| ApplicationError::unauthorized("missing user"))?;
    let issued_at = issued_at.ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at =
        expires_at.ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(TokenClaims {
        user_id: UserId::new(id).map_err(|_| ApplicationError::unauthorized("invalid user id"))?,
        username,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

fn user_terms(predicate: &Predicate) -> Option<(i64, String)> {
    match predicate.terms.as_slice() {
        [Term::Integer(id), Term::Str(name)] => Some((*id, name.clone())),
        _ => None,
    }
}

fn date_term(predicate: &Predicate) -> Option<SystemTime> {
    match predicate.terms.first() {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}
