//! Explicit login session with an `init → authenticate → expire` lifecycle.
//!
//! Authentication is a placeholder: any non-empty username and password are
//! accepted and nothing is verified server-side. The value is owned by whoever
//! renders protected views and handed to them, instead of being read from
//! ambient storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DashboardError, Result};

/// Default lifetime of an authenticated session.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    /// Nobody has logged in yet
    #[default]
    Anonymous,
    Authenticated {
        user: String,
        since: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Logged out or timed out; a new login is required
    Expired { user: String },
}

impl Session {
    pub fn init() -> Self {
        Session::Anonymous
    }

    /// Logs `user` in until `now + ttl`.
    pub fn authenticate(
        &self,
        user: &str,
        password: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self> {
        let user = user.trim();
        if user.is_empty() || password.is_empty() {
            return Err(DashboardError::Session(
                "username and password are required".to_string(),
            ));
        }
        if ttl <= Duration::zero() {
            return Err(DashboardError::Session(
                "session lifetime must be positive".to_string(),
            ));
        }

        info!(user, "Session authenticated");
        Ok(Session::Authenticated {
            user: user.to_string(),
            since: now,
            expires_at: now + ttl,
        })
    }

    /// Ends the session. Expiring an anonymous session leaves it anonymous.
    pub fn expire(&self) -> Self {
        match self {
            Session::Authenticated { user, .. } => {
                info!(user, "Session expired");
                Session::Expired { user: user.clone() }
            }
            other => other.clone(),
        }
    }

    /// Moves an authenticated session past its deadline into `Expired`.
    pub fn refresh(&self, now: DateTime<Utc>) -> Self {
        match self {
            Session::Authenticated { expires_at, .. } if now >= *expires_at => {
                debug!(%now, %expires_at, "Session deadline passed");
                self.expire()
            }
            other => other.clone(),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        matches!(self, Session::Authenticated { expires_at, .. } if now < *expires_at)
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user, .. } | Session::Expired { user } => Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_lifecycle() {
        let session = Session::init();
        assert!(!session.is_active(noon()));
        assert_eq!(session.user(), None);

        let session = session
            .authenticate("operator", "secret", noon(), Duration::hours(1))
            .unwrap();
        assert!(session.is_active(noon()));
        assert_eq!(session.user(), Some("operator"));

        let session = session.expire();
        assert!(!session.is_active(noon()));
        assert_eq!(session, Session::Expired { user: "operator".to_string() });
    }

    #[test]
    fn test_refresh_expires_after_deadline() {
        let session = Session::init()
            .authenticate("operator", "secret", noon(), Duration::minutes(30))
            .unwrap();

        let later = noon() + Duration::minutes(29);
        assert_eq!(session.refresh(later), session);

        let deadline = noon() + Duration::minutes(30);
        assert!(!session.is_active(deadline));
        assert!(matches!(session.refresh(deadline), Session::Expired { .. }));
    }

    #[test]
    fn test_authenticate_requires_credentials() {
        let session = Session::init();
        assert!(session.authenticate("  ", "pw", noon(), Duration::hours(1)).is_err());
        assert!(session.authenticate("op", "", noon(), Duration::hours(1)).is_err());
        assert!(session.authenticate("op", "pw", noon(), Duration::zero()).is_err());
    }

    #[test]
    fn test_expire_anonymous_is_noop() {
        assert_eq!(Session::init().expire(), Session::Anonymous);
    }

    #[test]
    fn test_serde_round_trip_for_storage() {
        let session = Session::init()
            .authenticate("operator", "secret", noon(), Duration::hours(2))
            .unwrap();
        let stored = serde_json::to_string(&session).unwrap();
        assert!(stored.contains("\"state\":\"authenticated\""));
        let restored: Session = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, session);
    }
}
