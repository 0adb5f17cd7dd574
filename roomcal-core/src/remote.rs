//! Fetching the upstream schedule feed.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::calendar::Calendar;
use crate::error::{RoomCalError, RoomCalResult};
use crate::ics::parse_calendar;

/// The configured upstream feed and the HTTP client used to reach it.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct Upstream {
    client: reqwest::Client,
    url: String,
    authorization: HeaderValue,
}

impl Upstream {
    /// Build an upstream for `url`, authenticating with `Authorization: Token <token>`.
    pub fn new(url: &str, token: &str, timeout: Option<Duration>) -> RoomCalResult<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|_| RoomCalError::Config("token contains invalid header characters".into()))?;
        authorization.set_sensitive(true);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RoomCalError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Upstream {
            client,
            url: url.to_string(),
            authorization,
        })
    }

    /// Download the raw feed. Any non-2xx status is an error and the
    /// response body is discarded.
    pub async fn fetch(&self) -> RoomCalResult<Vec<u8>> {
        tracing::debug!(url = %self.url, "Fetching schedule");

        let response = self
            .client
            .get(&self.url)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.url, error = %e, "Schedule request failed");
                RoomCalError::Fetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Schedule request rejected");
            return Err(RoomCalError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RoomCalError::Fetch(e.to_string()))?;
        Ok(body.to_vec())
    }

    /// Download and parse the feed.
    pub async fn fetch_calendar(&self) -> RoomCalResult<Calendar> {
        let body = self.fetch().await?;
        parse_calendar(&body)
    }
}
