use std::{env, time::Duration};

use chrono::NaiveDate;
use log::debug;
use reqwest::StatusCode;
use url::Url;

use crate::api::BookingApi;
use crate::errors::EngineError;
use crate::models::availability::{AvailabilityQuery, AvailabilityResponse};
use crate::models::reservation::{Reservation, ReservationConfirmation, ReservationRequest};
use crate::models::room::RoomDetails;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP implementation of [`BookingApi`] against the hotel backend's REST
/// endpoints. The bearer token is injected at construction and attached to
/// every call; nothing is read from ambient storage.
pub struct HttpBookingApi {
    http: reqwest::Client,
    base_url: Url,
    auth_token: String,
}

impl HttpBookingApi {
    pub fn new(base_url: Url, auth_token: impl Into<String>) -> Result<Self, EngineError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        // Endpoint paths are joined relative to the base, which needs a
        // trailing slash for `Url::join` to keep any base path segment.
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            auth_token: auth_token.into(),
        })
    }

    /// Build from `BOOKING_API_BASE_URL` and `BOOKING_API_TOKEN`.
    pub fn from_env() -> Result<Self, EngineError> {
        let base = env::var("BOOKING_API_BASE_URL").map_err(|_| {
            EngineError::validation("BOOKING_API_BASE_URL environment variable not set")
        })?;
        let base_url = Url::parse(&base).map_err(|err| {
            EngineError::validation(format!("invalid BOOKING_API_BASE_URL {base}: {err}"))
        })?;
        let auth_token = env::var("BOOKING_API_TOKEN").unwrap_or_default();
        Self::new(base_url, auth_token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        self.base_url
            .join(path)
            .map_err(|err| EngineError::validation(format!("invalid endpoint path {path}: {err}")))
    }

    fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, EngineError> {
        serde_json::from_str(body).map_err(|err| {
            EngineError::validation(format!(
                "failed to parse backend response: {err}. Response: {body}"
            ))
        })
    }

    /// Map a non-success response onto the error taxonomy. 409 means the
    /// range was booked out from under us; everything else is a rejection
    /// surfaced with the backend's own message.
    async fn read_error(response: reqwest::Response) -> EngineError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("detail")
                .or_else(|| value.get("error"))
                .and_then(|detail| detail.as_str())
                .map(str::to_owned)
                .unwrap_or(body),
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };

        if status == StatusCode::CONFLICT {
            EngineError::Conflict { message }
        } else {
            EngineError::Validation { message }
        }
    }
}

impl BookingApi for HttpBookingApi {
    async fn check_availability(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResponse, EngineError> {
        let url = self.endpoint(&format!("api/rooms/{room_id}/availability/"))?;
        debug!("POST {url} ({check_in} to {check_out})");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.auth_token)
            .json(&AvailabilityQuery {
                check_in_date: check_in,
                check_out_date: check_out,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }
        let body = response.text().await?;
        Self::parse_body(&body)
    }

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationConfirmation, EngineError> {
        let url = self.endpoint("api/reservations/")?;
        debug!("POST {url} (room {})", request.room_id);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.auth_token)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }
        let body = response.text().await?;
        Self::parse_body(&body)
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, EngineError> {
        let url = self.endpoint("api/reservations/")?;

        let response = self.http.get(url).bearer_auth(&self.auth_token).send().await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }
        let body = response.text().await?;
        Self::parse_body(&body)
    }

    async fn room_details(&self, room_id: &str) -> Result<RoomDetails, EngineError> {
        let url = self.endpoint(&format!("api/rooms/{room_id}/"))?;

        let response = self.http.get(url).bearer_auth(&self.auth_token).send().await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }
        let body = response.text().await?;
        Self::parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let api = HttpBookingApi::new(Url::parse("http://127.0.0.1:8000").unwrap(), "tok").unwrap();
        let url = api.endpoint("api/rooms/12/availability/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/rooms/12/availability/");
    }

    #[test]
    fn test_base_path_segment_is_kept() {
        let api =
            HttpBookingApi::new(Url::parse("http://host.example/v1").unwrap(), "tok").unwrap();
        let url = api.endpoint("api/reservations/").unwrap();
        assert_eq!(url.as_str(), "http://host.example/v1/api/reservations/");
    }
}
