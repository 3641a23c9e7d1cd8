//! # ClinicSlots Client
//!
//! Async client for the remote scheduling API that owns clinicians' availability
//! rules, resolved slot statuses and bookings. Requests carry the bearer token
//! held by an explicitly passed [`Session`].

/// Environment-driven connection settings
pub mod config;
/// Request and response payloads specific to the scheduling API
pub mod models;
/// Availability sources and week loading on top of them
pub mod source;

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use clinicslots_core::{
    errors::{SlotError, SlotResult},
    models::{AvailabilityRule, TimeSlot},
    session::{CurrentUser, MemoryTokenStorage, Session, TokenStorage},
};
use eyre::{eyre, WrapErr};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    models::{ApiErrorBody, BookingConfirmation, BookingRequest, LoginRequest, LoginResponse},
};

pub use source::{load_week, preview_week, AvailabilitySource};

pub struct ApiClient<S: TokenStorage = MemoryTokenStorage> {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session<S>>,
}

impl<S: TokenStorage> ApiClient<S> {
    pub fn new(config: &ClientConfig, session: Arc<Session<S>>) -> SlotResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .wrap_err("Failed to build HTTP client")?;

        if let Some(token) = &config.token {
            session.set_token(token.clone());
        }

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> SlotResult<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .wrap_err("Failed to reach scheduling API")?;

        self.read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> SlotResult<T> {
        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<T>()
                .await
                .wrap_err("Unexpected response body from scheduling API")?;
            return Ok(body);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&raw)
            .map(|body| body.message)
            .unwrap_or(raw);

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Scheduling API rejected credentials, clearing session");
                self.session.sign_out();
                Err(SlotError::Authentication(message))
            }
            StatusCode::NOT_FOUND => Err(SlotError::NotFound(message)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(SlotError::Validation(message))
            }
            _ => Err(SlotError::Upstream(eyre!(
                "scheduling API returned {}: {}",
                status,
                message
            ))),
        }
    }

    /// Signs in with staff credentials and stores the issued token in the session.
    pub async fn sign_in(&self, email: &str, password: &str) -> SlotResult<CurrentUser> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .send(self.http.post(self.url("/auth/login")).json(&request))
            .await?;

        self.session.sign_in(response.token, &response.user)?;
        info!("Signed in as {}", response.user.email);

        Ok(response.user)
    }

    pub async fn fetch_availability_rules(
        &self,
        clinician_id: Uuid,
    ) -> SlotResult<Vec<AvailabilityRule>> {
        debug!("Fetching availability rules for clinician {}", clinician_id);
        self.send(
            self.http
                .get(self.url(&format!("/clinicians/{}/availability", clinician_id))),
        )
        .await
    }

    pub async fn fetch_time_slots(
        &self,
        clinician_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> SlotResult<Vec<TimeSlot>> {
        debug!(
            "Fetching slots for clinician {} from {} to {}",
            clinician_id, from, to
        );
        self.send(
            self.http
                .get(self.url(&format!("/clinicians/{}/slots", clinician_id)))
                .query(&[("from", from.to_string()), ("to", to.to_string())]),
        )
        .await
    }

    /// Creates the appointment for a selected slot. Persistence, conflict
    /// resolution and payment all happen behind the API.
    pub async fn book_slot(&self, booking: &BookingRequest) -> SlotResult<BookingConfirmation> {
        if !self.session.is_authenticated() {
            return Err(SlotError::Authentication(
                "Sign in before booking appointments".to_string(),
            ));
        }

        let confirmation: BookingConfirmation = self
            .send(self.http.post(self.url("/appointments")).json(booking))
            .await?;

        info!(
            "Booked slot {} on {} at {} as appointment {}",
            booking.slot_id, booking.date, booking.start_time, confirmation.appointment_id
        );

        Ok(confirmation)
    }
}
