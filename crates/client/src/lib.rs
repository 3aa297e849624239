//! Shiptalk HTTP Client
//!
//! A native Rust client for the experts REST API, plus the form session that
//! validates drafts and submits them as `multipart/form-data`.
//!
//! # Quick Start
//!
//! ```no_run
//! use shiptalk_client::{ExpertClient, FormSession};
//! use shiptalk_core::{CandidateRecord, Field, ImageBlob};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ExpertClient::new("http://localhost:5000");
//!
//!     for expert in client.list_experts().await? {
//!         println!("{}: {}", expert.id, expert.name);
//!     }
//!
//!     let mut draft = CandidateRecord::new();
//!     draft.set(Field::Name, "Ada Lovelace");
//!     draft.set(Field::Phone, "1234567890");
//!     draft.set(Field::Linkedin, "https://www.linkedin.com/in/ada");
//!     draft.set(Field::Email, "ada@example.com");
//!     draft.set(Field::Company, "Analytical Engines");
//!     draft.set(Field::Designation, "Navigator");
//!     draft.set(Field::YearsInIndustry, "12");
//!     draft.set_picture_file(ImageBlob::from_path("ada.png")?);
//!
//!     let session = FormSession::create(&client);
//!     session.submit(&draft).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```no_run
//! use shiptalk_client::ExpertClientBuilder;
//! use std::time::Duration;
//!
//! let client = ExpertClientBuilder::new("http://localhost:5000")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod config;
mod confirm;
mod envelope;
mod error;
mod multipart;
mod session;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use confirm::{AssumeYes, Confirm, DELETE_PROMPT, DeleteOutcome};
pub use envelope::{Envelope, ExpertDetail, ExpertList};
pub use error::{Error, SubmitError};
pub use session::{FormSession, FormState, Submitter};

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Client;
use shiptalk_core::{ExpertId, ExpertRecord, FormMode, TransportPayload};
use tracing::{debug, info, instrument};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Collection path of the experts resource.
const EXPERTS_PATH: &str = "/api/experts";

const LIST_FALLBACK: &str = "Failed to fetch experts";
const FETCH_FALLBACK: &str = "Failed to fetch expert data";
const CREATE_FALLBACK: &str = "Failed to register expert";
const UPDATE_FALLBACK: &str = "Failed to update expert";
const DELETE_FALLBACK: &str = "Failed to delete expert";

/// Characters escaped when an id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP client for the experts API.
#[derive(Debug, Clone)]
pub struct ExpertClient {
    client: Client,
    base_url: String,
}

/// Builder for configuring an [`ExpertClient`].
#[derive(Debug)]
pub struct ExpertClientBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl ExpertClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ExpertClient, Error> {
        if self.base_url.is_empty() {
            return Err(Error::Configuration("base URL must not be empty".into()));
        }

        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(ExpertClient {
            client,
            base_url: self.base_url,
        })
    }
}

impl ExpertClient {
    /// Create a new client with default configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        ExpertClientBuilder::new(base_url)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> ExpertClientBuilder {
        ExpertClientBuilder::new(base_url)
    }

    /// Create a client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = ExpertClientBuilder::new(&config.endpoint);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{EXPERTS_PATH}", self.base_url)
    }

    fn expert_url(&self, id: &ExpertId) -> String {
        format!(
            "{}{EXPERTS_PATH}/{}",
            self.base_url,
            utf8_percent_encode(id.as_str(), PATH_SEGMENT)
        )
    }

    /// Absolute URL of a record's stored picture, if it has one.
    ///
    /// Stored references are relative to the API base URL; references that
    /// are already absolute URLs are returned unchanged.
    pub fn profile_picture_url(&self, record: &ExpertRecord) -> Option<String> {
        let reference = record.profile_picture.as_deref()?.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_owned());
        }
        Some(format!("{}{reference}", self.base_url))
    }

    /// Send a request and decode the response envelope.
    ///
    /// The HTTP status is not consulted; the envelope alone decides success.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Envelope::parse(&body)
    }

    // =========================================================================
    // Experts
    // =========================================================================

    /// List all experts.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), shiptalk_client::Error> {
    /// use shiptalk_client::ExpertClient;
    ///
    /// let client = ExpertClient::new("http://localhost:5000");
    /// for expert in client.list_experts().await? {
    ///     println!("{} works at {}", expert.name, expert.company);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn list_experts(&self) -> Result<Vec<ExpertRecord>, Error> {
        let envelope = self.send(self.client.get(self.collection_url())).await?;
        let list: ExpertList = envelope.into_data(LIST_FALLBACK)?;
        Ok(list.experts)
    }

    /// Fetch a single expert.
    #[instrument(skip(self, id), fields(expert_id = %id))]
    pub async fn get_expert(&self, id: &ExpertId) -> Result<ExpertRecord, Error> {
        let envelope = self.send(self.client.get(self.expert_url(id))).await?;
        let detail: ExpertDetail = envelope.into_data(FETCH_FALLBACK)?;
        Ok(detail.expert)
    }

    /// Register a new expert from a create payload.
    #[instrument(skip(self, payload), fields(parts = payload.len()))]
    pub async fn create_expert(&self, payload: TransportPayload) -> Result<(), Error> {
        let form = multipart::to_form(payload);
        let envelope = self
            .send(self.client.post(self.collection_url()).multipart(form))
            .await?;
        envelope.into_result(CREATE_FALLBACK)?;
        info!("expert registered");
        Ok(())
    }

    /// Update an existing expert from an update payload.
    #[instrument(skip(self, id, payload), fields(expert_id = %id, parts = payload.len()))]
    pub async fn update_expert(
        &self,
        id: &ExpertId,
        payload: TransportPayload,
    ) -> Result<(), Error> {
        let form = multipart::to_form(payload);
        let envelope = self
            .send(self.client.put(self.expert_url(id)).multipart(form))
            .await?;
        envelope.into_result(UPDATE_FALLBACK)?;
        info!("expert updated");
        Ok(())
    }

    /// Delete an expert without asking for confirmation.
    #[instrument(skip(self, id), fields(expert_id = %id))]
    pub async fn delete_expert(&self, id: &ExpertId) -> Result<(), Error> {
        let envelope = self.send(self.client.delete(self.expert_url(id))).await?;
        envelope.into_result(DELETE_FALLBACK)?;
        info!("expert deleted");
        Ok(())
    }

    /// Delete an expert once `confirm` approves [`DELETE_PROMPT`].
    ///
    /// A declined prompt sends nothing and yields [`DeleteOutcome::Cancelled`].
    pub async fn delete_expert_confirmed(
        &self,
        id: &ExpertId,
        confirm: &impl Confirm,
    ) -> Result<DeleteOutcome, Error> {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(expert_id = %id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        self.delete_expert(id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}

impl Submitter for ExpertClient {
    async fn submit(&self, mode: &FormMode, payload: TransportPayload) -> Result<(), Error> {
        match mode {
            FormMode::Create => self.create_expert(payload).await,
            FormMode::Update(id) => self.update_expert(id, payload).await,
        }
    }
}
