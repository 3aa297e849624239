//! The `{success, data, message}` wrapper every API response uses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;
use shiptalk_core::ExpertRecord;

/// A decoded response envelope.
///
/// Only a literal `success: true` counts as success; a missing flag, `false`
/// or any other value is a failure, whatever the HTTP status was.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl Envelope {
    /// Parse an envelope from a response body.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Whether the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.success == Value::Bool(true)
    }

    /// The user-facing message, if the envelope carries a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Convert into `Ok(data)` on success, or an API error carrying the
    /// envelope's message (or `fallback` when there is none).
    pub fn into_result(self, fallback: &str) -> Result<Option<Value>, Error> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Api {
                message: self.message().unwrap_or(fallback).to_owned(),
            })
        }
    }

    /// Like [`Envelope::into_result`], then decode the data into `T`.
    ///
    /// A successful envelope without data is a deserialization error.
    pub fn into_data<T: DeserializeOwned>(self, fallback: &str) -> Result<T, Error> {
        let data = self
            .into_result(fallback)?
            .ok_or_else(|| Error::Deserialization("response has no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

/// `data` of the list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertList {
    #[serde(default)]
    pub experts: Vec<ExpertRecord>,
}

/// `data` of the fetch-one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertDetail {
    pub expert: ExpertRecord,
}
