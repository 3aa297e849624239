//! Expert record schema and the form validation pipeline.
//!
//! A [`CandidateRecord`] holds raw form input. [`validate`] checks it against
//! the record schema and yields a [`ValidatedRecord`] with canonical types, or
//! a [`FieldErrors`] map with one message per invalid field. [`serialize`]
//! turns a validated record into the ordered [`TransportPayload`] that the
//! client sends as `multipart/form-data`.

pub mod image;
pub mod payload;
pub mod record;
pub mod types;
pub mod validation;

pub use image::{ImageBlob, ImageError, content_type_for};
pub use payload::{ID_PART, PartValue, PayloadPart, TransportPayload, serialize};
pub use record::{CandidateRecord, ExpertRecord, PictureInput, ProfilePicture, ValidatedRecord};
pub use types::{ExpertId, Field};
pub use validation::{FieldErrors, FormMode, validate, validate_field};
