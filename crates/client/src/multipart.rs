//! Encoding of transport payloads as `multipart/form-data`.

use reqwest::multipart::{Form, Part};
use shiptalk_core::{ImageBlob, PartValue, TransportPayload};

/// Build a multipart form from a payload, preserving part order.
pub(crate) fn to_form(payload: TransportPayload) -> Form {
    payload
        .into_parts()
        .into_iter()
        .fold(Form::new(), |form, part| match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File(blob) => form.part(part.name, file_part(blob)),
        })
}

fn file_part(blob: ImageBlob) -> Part {
    let ImageBlob {
        file_name,
        content_type,
        data,
    } = blob;
    let part = Part::bytes(data).file_name(file_name);
    // An unparsable MIME type falls back to reqwest's default for bytes.
    if !is_valid_mime(&content_type) {
        return part;
    }
    part.mime_str(&content_type)
        .expect("MIME type was validated before building the part")
}

fn is_valid_mime(content_type: &str) -> bool {
    Part::bytes(Vec::new()).mime_str(content_type).is_ok()
}
