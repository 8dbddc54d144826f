//! Response headers derived from query parameters.

use actix_web::HttpResponseBuilder;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue};

use crate::error::{BridgeError, BridgeResult};
use crate::models::QueryParameters;

/// Query parameter naming the attachment filename.
pub const KEY_FILE_NAME: &str = "fileName";

/// Query parameter carrying the response content type.
pub const KEY_CONTENT_TYPE: &str = "contentType";

/// Build the Content-Disposition value for an attachment.
///
/// The filename is quoted but not escaped. Values containing control characters are
/// rejected when converted to a header value, so they cannot inject extra headers.
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name)
}

/// Optional headers for a bridged response. Absent parameters leave the header unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    pub content_disposition: Option<HeaderValue>,
    pub content_type: Option<HeaderValue>,
}

impl ResponseHeaders {
    /// Read `fileName` and `contentType` from the query parameters.
    pub fn from_query(query: &QueryParameters) -> BridgeResult<Self> {
        let content_disposition = query
            .get(KEY_FILE_NAME)
            .map(|name| header_value(KEY_FILE_NAME, &content_disposition(name)))
            .transpose()?;

        let content_type = query
            .get(KEY_CONTENT_TYPE)
            .map(|ct| header_value(KEY_CONTENT_TYPE, ct))
            .transpose()?;

        Ok(Self {
            content_disposition,
            content_type,
        })
    }

    /// Set the synthesized headers on a response under construction.
    pub fn apply(&self, builder: &mut HttpResponseBuilder) {
        if let Some(ref value) = self.content_disposition {
            builder.insert_header((CONTENT_DISPOSITION, value.clone()));
        }
        if let Some(ref value) = self.content_type {
            builder.insert_header((CONTENT_TYPE, value.clone()));
        }
    }
}

fn header_value(param: &str, value: &str) -> BridgeResult<HeaderValue> {
    // from_bytes lets UTF-8 filenames through as opaque bytes
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| {
        BridgeError::InvalidRequest(format!(
            "Query parameter '{}' cannot be used as a header value",
            param
        ))
    })
}
