use url::form_urlencoded;

use crate::error::ApiError;

/// Query parameter carrying a certificate verification identifier.
pub const CERTIFICATE_QUERY_KEY: &str = "constancia";

/// Query parameter carrying a report verification identifier.
pub const REPORT_QUERY_KEY: &str = "verificacion";

pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Which view the application opens for a given page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ReportVerification(String),
    CertificateVerification(String),
    Registration,
}

impl Route {
    /// Resolves the view from a query string (with or without the leading `?`).
    ///
    /// The report flag is checked before the certificate flag, so a URL carrying both
    /// opens the report verification view. Empty values are ignored.
    pub fn from_query(query: &str) -> Route {
        let query = query.strip_prefix('?').unwrap_or(query);
        let first_value = |key: &str| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };

        if let Some(id) = first_value(REPORT_QUERY_KEY) {
            return Route::ReportVerification(id);
        }
        if let Some(id) = first_value(CERTIFICATE_QUERY_KEY) {
            return Route::CertificateVerification(id);
        }
        Route::Registration
    }

    pub fn from_url(page_url: &str) -> Result<Route, ApiError> {
        let parsed = url::Url::parse(page_url)
            .map_err(|e| ApiError::validation(format!("Invalid page URL '{page_url}': {e}")))?;
        Ok(Route::from_query(parsed.query().unwrap_or("")))
    }
}

/// Builds the public verification URLs embedded in generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationLinks {
    origin: String,
}

impl VerificationLinks {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `<origin>/?constancia=<id>`
    pub fn certificate_url(&self, verification_id: &str) -> String {
        self.build(CERTIFICATE_QUERY_KEY, verification_id)
    }

    /// `<origin>/?verificacion=<id>`
    pub fn report_url(&self, verification_id: &str) -> String {
        self.build(REPORT_QUERY_KEY, verification_id)
    }

    fn build(&self, key: &str, value: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        format!("{}/?{key}={encoded}", self.origin)
    }
}

/// External QR image service: `(size, payload) -> image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeEndpoint {
    base: String,
}

impl QrCodeEndpoint {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Image URL for a square QR code encoding `payload`.
    pub fn image_url(&self, size: u32, payload: &str) -> String {
        let data: String = form_urlencoded::byte_serialize(payload.as_bytes()).collect();
        format!("{}?size={size}x{size}&data={data}", self.base)
    }
}

impl Default for QrCodeEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_QR_ENDPOINT)
    }
}
