//! Public verification pages reached through `?constancia=<id>` and `?verificacion=<id>`.

use async_trait::async_trait;
use asistepro_api::format_timestamp;
use asistepro_db::models::{CertificateVerificationModel, ReportVerificationModel};
use asistepro_db::{StoreError, Stores};
use tracing::{debug, warn};
use uuid::Uuid;

/// Generic failure text; a missing record never uses it.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "No fue posible verificar el documento. Error al contactar la base de datos.";

/// A verification snapshot that can be looked up by its identifier.
#[async_trait]
pub trait VerificationRecord: Clone + Send + Sync + Sized + 'static {
    const LOADING_TEXT: &'static str;
    const VALID_TITLE: &'static str;
    const INVALID_TITLE: &'static str;
    const NOT_FOUND_MESSAGE: &'static str;
    const UNVERIFIED_TITLE: &'static str = "No fue posible verificar";

    async fn fetch(stores: &Stores, id: Uuid) -> Result<Self, StoreError>;

    /// Labelled values shown on the valid page, in display order.
    fn fields(&self) -> Vec<(&'static str, String)>;

    fn transport_message(_err: &StoreError) -> String {
        TRANSPORT_FAILURE_MESSAGE.to_string()
    }
}

#[async_trait]
impl VerificationRecord for CertificateVerificationModel {
    const LOADING_TEXT: &'static str = "Verificando constancia...";
    const VALID_TITLE: &'static str = "Constancia Válida";
    const INVALID_TITLE: &'static str = "Constancia Inválida";
    const NOT_FOUND_MESSAGE: &'static str =
        "El código de verificación no es válido o la constancia no fue encontrada.";

    async fn fetch(stores: &Stores, id: Uuid) -> Result<Self, StoreError> {
        stores.certificate_verifications.load(id).await
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Participante", self.participant_name.to_string()),
            ("RUT", self.participant_rut.to_string()),
            ("Curso", self.course_name.to_string()),
            ("Fecha de Generación", format_timestamp(self.generated_at)),
        ]
    }
}

#[async_trait]
impl VerificationRecord for ReportVerificationModel {
    const LOADING_TEXT: &'static str = "Verificando reporte...";
    const VALID_TITLE: &'static str = "Reporte Válido";
    const INVALID_TITLE: &'static str = "Reporte Inválido";
    const NOT_FOUND_MESSAGE: &'static str =
        "El código de verificación no es válido o el reporte no fue encontrado.";

    async fn fetch(stores: &Stores, id: Uuid) -> Result<Self, StoreError> {
        stores.report_verifications.load(id).await
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Curso", self.course_name.to_string()),
            (
                "Lugar",
                self.course_location.as_deref().unwrap_or_default().to_string(),
            ),
            (
                "Ofertante",
                self.course_provider.as_deref().unwrap_or_default().to_string(),
            ),
        ];
        if let Some(person) = &self.person_in_charge {
            fields.push(("Encargado", person.to_string()));
        }
        fields.push(("Fecha de Generación", format_timestamp(self.generated_at)));
        fields.push(("Participantes Registrados", self.participant_count.to_string()));
        fields
    }

    fn transport_message(err: &StoreError) -> String {
        if matches!(err, StoreError::SchemaMissing { .. }) {
            "La funcionalidad de verificación no está configurada correctamente. Por favor, contacte al administrador del sistema.".to_string()
        } else {
            TRANSPORT_FAILURE_MESSAGE.to_string()
        }
    }
}

/// `Loading` moves to exactly one of the other three states and stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationState<T> {
    Loading,
    Valid(T),
    NotFound,
    TransportError(String),
}

impl<T> VerificationState<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Success,
    /// The record does not exist.
    Failure,
    /// The lookup itself failed; authenticity is unknown.
    Error,
}

/// What the verification page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationView {
    pub tone: Tone,
    pub title: String,
    pub message: Option<String>,
    pub fields: Vec<(&'static str, String)>,
}

pub struct VerificationPage<T: VerificationRecord> {
    stores: Stores,
    verification_id: String,
    state: VerificationState<T>,
}

pub type CertificateVerificationPage = VerificationPage<CertificateVerificationModel>;
pub type ReportVerificationPage = VerificationPage<ReportVerificationModel>;

impl<T: VerificationRecord> VerificationPage<T> {
    pub fn new(stores: Stores, verification_id: impl Into<String>) -> Self {
        Self {
            stores,
            verification_id: verification_id.into(),
            state: VerificationState::Loading,
        }
    }

    pub fn verification_id(&self) -> &str {
        &self.verification_id
    }

    pub fn state(&self) -> &VerificationState<T> {
        &self.state
    }

    /// Performs the single lookup. Once resolved, further calls return the same state without reading
    /// again; a new page is needed to retry.
    pub async fn load(&mut self) -> &VerificationState<T> {
        if self.state.is_terminal() {
            return &self.state;
        }

        // Identifiers are always UUIDs; anything else cannot match a record.
        let Ok(id) = Uuid::parse_str(self.verification_id.trim()) else {
            debug!(verification_id = %self.verification_id, "malformed verification id");
            self.state = VerificationState::NotFound;
            return &self.state;
        };

        self.state = match T::fetch(&self.stores, id).await {
            Ok(record) => VerificationState::Valid(record),
            Err(err) if err.is_not_found() => {
                debug!(%id, "verification record not found");
                VerificationState::NotFound
            }
            Err(err) => {
                warn!(%id, error = %err, "verification lookup failed");
                VerificationState::TransportError(T::transport_message(&err))
            }
        };
        &self.state
    }

    pub fn view(&self) -> VerificationView {
        match &self.state {
            VerificationState::Loading => VerificationView {
                tone: Tone::Pending,
                title: T::LOADING_TEXT.to_string(),
                message: None,
                fields: Vec::new(),
            },
            VerificationState::Valid(record) => VerificationView {
                tone: Tone::Success,
                title: T::VALID_TITLE.to_string(),
                message: None,
                fields: record.fields(),
            },
            VerificationState::NotFound => VerificationView {
                tone: Tone::Failure,
                title: T::INVALID_TITLE.to_string(),
                message: Some(T::NOT_FOUND_MESSAGE.to_string()),
                fields: Vec::new(),
            },
            VerificationState::TransportError(message) => VerificationView {
                tone: Tone::Error,
                title: T::UNVERIFIED_TITLE.to_string(),
                message: Some(message.clone()),
                fields: Vec::new(),
            },
        }
    }
}
