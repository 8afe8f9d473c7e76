use asistepro_api::{QrCodeEndpoint, VerificationLinks};
use asistepro_db::models::{
    AttendanceModel, CertificateVerificationModel, CourseModel, ReportVerificationModel,
};
use asistepro_db::utils::store_timestamp;
use asistepro_db::{StoreError, Stores};
use heapless::String as HeaplessString;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use super::presenter::{DocumentPresenter, PresentationError};
use super::{CertificateTemplate, RenderedDocument, ReportTemplate};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Course '{course}' has no registered participants")]
    EmptyCourse { course: String },

    #[error("Participants could not be loaded: {0}")]
    Load(StoreError),

    /// The verification record was not saved; no document was produced.
    #[error("Verification record could not be saved: {0}")]
    Persistence(StoreError),

    /// The verification record was saved and stays valid; only the display failed.
    #[error("Document {verification_id} could not be presented: {source}")]
    Presentation {
        verification_id: Uuid,
        #[source]
        source: PresentationError,
    },
}

impl DocumentError {
    /// Spanish notification shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            DocumentError::EmptyCourse { .. } => {
                "No hay participantes para generar el documento.".to_string()
            }
            DocumentError::Load(err) => {
                format!("No se pudo cargar la lista de participantes: {err}")
            }
            DocumentError::Persistence(err) if err.is_configuration_problem() => format!(
                "No se pudo crear el registro de verificación. Es posible que la tabla '{}' no exista o no tenga los permisos correctos. Detalles: {err}",
                err.table().map(|t| t.name()).unwrap_or("desconocida")
            ),
            DocumentError::Persistence(err) => format!(
                "No se pudo crear el registro de verificación por un error temporal. Intente nuevamente. Detalles: {err}"
            ),
            DocumentError::Presentation { verification_id, .. } => format!(
                "No se pudo abrir el documento. Por favor, deshabilite el bloqueador de ventanas emergentes para este sitio. El código de verificación {verification_id} ya fue registrado."
            ),
        }
    }
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub verification_id: Uuid,
    pub document: RenderedDocument,
    pub location: String,
}

/// Produces certificates and attendance reports.
///
/// Every generation follows the same order: the verification record is persisted, then the document is
/// rendered, then it is presented. A document is never rendered for a record that did not save.
pub struct DocumentGenerator {
    stores: Stores,
    links: VerificationLinks,
    qr: QrCodeEndpoint,
    presenter: Arc<dyn DocumentPresenter>,
    certificate_actions: bool,
}

impl DocumentGenerator {
    pub fn new(
        stores: Stores,
        links: VerificationLinks,
        qr: QrCodeEndpoint,
        presenter: Arc<dyn DocumentPresenter>,
    ) -> Self {
        Self {
            stores,
            links,
            qr,
            presenter,
            certificate_actions: true,
        }
    }

    /// Toggles the back/PDF buttons on generated certificates.
    pub fn with_certificate_actions(mut self, enabled: bool) -> Self {
        self.certificate_actions = enabled;
        self
    }

    pub async fn generate_certificate(
        &self,
        course: &CourseModel,
        attendance: &AttendanceModel,
    ) -> Result<GeneratedDocument, DocumentError> {
        let record = CertificateVerificationModel {
            id: Uuid::new_v4(),
            course_id: Some(course.id),
            attendance_id: Some(attendance.id),
            participant_name: snapshot_text(&attendance.full_name()),
            participant_rut: attendance.rut.clone(),
            course_name: course.name.clone(),
            generated_at: store_timestamp(),
        };
        let verification_id = record.id;

        self.stores
            .certificate_verifications
            .create_batch(vec![record])
            .await
            .map_err(|err| {
                error!(%verification_id, error = %err, "certificate verification record not saved");
                DocumentError::Persistence(err)
            })?;
        info!(%verification_id, attendance_id = %attendance.id, "certificate verification record saved");

        let id_text = verification_id.to_string();
        let document = CertificateTemplate {
            course,
            attendance,
            verification_id: &id_text,
            links: &self.links,
            qr: &self.qr,
            with_actions: self.certificate_actions,
        }
        .render();

        self.present(verification_id, document).await
    }

    pub async fn generate_report(&self, course: &CourseModel) -> Result<GeneratedDocument, DocumentError> {
        let participants = self
            .stores
            .attendance
            .find_by_course_id(course.id)
            .await
            .map_err(DocumentError::Load)?;
        if participants.is_empty() {
            return Err(DocumentError::EmptyCourse {
                course: course.name.to_string(),
            });
        }

        let record = ReportVerificationModel {
            id: Uuid::new_v4(),
            course_id: Some(course.id),
            course_name: course.name.clone(),
            course_location: Some(course.location.clone()),
            course_provider: Some(course.provider.clone()),
            person_in_charge: course.person_in_charge.clone(),
            participant_count: i32::try_from(participants.len()).unwrap_or(i32::MAX),
            generated_at: store_timestamp(),
        };
        let verification_id = record.id;

        self.stores
            .report_verifications
            .create_batch(vec![record])
            .await
            .map_err(|err| {
                error!(%verification_id, error = %err, "report verification record not saved");
                DocumentError::Persistence(err)
            })?;
        info!(%verification_id, course_id = %course.id, participants = participants.len(), "report verification record saved");

        let id_text = verification_id.to_string();
        let document = ReportTemplate {
            course,
            participants: &participants,
            verification_id: &id_text,
            links: &self.links,
            qr: &self.qr,
        }
        .render();

        self.present(verification_id, document).await
    }

    async fn present(
        &self,
        verification_id: Uuid,
        document: RenderedDocument,
    ) -> Result<GeneratedDocument, DocumentError> {
        match self.presenter.present(&document).await {
            Ok(location) => Ok(GeneratedDocument {
                verification_id,
                document,
                location,
            }),
            Err(source) => {
                error!(%verification_id, error = %source, "document not presented; verification record kept");
                Err(DocumentError::Presentation {
                    verification_id,
                    source,
                })
            }
        }
    }
}

/// Copies text into a snapshot column, cutting at a character boundary when it does not fit.
fn snapshot_text<const N: usize>(value: &str) -> HeaplessString<N> {
    let mut out = HeaplessString::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use asistepro_db::test_utils::{create_test_attendance, create_test_course};
    use asistepro_db::{MemoryStore, Table};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio_test::{assert_err, assert_ok};

    /// Keeps presented documents in memory; optionally refuses them like a popup blocker.
    #[derive(Default)]
    struct RecordingPresenter {
        blocked: bool,
        shown: Mutex<Vec<RenderedDocument>>,
    }

    #[async_trait]
    impl DocumentPresenter for RecordingPresenter {
        async fn present(&self, document: &RenderedDocument) -> Result<String, PresentationError> {
            if self.blocked {
                return Err(PresentationError::Blocked("popup blocked".to_string()));
            }
            self.shown.lock().push(document.clone());
            Ok(format!("memory://{}", document.file_name))
        }
    }

    fn generator(store: &Arc<MemoryStore>, presenter: Arc<RecordingPresenter>) -> DocumentGenerator {
        DocumentGenerator::new(
            store.stores(),
            VerificationLinks::new("https://asiste.example.cl"),
            QrCodeEndpoint::default(),
            presenter,
        )
    }

    #[tokio::test]
    async fn test_certificate_for_ana_perez_is_verifiable() {
        let store = MemoryStore::new();
        let presenter = Arc::new(RecordingPresenter::default());
        let mut course = create_test_course("Taller X");
        course.duration_minutes = Some(75);
        let mut attendance = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);
        attendance.maternal_last_name.clear();

        let generated = assert_ok!(
            generator(&store, presenter.clone())
                .generate_certificate(&course, &attendance)
                .await
        );
        assert!(generated.document.html.contains("1,3 Horas"));
        assert!(generated
            .document
            .html
            .contains(&format!("%3Fconstancia%3D{}", generated.verification_id)));
        assert_eq!(presenter.shown.lock().len(), 1);

        let record = assert_ok!(
            store
                .stores()
                .certificate_verifications
                .load(generated.verification_id)
                .await
        );
        assert_eq!(record.participant_name.as_str(), "Ana Pérez");
        assert_eq!(record.course_name.as_str(), "Taller X");
        assert_eq!(record.participant_rut.as_str(), "12345678-5");
        assert_eq!(record.attendance_id, Some(attendance.id));
    }

    #[tokio::test]
    async fn test_failed_persistence_never_presents() {
        let store = MemoryStore::new();
        store.fail_with(
            Table::CertificateVerifications,
            StoreError::PermissionDenied {
                table: Table::CertificateVerifications,
                message: "new row violates row-level security policy".to_string(),
            },
        );
        let presenter = Arc::new(RecordingPresenter::default());
        let course = create_test_course("Taller X");
        let attendance = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);

        let err = assert_err!(
            generator(&store, presenter.clone())
                .generate_certificate(&course, &attendance)
                .await
        );
        assert!(matches!(err, DocumentError::Persistence(_)));
        assert!(err.user_message().contains("constancia_verificaciones"));
        assert!(presenter.shown.lock().is_empty());
    }

    #[tokio::test]
    async fn test_transient_persistence_failure_message() {
        let store = MemoryStore::new();
        store.fail_with(
            Table::ReportVerifications,
            StoreError::Unavailable("connection reset".to_string()),
        );
        let presenter = Arc::new(RecordingPresenter::default());
        let course = create_test_course("Taller X");
        store.seed(vec![create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0)]);

        let err = assert_err!(generator(&store, presenter.clone()).generate_report(&course).await);
        assert!(matches!(err, DocumentError::Persistence(_)));
        assert!(err.user_message().contains("error temporal"));
        assert!(presenter.shown.lock().is_empty());
    }

    #[tokio::test]
    async fn test_blocked_presentation_keeps_verification_record() {
        let store = MemoryStore::new();
        let presenter = Arc::new(RecordingPresenter {
            blocked: true,
            ..Default::default()
        });
        let course = create_test_course("Taller X");
        let attendance = create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0);

        let err = assert_err!(
            generator(&store, presenter)
                .generate_certificate(&course, &attendance)
                .await
        );
        let DocumentError::Presentation { verification_id, .. } = &err else {
            panic!("expected a presentation failure, got {err:?}");
        };
        let rows = store.rows::<CertificateVerificationModel>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, *verification_id);
        assert!(err.user_message().contains(&verification_id.to_string()));
    }

    #[tokio::test]
    async fn test_report_snapshots_course_and_count() {
        let store = MemoryStore::new();
        let presenter = Arc::new(RecordingPresenter::default());
        let course = create_test_course("Taller X");
        store.seed(vec![
            create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0),
            create_test_attendance(course.id, "Luis", "Soto", "11111111-1", 1),
            create_test_attendance(Uuid::new_v4(), "Eva", "Lagos", "22222222-2", 2),
        ]);

        let generated = assert_ok!(generator(&store, presenter.clone()).generate_report(&course).await);
        assert!(generated.document.html.contains("Participantes Registrados (2)"));
        assert_eq!(generated.location, "memory://asistencia_taller_x_05-03-2025.html");

        let rows = store.rows::<ReportVerificationModel>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, generated.verification_id);
        assert_eq!(rows[0].participant_count, 2);
        assert_eq!(rows[0].course_name.as_str(), "Taller X");
        assert_eq!(
            rows[0].person_in_charge.as_ref().map(|p| p.as_str()),
            Some("María Soto")
        );
    }

    #[tokio::test]
    async fn test_empty_course_is_refused_before_any_write() {
        let store = MemoryStore::new();
        let presenter = Arc::new(RecordingPresenter::default());
        let course = create_test_course("Taller X");

        let err = assert_err!(generator(&store, presenter.clone()).generate_report(&course).await);
        assert!(matches!(err, DocumentError::EmptyCourse { .. }));
        assert_eq!(store.counts(Table::ReportVerifications).writes, 0);
        assert!(presenter.shown.lock().is_empty());
    }

    #[test]
    fn test_snapshot_text_cuts_on_char_boundary() {
        let cut: HeaplessString<5> = snapshot_text("Peñalolén");
        assert_eq!(cut.as_str(), "Peña");
    }
}
