use asistepro_api::{ApiResult, Route};
use asistepro_db::models::CourseModel;
use asistepro_db::Stores;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::courses::CourseAdmin;
use crate::documents::{DocumentGenerator, DocumentPresenter};
use crate::registration::RegistrationService;
use crate::search::RutLookup;
use crate::verification::{CertificateVerificationPage, ReportVerificationPage};

/// The view opened for a page URL.
pub enum AppView {
    /// The store is not configured; nothing else can work.
    NotConfigured,
    Registration { courses: Vec<CourseModel> },
    CertificateVerification(CertificateVerificationPage),
    ReportVerification(ReportVerificationPage),
}

/// Explicitly constructed application handle: configuration plus the store it points at.
#[derive(Clone)]
pub struct AppContext {
    config: AppConfig,
    stores: Stores,
}

impl AppContext {
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        Self { config, stores }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Resolves the page URL to a view. Verification pages come back already resolved.
    pub async fn open(&self, page_url: &str) -> ApiResult<AppView> {
        if !self.is_configured() {
            warn!("store is not configured");
            return Ok(AppView::NotConfigured);
        }

        match Route::from_url(page_url)? {
            Route::ReportVerification(id) => {
                debug!(verification_id = %id, "opening report verification");
                let mut page = ReportVerificationPage::new(self.stores.clone(), id);
                page.load().await;
                Ok(AppView::ReportVerification(page))
            }
            Route::CertificateVerification(id) => {
                debug!(verification_id = %id, "opening certificate verification");
                let mut page = CertificateVerificationPage::new(self.stores.clone(), id);
                page.load().await;
                Ok(AppView::CertificateVerification(page))
            }
            Route::Registration => {
                let courses = self.stores.courses.find_visible().await?;
                Ok(AppView::Registration { courses })
            }
        }
    }

    pub fn registration(&self) -> RegistrationService {
        RegistrationService::new(self.stores.clone())
    }

    pub fn rut_lookup(&self, course_id: Uuid) -> RutLookup {
        RutLookup::new(
            self.stores.attendance.clone(),
            self.stores.master_participants.clone(),
            course_id,
            self.config.debounce,
        )
    }

    pub fn documents(&self, presenter: Arc<dyn DocumentPresenter>) -> DocumentGenerator {
        DocumentGenerator::new(
            self.stores.clone(),
            self.config.links(),
            self.config.qr(),
            presenter,
        )
    }

    pub fn course_admin(&self) -> CourseAdmin {
        CourseAdmin::new(self.stores.clone())
    }
}
