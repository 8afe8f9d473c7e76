use std::sync::Arc;

use crate::models::attendance::AttendanceModel;
use crate::models::certificate_verification::CertificateVerificationModel;
use crate::models::course::CourseModel;
use crate::models::master_participant::MasterParticipantModel;
use crate::models::report_verification::ReportVerificationModel;
use crate::repository::{
    AttendanceQueries, CourseQueries, CreateBatch, Load, LoadBatch, MasterParticipantQueries,
    UpdateBatch, Upsert,
};

pub trait CourseStore:
    CreateBatch<CourseModel>
    + Load<CourseModel>
    + LoadBatch<CourseModel>
    + UpdateBatch<CourseModel>
    + CourseQueries
{
}

impl<T> CourseStore for T where
    T: CreateBatch<CourseModel>
        + Load<CourseModel>
        + LoadBatch<CourseModel>
        + UpdateBatch<CourseModel>
        + CourseQueries
{
}

pub trait AttendanceStore:
    CreateBatch<AttendanceModel> + Load<AttendanceModel> + LoadBatch<AttendanceModel> + AttendanceQueries
{
}

impl<T> AttendanceStore for T where
    T: CreateBatch<AttendanceModel>
        + Load<AttendanceModel>
        + LoadBatch<AttendanceModel>
        + AttendanceQueries
{
}

/// Verification records are immutable: create and read only.
pub trait ReportVerificationStore:
    CreateBatch<ReportVerificationModel> + Load<ReportVerificationModel>
{
}

impl<T> ReportVerificationStore for T where
    T: CreateBatch<ReportVerificationModel> + Load<ReportVerificationModel>
{
}

pub trait CertificateVerificationStore:
    CreateBatch<CertificateVerificationModel> + Load<CertificateVerificationModel>
{
}

impl<T> CertificateVerificationStore for T where
    T: CreateBatch<CertificateVerificationModel> + Load<CertificateVerificationModel>
{
}

pub trait MasterParticipantStore:
    Upsert<MasterParticipantModel> + MasterParticipantQueries
{
}

impl<T> MasterParticipantStore for T where
    T: Upsert<MasterParticipantModel> + MasterParticipantQueries
{
}

/// Explicitly constructed store handle shared by the services.
#[derive(Clone)]
pub struct Stores {
    pub courses: Arc<dyn CourseStore>,
    pub attendance: Arc<dyn AttendanceStore>,
    pub report_verifications: Arc<dyn ReportVerificationStore>,
    pub certificate_verifications: Arc<dyn CertificateVerificationStore>,
    pub master_participants: Arc<dyn MasterParticipantStore>,
}
