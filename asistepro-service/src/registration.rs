use asistepro_api::{
    bounded, is_catalog_value, ApiError, Campus, Rut, SignaturePad, CONTRACT_TYPES, DEPARTMENTS,
    FACULTIES, MAJORS, ROLES, TEACHING_SEMESTERS,
};
use asistepro_db::models::{AttendanceModel, CourseModel, MasterParticipantModel};
use asistepro_db::utils::store_timestamp;
use asistepro_db::Stores;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid registration form: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("A signature is required")]
    MissingSignature,

    #[error("RUT {rut} is already registered in this course")]
    Duplicate { rut: String },

    #[error("Invalid field: {0}")]
    Field(String),

    #[error(transparent)]
    Store(ApiError),
}

impl From<ApiError> for RegistrationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationError(message) => RegistrationError::Field(message),
            other => RegistrationError::Store(other),
        }
    }
}

impl RegistrationError {
    /// Local failures never reached the store.
    pub fn is_local(&self) -> bool {
        !matches!(self, RegistrationError::Store(_))
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Store(api) => api,
            other => ApiError::ValidationError(other.to_string()),
        }
    }
}

fn validate_rut(value: &str) -> Result<(), ValidationError> {
    Rut::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("rut"))
}

fn catalog_member(catalog: &[&str], value: &str, code: &'static str) -> Result<(), ValidationError> {
    if is_catalog_value(catalog, value) {
        Ok(())
    } else {
        Err(ValidationError::new(code))
    }
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    catalog_member(ROLES, value, "role")
}

fn validate_faculty(value: &str) -> Result<(), ValidationError> {
    catalog_member(FACULTIES, value, "faculty")
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    catalog_member(DEPARTMENTS, value, "department")
}

fn validate_major(value: &str) -> Result<(), ValidationError> {
    catalog_member(MAJORS, value, "major")
}

fn validate_contract_type(value: &str) -> Result<(), ValidationError> {
    catalog_member(CONTRACT_TYPES, value, "contract_type")
}

fn validate_teaching_semester(value: &str) -> Result<(), ValidationError> {
    catalog_member(TEACHING_SEMESTERS, value, "teaching_semester")
}

fn validate_campus(value: &str) -> Result<(), ValidationError> {
    Campus::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("campus"))
}

/// Field values as typed by the participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 100))]
    pub first_names: String,

    #[validate(length(min = 1, max = 50))]
    pub paternal_last_name: String,

    #[validate(length(min = 1, max = 50))]
    pub maternal_last_name: String,

    #[validate(custom(function = "validate_rut"))]
    pub rut: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    #[validate(custom(function = "validate_role"))]
    pub role: String,

    #[validate(custom(function = "validate_faculty"))]
    pub faculty: String,

    #[validate(custom(function = "validate_department"))]
    pub department: String,

    #[validate(custom(function = "validate_major"))]
    pub major: String,

    #[validate(custom(function = "validate_contract_type"))]
    pub contract_type: String,

    #[validate(custom(function = "validate_teaching_semester"))]
    pub teaching_semester: String,

    #[validate(custom(function = "validate_campus"))]
    pub campus: String,
}

impl RegistrationForm {
    fn fields(&self) -> [&str; 13] {
        [
            self.first_names.as_str(),
            self.paternal_last_name.as_str(),
            self.maternal_last_name.as_str(),
            self.rut.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.role.as_str(),
            self.faculty.as_str(),
            self.department.as_str(),
            self.major.as_str(),
            self.contract_type.as_str(),
            self.teaching_semester.as_str(),
            self.campus.as_str(),
        ]
    }

    /// Submit button state: every field filled and the pad signed.
    pub fn can_submit(&self, has_signature: bool) -> bool {
        has_signature && self.fields().iter().all(|f| !f.trim().is_empty())
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            first_names: self.first_names.trim().to_string(),
            paternal_last_name: self.paternal_last_name.trim().to_string(),
            maternal_last_name: self.maternal_last_name.trim().to_string(),
            rut: self.rut.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role: self.role.trim().to_string(),
            faculty: self.faculty.trim().to_string(),
            department: self.department.trim().to_string(),
            major: self.major.trim().to_string(),
            contract_type: self.contract_type.trim().to_string(),
            teaching_semester: self.teaching_semester.trim().to_string(),
            campus: self.campus.trim().to_string(),
        }
    }

    /// Fills the personal fields from a directory entry picked in the autocomplete.
    pub fn apply_suggestion(&mut self, entry: &MasterParticipantModel) {
        self.rut = entry.rut.to_string();
        self.first_names = entry.first_names.to_string();
        self.paternal_last_name = entry.paternal_last_name.to_string();
        self.maternal_last_name = entry.maternal_last_name.to_string();
        self.email = entry.email.to_string();
        self.phone = entry.phone.to_string();
        self.role = entry.role.to_string();
        self.faculty = entry.faculty.to_string();
        self.department = entry.department.to_string();
    }

    fn to_attendance(
        &self,
        course_id: Uuid,
        rut: &Rut,
        signature: String,
    ) -> Result<AttendanceModel, ApiError> {
        let campus = Campus::from_str(&self.campus)
            .map_err(|_| ApiError::validation(format!("Unknown campus '{}'", self.campus)))?;
        Ok(AttendanceModel {
            id: Uuid::new_v4(),
            course_id,
            first_names: bounded("first_names", &self.first_names)?,
            paternal_last_name: bounded("paternal_last_name", &self.paternal_last_name)?,
            maternal_last_name: bounded("maternal_last_name", &self.maternal_last_name)?,
            rut: rut.to_heapless(),
            email: bounded("email", &self.email)?,
            phone: bounded("phone", &self.phone)?,
            role: bounded("role", &self.role)?,
            faculty: bounded("faculty", &self.faculty)?,
            department: bounded("department", &self.department)?,
            major: bounded("major", &self.major)?,
            contract_type: bounded("contract_type", &self.contract_type)?,
            teaching_semester: bounded("teaching_semester", &self.teaching_semester)?,
            campus,
            signature,
            created_at: store_timestamp(),
        })
    }
}

pub struct RegistrationService {
    stores: Stores,
}

impl RegistrationService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Registers attendance of the form's participant in `course`.
    ///
    /// Validation, the signature and the duplicate check all run before anything is written.
    /// The attendance row is the registration; refreshing the participant directory afterwards
    /// is best effort and only logged when it fails.
    pub async fn submit(
        &self,
        course: &CourseModel,
        form: &RegistrationForm,
        pad: &SignaturePad,
    ) -> Result<AttendanceModel, RegistrationError> {
        let form = form.trimmed();
        form.validate()?;
        let rut = Rut::parse(&form.rut)?;

        let signature = pad.snapshot()?.ok_or(RegistrationError::MissingSignature)?;
        let attendance = form.to_attendance(course.id, &rut, signature)?;

        let canonical_rut = rut.to_string();
        let existing = self
            .stores
            .attendance
            .find_by_course_id_and_rut(course.id, &canonical_rut)
            .await
            .map_err(ApiError::from)?;
        if existing.is_some() {
            return Err(RegistrationError::Duplicate { rut: canonical_rut });
        }

        let mut created = self
            .stores
            .attendance
            .create_batch(vec![attendance])
            .await
            .map_err(ApiError::from)?;
        let attendance = created
            .pop()
            .ok_or_else(|| ApiError::InternalError("Store returned no attendance row".to_string()))?;
        info!(course_id = %course.id, attendance_id = %attendance.id, "attendance registered");

        if let Err(err) = self
            .stores
            .master_participants
            .upsert(MasterParticipantModel::from(&attendance))
            .await
        {
            warn!(rut = %attendance.rut, error = %err, "participant directory not updated");
        }

        Ok(attendance)
    }
}
