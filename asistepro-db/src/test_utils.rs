use asistepro_api::Campus;
use chrono::{Duration, NaiveDate};
use heapless::String as HeaplessString;
use uuid::Uuid;

use crate::models::{AttendanceModel, CourseModel, MasterParticipantModel};
use crate::utils::store_timestamp;

pub fn create_test_course(name: &str) -> CourseModel {
    CourseModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from(name).unwrap(),
        location: HeaplessString::try_from("Valparaíso").unwrap(),
        provider: HeaplessString::try_from("Unidad de Acompañamiento Docente").unwrap(),
        date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        time: None,
        person_in_charge: Some(HeaplessString::try_from("María Soto").unwrap()),
        duration_minutes: Some(90),
        is_visible: true,
        created_at: store_timestamp(),
    }
}

/// Attendance registered `offset_secs` after now, so ordering by `created_at` is deterministic.
pub fn create_test_attendance(
    course_id: Uuid,
    first_names: &str,
    paternal_last_name: &str,
    rut: &str,
    offset_secs: i64,
) -> AttendanceModel {
    AttendanceModel {
        id: Uuid::new_v4(),
        course_id,
        first_names: HeaplessString::try_from(first_names).unwrap(),
        paternal_last_name: HeaplessString::try_from(paternal_last_name).unwrap(),
        maternal_last_name: HeaplessString::try_from("Rojas").unwrap(),
        rut: HeaplessString::try_from(rut).unwrap(),
        email: HeaplessString::try_from("participante@upla.cl").unwrap(),
        phone: HeaplessString::try_from("+56912345678").unwrap(),
        role: HeaplessString::try_from("Funcionario/(a)").unwrap(),
        faculty: HeaplessString::try_from("Facultad de Ingeniería").unwrap(),
        department: HeaplessString::try_from("Sin Departamento").unwrap(),
        major: HeaplessString::try_from("Otro").unwrap(),
        contract_type: HeaplessString::try_from("Otro").unwrap(),
        teaching_semester: HeaplessString::try_from("No Aplica").unwrap(),
        campus: Campus::Valparaiso,
        signature: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        created_at: store_timestamp() + Duration::seconds(offset_secs),
    }
}

pub fn create_test_master_participant(rut: &str, first_names: &str) -> MasterParticipantModel {
    MasterParticipantModel {
        id: Uuid::new_v4(),
        rut: HeaplessString::try_from(rut).unwrap(),
        first_names: HeaplessString::try_from(first_names).unwrap(),
        paternal_last_name: HeaplessString::try_from("Pérez").unwrap(),
        maternal_last_name: HeaplessString::try_from("Rojas").unwrap(),
        email: HeaplessString::try_from("participante@upla.cl").unwrap(),
        phone: HeaplessString::try_from("+56912345678").unwrap(),
        role: HeaplessString::try_from("Funcionario/(a)").unwrap(),
        faculty: HeaplessString::try_from("Facultad de Ingeniería").unwrap(),
        department: HeaplessString::try_from("Sin Departamento").unwrap(),
        updated_at: store_timestamp(),
    }
}
