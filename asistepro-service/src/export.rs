use asistepro_api::{ApiError, ApiResult};
use asistepro_db::models::{AttendanceModel, CourseModel};
use asistepro_db::Stores;
use chrono::SecondsFormat;
use tracing::info;

use crate::documents::report::attendance_file_stem;

pub const CSV_HEADERS: [&str; 14] = [
    "Nombres",
    "Apellido Paterno",
    "Apellido Materno",
    "RUT",
    "Email",
    "Teléfono",
    "Rol",
    "Facultad",
    "Departamento",
    "Carrera",
    "Tipo Contrato",
    "Semestre Docencia",
    "Sede",
    "Fecha de Registro",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}

/// Attendance of `course` as CSV, oldest registration first.
pub async fn export_attendance_csv(stores: &Stores, course: &CourseModel) -> ApiResult<CsvExport> {
    let participants = stores.attendance.find_by_course_id(course.id).await?;
    if participants.is_empty() {
        return Err(ApiError::validation(
            "No hay participantes registrados para descargar en este curso.",
        ));
    }

    let content = attendance_csv(&participants)?;
    info!(course_id = %course.id, rows = participants.len(), "attendance exported");
    Ok(CsvExport {
        file_name: format!("{}.csv", attendance_file_stem(course)),
        content,
        rows: participants.len(),
    })
}

pub fn attendance_csv(participants: &[AttendanceModel]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(csv_error)?;
    for p in participants {
        let campus = p.campus.to_string();
        let registered_at = p.created_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        writer
            .write_record([
                p.first_names.as_str(),
                p.paternal_last_name.as_str(),
                p.maternal_last_name.as_str(),
                p.rut.as_str(),
                p.email.as_str(),
                p.phone.as_str(),
                p.role.as_str(),
                p.faculty.as_str(),
                p.department.as_str(),
                p.major.as_str(),
                p.contract_type.as_str(),
                p.teaching_semester.as_str(),
                campus.as_str(),
                registered_at.as_str(),
            ])
            .map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ApiError::InternalError(format!("CSV buffer could not be flushed: {err}")))?;
    String::from_utf8(bytes).map_err(|err| ApiError::InternalError(format!("CSV is not UTF-8: {err}")))
}

fn csv_error(err: csv::Error) -> ApiError {
    ApiError::InternalError(format!("CSV could not be written: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asistepro_db::test_utils::{create_test_attendance, create_test_course};
    use asistepro_db::MemoryStore;
    use heapless::String as HeaplessString;
    use tokio_test::assert_err;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_export_writes_header_and_rows_in_registration_order() {
        let store = MemoryStore::new();
        let course = create_test_course("Taller de Evaluación");
        store.seed(vec![
            create_test_attendance(course.id, "Luis", "Soto", "11111111-1", 10),
            create_test_attendance(course.id, "Ana", "Pérez", "12345678-5", 0),
            create_test_attendance(Uuid::new_v4(), "Eva", "Lagos", "22222222-2", 5),
        ]);

        let export = export_attendance_csv(&store.stores(), &course).await.unwrap();
        assert_eq!(export.file_name, "asistencia_taller_de_evaluaci_n_05-03-2025.csv");
        assert_eq!(export.rows, 2);

        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADERS.join(","));
        assert!(lines[1].starts_with("Ana,Pérez,Rojas,12345678-5,"));
        assert!(lines[2].starts_with("Luis,Soto,Rojas,11111111-1,"));
        assert!(lines[1].contains(",Valparaíso,"));
    }

    #[test]
    fn test_values_with_commas_and_quotes_are_quoted() {
        let mut participant = create_test_attendance(Uuid::new_v4(), "Ana", "Pérez", "12345678-5", 0);
        participant.department = HeaplessString::try_from("Física, \"Teórica\"").unwrap();

        let content = attendance_csv(&[participant]).unwrap();
        assert!(content.contains(r#","Física, ""Teórica""","#));
    }

    #[tokio::test]
    async fn test_empty_course_is_a_validation_error() {
        let store = MemoryStore::new();
        let course = create_test_course("Taller X");

        let err = assert_err!(export_attendance_csv(&store.stores(), &course).await);
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
