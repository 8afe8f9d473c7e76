use asistepro_api::{
    escape_html, format_day_month_year, format_long_date, safe_file_stem, QrCodeEndpoint,
    VerificationLinks,
};
use asistepro_db::models::{AttendanceModel, CourseModel};
use std::fmt::Write;

use super::{RenderedDocument, REPORT_QR_SIZE};

const REPORT_STYLES: &str = r#"
  @import url('https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600;700&display=swap');
  body { font-family: 'Poppins', sans-serif; background-color: #f8fafc; color: #334155; margin: 0; padding: 2rem; }
  .container { max-width: 1600px; margin: auto; background: #fff; border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); overflow: hidden; }
  header { background-color: #fecaca; padding: 2rem; text-align: center; }
  header h1 { font-size: 2rem; color: #1e3a8a; margin: 0; }
  .course-details { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 0.5rem 1rem; margin-top: 1rem; color: #4b5563; }
  .course-details p { margin: 0; }
  .course-details strong { font-weight: 600; color: #1e3a8a; }
  main { padding: 2rem; overflow-x: auto; }
  main h2 { text-align: center; color: #334155; margin-bottom: 1.5rem; }
  table { width: 100%; border-collapse: collapse; font-size: 0.8rem; }
  th, td { padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #e5e7eb; white-space: nowrap; }
  th { background-color: #f1f5f9; font-weight: 600; text-transform: uppercase; font-size: 0.7rem; color: #475569; }
  tr:nth-child(even) { background-color: #f8fafc; }
  td img { max-height: 25px; vertical-align: middle; background: #fff; border-radius: 4px; }
  footer { text-align: center; padding: 1.5rem; font-size: 0.75rem; color: #64748b; background-color: #f1f5f9; }
  .verification-section { display: flex; align-items: center; justify-content: center; gap: 2rem; }
  .verification-text { text-align: left; }
  .verification-text p { margin: 0.2rem 0; font-size: 0.7rem; }
  .verification-text code { background-color: #e2e8f0; padding: 2px 4px; border-radius: 4px; font-family: monospace; }
  @media print {
    body { padding: 0; margin: 0; background-color: #fff; }
    .container { width: 100%; max-width: 100%; margin: 0; box-shadow: none; border-radius: 0; }
    main { overflow-x: visible; }
    header, footer, tr:nth-child(even) { background-color: #fff !important; -webkit-print-color-adjust: exact; color-adjust: exact; }
    table { font-size: 9pt; }
  }
"#;

const REPORT_FOOTER: &str = "Reporte generado por AsistePRO © 2025 | UAD";

/// `asistencia_<safe course name>_<dd-mm-yyyy>`, shared by the HTML report and the CSV export.
pub fn attendance_file_stem(course: &CourseModel) -> String {
    format!(
        "asistencia_{}_{}",
        safe_file_stem(&course.name),
        format_day_month_year(course.date)
    )
}

/// Attendance roster of a course.
#[derive(Debug, Clone)]
pub struct ReportTemplate<'a> {
    pub course: &'a CourseModel,
    pub participants: &'a [AttendanceModel],
    pub verification_id: &'a str,
    pub links: &'a VerificationLinks,
    pub qr: &'a QrCodeEndpoint,
}

impl ReportTemplate<'_> {
    pub fn render(&self) -> RenderedDocument {
        let course = self.course;
        let verification_url = self.links.report_url(self.verification_id);
        let qr_url = self.qr.image_url(REPORT_QR_SIZE, &verification_url);
        let title = format!("Reporte de Asistencia - {}", course.name);

        let mut details = format!(
            "<p><strong>Lugar:</strong> {}</p>\n          <p><strong>Ofertante:</strong> {}</p>\n          <p><strong>Fecha:</strong> {}</p>",
            escape_html(&course.location),
            escape_html(&course.provider),
            format_long_date(course.date),
        );
        if let Some(person) = &course.person_in_charge {
            let _ = write!(
                details,
                "\n          <p><strong>Encargado:</strong> {}</p>",
                escape_html(person)
            );
        }

        let mut rows = String::new();
        for participant in self.participants {
            let signature = if participant.has_signature() {
                format!(
                    r#"<img src="{}" alt="Firma" />"#,
                    escape_html(&participant.signature)
                )
            } else {
                "Sin firma".to_string()
            };
            let _ = write!(
                rows,
                "\n            <tr>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n              <td>{}</td>\n            </tr>",
                escape_html(&participant.full_name()),
                escape_html(&participant.rut),
                escape_html(&participant.email),
                escape_html(&participant.faculty),
                escape_html(&participant.department),
                escape_html(&participant.major),
                escape_html(&participant.campus.to_string()),
                signature,
            );
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title_text}</title>
    <style>{REPORT_STYLES}</style>
  </head>
  <body>
    <div class="container">
      <header>
        <h1>{course_name}</h1>
        <div class="course-details">
          {details}
        </div>
      </header>
      <main>
        <h2>Participantes Registrados ({count})</h2>
        <table>
          <thead>
            <tr>
              <th>Nombre Completo</th>
              <th>RUT</th>
              <th>Correo Electrónico</th>
              <th>Facultad</th>
              <th>Departamento</th>
              <th>Carrera</th>
              <th>Sede</th>
              <th>Firma</th>
            </tr>
          </thead>
          <tbody>{rows}
          </tbody>
        </table>
      </main>
      <footer>
        <div class="verification-section">
          <img src="{qr_url}" alt="Código QR de Verificación">
          <div class="verification-text">
            <p><strong>Verificar Documento</strong></p>
            <p>Escanee el código QR para validar la autenticidad de este reporte.</p>
            <p>ID de Verificación: <code>{verification_id}</code></p>
          </div>
        </div>
        <p style="margin-top: 1.5rem;">{REPORT_FOOTER}</p>
      </footer>
    </div>
  </body>
</html>
"#,
            title_text = escape_html(&title),
            course_name = escape_html(&course.name),
            count = self.participants.len(),
            qr_url = escape_html(&qr_url),
            verification_id = escape_html(self.verification_id),
        );

        RenderedDocument {
            file_name: format!("{}.html", attendance_file_stem(course)),
            title,
            html,
        }
    }
}
