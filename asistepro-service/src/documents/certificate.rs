use asistepro_api::{
    escape_html, format_duration_hours, format_long_date, QrCodeEndpoint, VerificationLinks,
};
use asistepro_db::models::{AttendanceModel, CourseModel};

use super::{RenderedDocument, CERTIFICATE_QR_SIZE};

const PDF_LIBRARY_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/html2pdf.js/0.10.1/html2pdf.bundle.min.js";
const LOGO_URL: &str =
    "https://raw.githubusercontent.com/vdhuerta/assets-aplications/main/Logo%20UAD%20Redondo.png";

const CERTIFICATE_STYLES: &str = r#"
  @import url('https://fonts.googleapis.com/css2?family=Poppins:wght@300;400;500;600;700&display=swap');
  @import url('https://fonts.googleapis.com/css2?family=Playfair+Display:wght@700&display=swap');
  body { margin: 0; padding: 2rem; font-family: 'Poppins', sans-serif; background-color: #e0e5ec;
    -webkit-print-color-adjust: exact; color-adjust: exact; display: flex; flex-direction: column;
    justify-content: center; align-items: center; min-height: 100vh; }
  .page { width: 11in; height: 8.5in; box-sizing: border-box; border: 10px solid #003366; background: #fff;
    padding: 0.5in; display: flex; flex-direction: column; box-shadow: 0 10px 25px rgba(0,0,0,0.1); }
  .layout-table { width: 100%; height: 100%; border-collapse: collapse; table-layout: fixed; }
  .header-cell { height: 1.2in; vertical-align: top; padding-bottom: 0.4in; border-bottom: 2px solid #003366; }
  .header-content { display: flex; justify-content: space-between; align-items: flex-start; }
  .header-content img { width: 1in; height: auto; }
  .header-text { text-align: right; color: #0055a4; }
  .header-text h1 { font-family: 'Playfair Display', serif; font-size: 20pt; margin: 0; }
  .header-text p { font-size: 9pt; margin: 0; }
  .content-cell { vertical-align: middle; text-align: center; padding: 0.2in 0; }
  .content-cell h2 { font-family: 'Playfair Display', serif; font-size: 28pt; color: #003366; margin: 0 0 0.3in 0; }
  .content-cell p { font-size: 12pt; color: #333; line-height: 1.6; margin: 0.2in 0; }
  .participant-name { font-weight: 700; font-size: 18pt; color: #0055a4; margin-top: 0.3in; margin-bottom: 0.1in; }
  .participant-rut { font-size: 11pt; color: #444; margin-bottom: 0.3in; }
  .course-name { font-weight: 600; font-style: italic; }
  .course-duration { font-size: 11pt; color: #555; margin-top: 0.5rem; }
  .footer-cell { height: 0.8in; vertical-align: bottom; padding-top: 0.4in; border-top: 2px solid #003366; }
  .footer-content { display: flex; justify-content: space-between; align-items: flex-end; }
  .verification { display: flex; align-items: center; gap: 0.15in; }
  .verification-text { font-size: 6pt; color: #555; }
  .verification-text p { margin: 0; }
  .verification-text code { font-size: 5.5pt; word-break: break-all; }
  .date-location { text-align: right; font-size: 10pt; font-weight: 500; color: #003366; }
  .print-button-container { display: flex; justify-content: center; gap: 1rem; margin-top: 2rem; padding-bottom: 2rem; }
  .print-button { background-color: #e0e5ec; border: none; border-radius: 12px; padding: 12px 24px; font-size: 16px;
    font-family: 'Poppins', sans-serif; font-weight: 600; color: #003366; cursor: pointer;
    box-shadow: 5px 5px 10px #c7ced4, -5px -5px 10px #ffffff; }
  .print-button:disabled { opacity: 0.7; cursor: wait; }
  @media print {
    body { padding: 0; background-color: #fff; }
    .page { margin: 0; box-shadow: none; width: 100%; height: 100%; }
    .print-button-container { display: none !important; }
  }
"#;

/// Participation certificate for one attendance record.
#[derive(Debug, Clone)]
pub struct CertificateTemplate<'a> {
    pub course: &'a CourseModel,
    pub attendance: &'a AttendanceModel,
    pub verification_id: &'a str,
    pub links: &'a VerificationLinks,
    pub qr: &'a QrCodeEndpoint,
    /// Adds the back and PDF buttons plus the script that drives them.
    /// The document stays fully viewable without it.
    pub with_actions: bool,
}

impl CertificateTemplate<'_> {
    /// `Constancia_<First>_<Paternal>` with whitespace runs turned into `_`.
    pub fn file_stem(&self) -> String {
        let name = format!(
            "{} {}",
            self.attendance.first_names, self.attendance.paternal_last_name
        );
        format!("Constancia_{}", name.split_whitespace().collect::<Vec<_>>().join("_"))
    }

    pub fn render(&self) -> RenderedDocument {
        let attendance = self.attendance;
        let course = self.course;
        let verification_url = self.links.certificate_url(self.verification_id);
        let qr_url = self.qr.image_url(CERTIFICATE_QR_SIZE, &verification_url);
        let file_stem = self.file_stem();

        let title = format!(
            "Constancia de Participación - {} {}",
            attendance.first_names, attendance.paternal_last_name
        );

        let (library, actions) = if self.with_actions {
            (
                format!(r#"<script src="{PDF_LIBRARY_URL}"></script>"#),
                actions_markup(&file_stem),
            )
        } else {
            (String::new(), String::new())
        };

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="UTF-8" />
    <title>{title}</title>
    <style>{CERTIFICATE_STYLES}</style>
    {library}
  </head>
  <body>
    <div class="page" id="constancia-page">
      <table class="layout-table">
        <tbody>
          <tr class="header-row">
            <td class="header-cell">
              <div class="header-content">
                <img src="{LOGO_URL}" alt="Logo UAD" />
                <div class="header-text">
                  <h1>Unidad de Acompañamiento Docente</h1>
                  <p>Vicerrectoría Académica</p>
                </div>
              </div>
            </td>
          </tr>
          <tr class="content-row">
            <td class="content-cell">
              <h2>Constancia de Participación</h2>
              <p>La Unidad de Acompañamiento Docente (UAD) otorga la presente constancia a:</p>
              <p class="participant-name">{name}</p>
              <p class="participant-rut">RUT: {rut}</p>
              <p>Por su destacada participación en el curso:<br/><span class="course-name">"{course_name}"</span>.</p>
              <p class="course-duration">Duración: {duration} Horas</p>
            </td>
          </tr>
          <tr class="footer-row">
            <td class="footer-cell">
              <div class="footer-content">
                <div class="verification">
                  <img src="{qr_url}" alt="Código QR de Verificación" />
                  <div class="verification-text">
                    <p><strong>Verificar Constancia:</strong></p>
                    <p>Escanee el código QR para validar este documento.</p>
                    <p>ID: <code>{verification_id}</code></p>
                  </div>
                </div>
                <div class="date-location">
                  <p>{location}, {date}</p>
                </div>
              </div>
            </td>
          </tr>
        </tbody>
      </table>
    </div>
    {actions}
  </body>
</html>
"#,
            title = escape_html(&title),
            name = escape_html(&attendance.full_name()),
            rut = escape_html(&attendance.rut),
            course_name = escape_html(&course.name),
            duration = format_duration_hours(course.duration_minutes),
            qr_url = escape_html(&qr_url),
            verification_id = escape_html(self.verification_id),
            location = escape_html(&course.location),
            date = format_long_date(course.date),
        );

        RenderedDocument {
            file_name: format!("{file_stem}.html"),
            title,
            html,
        }
    }
}

fn actions_markup(file_stem: &str) -> String {
    // The file name ends up inside a JS string literal.
    let pdf_name: String = file_stem
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    format!(
        r#"<div class="print-button-container">
      <button id="backBtn" class="print-button">Volver</button>
      <button id="pdfBtn" class="print-button">Convertir a PDF</button>
    </div>
    <script>
      document.addEventListener('DOMContentLoaded', function () {{
        var back = document.getElementById('backBtn');
        if (back) {{ back.addEventListener('click', function () {{ window.close(); }}); }}
        var btn = document.getElementById('pdfBtn');
        if (!btn) return;
        var original = btn.innerHTML;
        btn.addEventListener('click', function () {{
          if (btn.disabled) return;
          if (typeof html2pdf === 'undefined') {{
            alert('Error: La librería de generación de PDF no se pudo cargar. Verifique su conexión a internet.');
            return;
          }}
          btn.disabled = true;
          btn.innerHTML = 'Generando PDF...';
          html2pdf().from(document.getElementById('constancia-page')).set({{
            margin: 0,
            filename: '{pdf_name}.pdf',
            image: {{ type: 'jpeg', quality: 0.98 }},
            html2canvas: {{ scale: 3, useCORS: true, letterRendering: true }},
            jsPDF: {{ unit: 'in', format: 'letter', orientation: 'landscape' }}
          }}).save()
            .catch(function () {{ alert('Ocurrió un error al generar el PDF.'); }})
            .finally(function () {{ btn.disabled = false; btn.innerHTML = original; }});
        }});
      }});
    </script>"#
    )
}
