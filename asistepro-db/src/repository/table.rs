/// Named tables of the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Courses,
    Attendance,
    ReportVerifications,
    CertificateVerifications,
    MasterParticipants,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Courses,
        Table::Attendance,
        Table::ReportVerifications,
        Table::CertificateVerifications,
        Table::MasterParticipants,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Courses => "cursos",
            Table::Attendance => "asistencias",
            Table::ReportVerifications => "reporte_verificaciones",
            Table::CertificateVerifications => "constancia_verificaciones",
            Table::MasterParticipants => "participantes_maestro",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
