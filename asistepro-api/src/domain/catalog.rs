use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

pub const ROLES: &[&str] = &[
    "Decano/(a)",
    "Secretario /(a) Académico/(a)",
    "Director/(a) de Departamento",
    "Director/(a) de Carrera",
    "Director/a de Dirección",
    "Académico/(a) Planta",
    "Académico/(a) Honorarios",
    "Académico/(a) Contrata",
    "Académico/(a) Contrata Excepcional",
    "Académico/(a) Media Jornada",
    "Académico/(a) Jornada Completa",
    "Académico/(a) CFT",
    "Coordinación de Direcciones",
    "Coordinación de Unidades",
    "Coordinación de Carrera",
    "Coordinación de Práctica",
    "Coordinación de Doctorado",
    "Mentor /(a) Académico/(a)",
    "Asesor/(a) Pedagógico",
    "Asesor/(a) Curricular",
    "Encargado/(a) de Laboratorio",
    "Bibliotecólogo/(a)",
    "Funcionario/(a)",
    "Externo",
];

pub const FACULTIES: &[&str] = &[
    "Facultad de Humanidades",
    "Facultad de Ciencias Naturales y Exactas",
    "Facultad de Ciencias de la Educación",
    "Facultad de Arte",
    "Facultad de Ciencias de la Actividad Física y del Deporte",
    "Facultad de Ciencias Sociales",
    "Facultad de Ciencias de la Salud",
    "Facultad de Ingeniería",
    "Instituto Tecnológico Ignacio Domeyko (ITEC)",
    "Centro de Formación Técnica Estatal (CFT Estatal)",
    "Profesionales- Académicos UPLA",
    "Unidad de Acompañamiento Estudiantil",
    "Unidad de Acompañamiento Docente",
    "Vicerrectoría Académica",
    "Otro",
];

pub const DEPARTMENTS: &[&str] = &[
    "Artes Integradas",
    "Ciencias de Datos e Informática",
    "Ciencias de la Actividad Física",
    "Ciencias de la Educación",
    "Ciencias de la Ingeniería para la Sostenibilidad",
    "Ciencias del Deporte",
    "Ciencias y Geografía",
    "Educación Artística",
    "Estrategias Innovadoras para la Formación en Ciencias de la Salud",
    "Estudios Territoriales y Diálogos Interculturales",
    "Filosofía, Historia y Turismo",
    "Género, Política y Cultura",
    "Ingeniería Industrial y Gestión Organizacional",
    "Lenguas Extranjeras",
    "Literatura y Lingüística",
    "Matemática, Física y Computación",
    "Mediaciones y Subjetividades",
    "Pedagogía",
    "Rehabilitación, Intervención y Abordajes Terapéuticos",
    "Salud, Comunidad y Gestión",
    "Sin Departamento",
];

pub const MAJORS: &[&str] = &[
    "Administración Turística Multilingüe",
    "Bibliotecología",
    "Derecho Licenciatura En Ciencias Juridicas Y Sociales Bachillerato En Ciencias Sociales",
    "Dibujante Proyectista",
    "Diseño",
    "Educación Parvularia",
    "Enfermería, Licenciatura En Enfermería",
    "Fonoaudiología",
    "Geografía",
    "Ingeniería Civil Ambiental",
    "Ingeniería Civil Industrial",
    "Ingeniería Civil Informatica Licenciatura En Ciencias De La Ingeniería Bachillerato En Ingenieria",
    "Ingeniería Comercial Licenciatura En Ciencias De La Administración Bachillerato En Administracion",
    "Ingeniería En Informática",
    "Instituto Tecnológico",
    "Kinesiología",
    "Licenciatura En Arte",
    "Nutrición Dietética",
    "Pedagogía En Artes Plásticas",
    "Pedagogía En Biología Y Ciencias",
    "Pedagogía En Castellano",
    "Pedagogía En Educación Básica",
    "Pedagogía En Educación Diferencial",
    "Pedagogía En Educación Física Damas",
    "Pedagogía En Educación Física Varones",
    "Pedagogía En Educación Musical",
    "Pedagogía En Filosofía",
    "Pedagogía En Física",
    "Pedagogía En Historia Y Geografía",
    "Pedagogía En Inglés",
    "Pedagogía En Matemática",
    "Pedagogía En Química Y Ciencias",
    "Periodismo",
    "Postgrado/ Magíster En Lingüística Con Mención Dialecto Gia Hispanoam Y Chilena O Ling. Apl. E.I",
    "Postgrado/Diplomado En Gestión Cultural",
    "Postgrado/Doctorado En Literatura Hispanoamericana Contemporánea",
    "Postgrado/Doctorado Interdisciplinario En Ciencias Ambientales",
    "Postgrado/Magíster En Arte Mención Patrimonio",
    "Postgrado/Magíster En Bibliotecología E Información",
    "Postgrado/Magíster En Educación De Adultos Y Procesos Formativos",
    "Postgrado/Magíster En Enseñanza De Las Ciencias",
    "Postgrado/Magíster En Evaluación Educacional",
    "Postgrado/Magíster En Gestión Cultural",
    "Postgrado/Magíster En Liderazgo Y Gestión De Organizaciones Educativas",
    "Postgrado/Magíster En Literatura Con Mención En",
    "Postgrado/Postítulo En Orientación Educacional",
    "Psicología",
    "Sociología",
    "Teatro",
    "Técnico En Administración En Recursos Humanos",
    "Técnico En Administración Logística",
    "Técnico En Construcción",
    "Técnico en Interpretación en Lengua de Señas",
    "Técnico En Minería",
    "Tecnología En Deporte Y Recreación",
    "Terapia Ocupacional",
    "Traducción E Interpretación Inglés-Español",
    "Vicerrectoría Académica",
    "Otro",
];

pub const CONTRACT_TYPES: &[&str] = &[
    "Planta Media Jornada",
    "Planta Jornada Completa",
    "Contrata Media Jornada",
    "Contrata Jornada Completa",
    "Contrata Excepcional",
    "Otro",
];

pub const TEACHING_SEMESTERS: &[&str] = &[
    "Semestre 1",
    "Semestre 2",
    "Semestre 3",
    "Semestre 4",
    "Semestre 5",
    "Semestre 6",
    "Semestre 7",
    "Semestre 8",
    "Semestre 9",
    "Semestre 10",
    "No Aplica",
];

pub fn is_catalog_value(catalog: &[&str], value: &str) -> bool {
    catalog.iter().any(|entry| *entry == value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Campus {
    Valparaiso,
    SanFelipe,
    NotApplicable,
}

impl Campus {
    pub const ALL: [Campus; 3] = [Campus::Valparaiso, Campus::SanFelipe, Campus::NotApplicable];
}

impl std::fmt::Display for Campus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Campus::Valparaiso => write!(f, "Valparaíso"),
            Campus::SanFelipe => write!(f, "San Felipe"),
            Campus::NotApplicable => write!(f, "No Aplica"),
        }
    }
}

impl FromStr for Campus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Valparaíso" => Ok(Campus::Valparaiso),
            "San Felipe" => Ok(Campus::SanFelipe),
            "No Aplica" => Ok(Campus::NotApplicable),
            _ => Err(()),
        }
    }
}

pub fn serialize_campus<S>(value: &Campus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_campus<'de, D>(deserializer: D) -> Result<Campus, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    Campus::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid Campus: {value_str}")))
}

impl Serialize for Campus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_campus(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Campus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_campus(deserializer)
    }
}
