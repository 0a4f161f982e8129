use serde::{Deserialize, Serialize};
use crate::models::auth::User;
use crate::models::equipment::Equipment;

/// Preguntas fijas del checklist de seguridad
pub const DEFAULT_QUESTIONS: [&str; 6] = [
    "O equipamento está limpo e em bom estado de conservação?",
    "Os dispositivos de parada de emergência estão acessíveis e operantes?",
    "As proteções de partes móveis estão intactas e em seus devidos lugares?",
    "Há vazamentos de óleo, água ou outros fluidos?",
    "A iluminação da área de trabalho é adequada?",
    "Os painéis elétricos estão fechados e sem fios expostos?",
];

/// Respuesta a una pregunta (valores del enum de la API)
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Answer {
    #[serde(rename = "Sim")]
    Sim,
    #[serde(rename = "Não")]
    Nao,
    #[serde(rename = "Parcial")]
    Parcial,
    #[serde(rename = "Não se aplica")]
    NaoSeAplica,
}

impl Answer {
    pub const ALL: [Answer; 4] = [Answer::Sim, Answer::Nao, Answer::Parcial, Answer::NaoSeAplica];

    /// Valor usado en el atributo `value` del radio
    pub fn code(&self) -> &'static str {
        match self {
            Answer::Sim => "Sim",
            Answer::Nao => "Nao",
            Answer::Parcial => "Parcial",
            Answer::NaoSeAplica => "NSP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Sim => "Sim",
            Answer::Nao => "Não",
            Answer::Parcial => "Parcial",
            Answer::NaoSeAplica => "N/A",
        }
    }

    pub fn from_code(code: &str) -> Option<Answer> {
        Answer::ALL.iter().copied().find(|a| a.code() == code)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResponseEntry {
    pub question: String,
    pub answer: Answer,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Cuerpo de `POST /checklists/`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ChecklistSubmission {
    pub equipment_id: i64,
    pub collaborator_signature: String,
    pub responses: Vec<ResponseEntry>,
}

/// Cuerpo de `PUT /checklists/{id}/validate`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ValidationSubmission {
    pub manager_signature: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum ChecklistStatus {
    #[serde(rename = "CONCLUÍDO")]
    Concluido,
    #[serde(rename = "VALIDADO")]
    Validado,
}

impl ChecklistStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistStatus::Concluido => "CONCLUÍDO",
            ChecklistStatus::Validado => "VALIDADO",
        }
    }

    /// Clase de badge bootstrap
    pub fn badge_class(&self) -> &'static str {
        match self {
            ChecklistStatus::Validado => "bg-success",
            ChecklistStatus::Concluido => "bg-warning",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Checklist {
    pub id: i64,
    pub equipment_id: i64,
    pub collaborator_id: i64,
    pub status: ChecklistStatus,
    pub created_at: String,
    pub collaborator: User,
    pub equipment: Equipment,
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
    #[serde(default)]
    pub collaborator_signature: Option<String>,
}

impl Checklist {
    pub fn created_at_display(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

/// Fecha de la API (RFC 3339 o ISO sin zona) → "dd/mm/aaaa hh:mm:ss"
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y %H:%M:%S";

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}
