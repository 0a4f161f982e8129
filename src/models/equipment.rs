use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Sector {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub sector_id: i64,
    #[serde(default)]
    pub qr_code_identifier: Option<String>,
    pub sector: Sector,
}

impl Equipment {
    /// "Setor: X | Local: Y"
    pub fn details_line(&self) -> String {
        format!(
            "Setor: {} | Local: {}",
            self.sector.name,
            self.location.as_deref().unwrap_or("-")
        )
    }

    /// "Setor / Local" para la cabecera de validación
    pub fn place_line(&self) -> String {
        format!(
            "{} / {}",
            self.sector.name,
            self.location.as_deref().unwrap_or("-")
        )
    }
}
