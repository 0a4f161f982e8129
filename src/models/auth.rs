use serde::{Deserialize, Serialize};

/// Credenciales del formulario de login (se envían form-encoded a `/token`)
#[derive(Clone, PartialEq, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Cuerpo `application/x-www-form-urlencoded`
    pub fn to_form_body(&self) -> String {
        format!(
            "username={}&password={}",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password)
        )
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Colaborador,
    Gestor,
    Administrador,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Colaborador => "colaborador",
            UserRole::Gestor => "gestor",
            UserRole::Administrador => "administrador",
        }
    }

    /// Gestores y administradores ven los checklists pendientes
    pub fn can_validate(&self) -> bool {
        matches!(self, UserRole::Gestor | UserRole::Administrador)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sector_id: Option<i64>,
}

fn default_active() -> bool {
    true
}
