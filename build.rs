use std::env;
use std::fs;
use std::path::Path;

/// Claves que `config::AppConfig::from_env` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "API_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "REDIRECT_DELAY_MS",
    "SCANNER_FPS",
    "SCANNER_QRBOX",
    "SIGNATURE_PEN_COLOR",
    "SIGNATURE_PEN_WIDTH",
];

fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !CONFIG_KEYS.contains(&key) {
                        println!("cargo:warning=Clave desconocida en .env ignorada: {}", key);
                        continue;
                    }

                    // El entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default values. Copy .env.example to .env to configure the API URL.");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
