//! Carga y gestión de configuración de la aplicación (catálogos + LLM).

use std::{env, path::PathBuf};

use anyhow::{anyhow, Context, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Gemini,
    Ollama,
    /// Sin LLM: siempre se usa la justificación de respaldo.
    Offline,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "offline" | "none" => Ok(Self::Offline),
            other => Err(anyhow!("Proveedor LLM no soportado: {other}")),
        }
    }

    /// Modelo de chat por defecto de cada proveedor.
    pub fn default_chat_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Gemini => "gemini-1.5-flash",
            Self::Ollama => "llama3.2",
            Self::Offline => "",
        }
    }

    /// Variable de entorno con la clave que Rig necesita para este proveedor.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama | Self::Offline => None,
        }
    }
}

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    pub frontend_dir: PathBuf,
    pub open_browser: bool,

    pub dishes_path: PathBuf,
    pub wines_path: PathBuf,
    pub taxonomy_path: Option<PathBuf>,

    pub llm_provider: LlmProvider,
    pub llm_chat_model: String,
    pub llm_timeout_secs: u64,
    /// Si la variable con la clave del proveedor tiene valor.
    pub llm_api_key_present: bool,
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Valor booleano inválido en {name}: {other}")),
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env`, pero leyendo de una función arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let server_addr = get("SERVER_ADDR", "127.0.0.1:3322");
        let frontend_dir = PathBuf::from(get("FRONTEND_DIR", "frontend"));
        let open_browser = parse_bool("OPEN_BROWSER", &get("OPEN_BROWSER", "true"))?;

        let dishes_path = PathBuf::from(get("DISHES_PATH", "pratos.json"));
        let wines_path = PathBuf::from(get("WINES_PATH", "vinhos.json"));
        let taxonomy_path = lookup("TAXONOMY_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let llm_provider = LlmProvider::from_str(&get("LLM_PROVIDER", "gemini"))?;
        let llm_chat_model = lookup("LLM_CHAT_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| llm_provider.default_chat_model().to_string());
        let llm_timeout_secs = get("LLM_TIMEOUT_SECS", "20")
            .trim()
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS debe ser un número entero de segundos")?;
        let llm_api_key_present = match llm_provider.api_key_var() {
            Some(name) => lookup(name).is_some_and(|k| !k.trim().is_empty()),
            None => true,
        };

        Ok(Self {
            server_addr,
            frontend_dir,
            open_browser,
            dishes_path,
            wines_path,
            taxonomy_path,
            llm_provider,
            llm_chat_model,
            llm_timeout_secs,
            llm_api_key_present,
        })
    }

    /// ¿Están disponibles las credenciales del proveedor configurado?
    pub fn llm_credentials_present(&self) -> bool {
        self.llm_api_key_present
    }
}
