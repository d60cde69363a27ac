//! Abstracción sobre Rig para generar texto con distintos proveedores de LLM.
//! El resto de la aplicación sólo conoce el trait `TextGenerator`.

use async_trait::async_trait;
use rig::completion::Prompt;
use thiserror::Error;

use crate::config::{AppConfig, LlmProvider};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generación de texto desactivada")]
    Disabled,

    #[error("Proveedor LLM {0:?} aún no implementado")]
    Unsupported(LlmProvider),

    #[error("El proveedor no respondió en {0} s")]
    Timeout(u64),

    #[error("Error del proveedor LLM: {0}")]
    Provider(String),

    #[error("Respuesta vacía del proveedor LLM")]
    EmptyResponse,
}

/// Capacidad de generar texto libre a partir de un prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Nombre legible del generador (para logs y `/api/status`).
    fn name(&self) -> String;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

const SYSTEM_PROMPT: &str = r#"
Você é um sommelier experiente.
Responda em português, de forma técnica porém acessível, em 3 a 4 linhas.
Não use listas nem títulos; apenas um parágrafo curto.
"#;

/// Gestor de LLMs basado en Rig.
#[derive(Debug, Clone)]
pub struct LlmManager {
    pub provider: LlmProvider,
    pub chat_model: String,
}

impl LlmManager {
    /// Construye el manager a partir de la configuración.
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            provider: cfg.llm_provider.clone(),
            chat_model: cfg.llm_chat_model.clone(),
        }
    }

    async fn complete_with_openai(&self, prompt: &str) -> Result<String, GenerationError> {
        use rig::client::{CompletionClient as _, ProviderClient as _};
        use rig::providers::openai;

        let client = openai::Client::from_env();
        let agent = client.agent(self.chat_model.as_str()).preamble(SYSTEM_PROMPT).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))
    }

    async fn complete_with_gemini(&self, prompt: &str) -> Result<String, GenerationError> {
        use rig::client::{CompletionClient as _, ProviderClient as _};
        use rig::providers::gemini;

        let client = gemini::Client::from_env();
        let agent = client.agent(self.chat_model.as_str()).preamble(SYSTEM_PROMPT).build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for LlmManager {
    fn name(&self) -> String {
        format!("{:?} ({})", self.provider, self.chat_model)
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let text = match self.provider {
            LlmProvider::OpenAI => self.complete_with_openai(prompt).await?,
            LlmProvider::Gemini => self.complete_with_gemini(prompt).await?,
            ref other => return Err(GenerationError::Unsupported(other.clone())),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

/// Generador determinista sin red: siempre declina, de modo que se usa
/// la justificación de respaldo.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    fn name(&self) -> String {
        "offline".to_string()
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }
}
