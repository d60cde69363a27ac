// Módulos de la aplicación
mod analysis;
mod api;
mod app_state;
mod catalog;
mod config;
mod justify;
mod llm;
mod lookup;
mod models;
mod pairing;
mod scoring;
mod taxonomy;

use crate::{
    app_state::AppState,
    catalog::Catalog,
    config::{AppConfig, LlmProvider},
    justify::Justifier,
    llm::{LlmManager, OfflineGenerator, TextGenerator},
    taxonomy::Taxonomy,
};
use anyhow::{Context, Result};
use axum::Router;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::oneshot;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Elige el generador de justificaciones según la configuración.
fn select_generator(cfg: &AppConfig) -> Arc<dyn TextGenerator> {
    if cfg.llm_provider == LlmProvider::Offline {
        info!("LLM desactivado: se usarán justificaciones de respaldo.");
        return Arc::new(OfflineGenerator);
    }
    if !cfg.llm_credentials_present() {
        warn!(
            "Faltan credenciales para {:?} ({}); se usarán justificaciones de respaldo.",
            cfg.llm_provider,
            cfg.llm_provider.api_key_var().unwrap_or_default()
        );
        return Arc::new(OfflineGenerator);
    }
    Arc::new(LlmManager::from_config(cfg))
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Cargar configuración y taxonomía
    let cfg = AppConfig::from_env().context("Error al cargar la configuración")?;
    let taxonomy = match Taxonomy::load(cfg.taxonomy_path.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            warn!("{:#}. Se usa la taxonomía de serie.", e);
            Taxonomy::builtin()
        }
    };

    // 3. Cargar catálogos (nunca aborta: datos de ejemplo o catálogo vacío)
    let catalog = Catalog::load(&cfg.dishes_path, &cfg.wines_path);
    info!("{}", catalog);

    // 4. Inicializar el generador de justificaciones
    let generator = select_generator(&cfg);
    let justifier = Justifier::new(generator, Duration::from_secs(cfg.llm_timeout_secs));
    info!("Generador de justificaciones: {}", justifier.generator_name());

    // Crear canal para la señal de apagado.
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    // 5. Crear estado compartido de la aplicación
    let app_state = AppState {
        config: cfg.clone(),
        taxonomy: Arc::new(taxonomy),
        catalog: Arc::new(catalog),
        justifier,
        shutdown_sender: Arc::new(Mutex::new(Some(shutdown_tx))),
    };

    // 6. Configurar el router de la API y el servicio de ficheros estáticos
    let app = Router::new()
        .merge(api::create_router(app_state.clone()))
        .fallback_service(ServeDir::new(&app_state.config.frontend_dir))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // 7. Iniciar el servidor
    let server_addr = &app_state.config.server_addr;
    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("No se pudo escuchar en {}", server_addr))?;
    let server_url = format!("http://{}", server_addr);
    info!("🍷 Servidor escuchando en {}", &server_url);

    // Abrir el frontend en el navegador por defecto
    if app_state.config.open_browser && webbrowser::open(&server_url).is_err() {
        info!("No se pudo abrir el navegador. Por favor, accede a {} manualmente.", server_url);
    }

    // Configurar el apagado ordenado.
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            info!("Señal de apagado recibida, iniciando cierre del servidor.");
        })
        .await
        .context("Error en el servidor HTTP")?;

    info!("✅ Servidor cerrado correctamente.");
    Ok(())
}
