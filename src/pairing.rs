//! Flujo completo de una recomendación:
//!   1. Buscar el plato en el catálogo (mejor esfuerzo).
//!   2. Analizar su descripción, o el texto del usuario si no hay plato.
//!   3. Resolver el perfil de sabor y puntuar el catálogo de vinos.
//!   4. Justificar cada vino recomendado (en paralelo, con respaldo determinista).

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    analysis::{analyze, resolve_flavor_profile},
    catalog::Catalog,
    justify::Justifier,
    lookup::find_dish,
    models::{Dish, FeatureBundle, Recommendation, Wine},
    scoring::recommend,
    taxonomy::Taxonomy,
};

/// Vinos que se muestran sin puntuar cuando ninguno encaja.
pub const GENERAL_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct PairingOutcome {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub query: String,
    pub dish: Option<Dish>,
    pub features: FeatureBundle,
    pub flavor_profile: String,
    pub recommendations: Vec<Recommendation>,
    pub general_suggestions: Vec<Wine>,
}

/// Lanza el flujo de recomendación para la consulta del usuario.
pub async fn pair_dish(
    taxonomy: &Taxonomy,
    catalog: &Catalog,
    justifier: &Justifier,
    query: &str,
) -> Result<PairingOutcome> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Por favor, selecione ou descreva um prato.");
    }

    let dish = find_dish(query, &catalog.dishes);
    let features = match dish {
        Some(d) => {
            info!("Plato encontrado en el catálogo: {}", d.name);
            analyze(taxonomy, &d.description)
        }
        None => {
            info!("Plato no encontrado; se analiza la descripción libre.");
            analyze(taxonomy, query)
        }
    };
    if features.is_empty() {
        info!("No se reconoció ninguna palabra clave en '{}'.", features.source_text);
    }
    let flavor_profile = resolve_flavor_profile(&features).to_string();

    let wines = recommend(dish, &features, &catalog.wines);

    let justifications = join_all(
        wines
            .iter()
            .map(|wine| justifier.justify(dish, &features, wine)),
    )
    .await;

    let recommendations: Vec<Recommendation> = wines
        .into_iter()
        .zip(justifications)
        .map(|(wine, justification)| Recommendation { wine, justification })
        .collect();

    let general_suggestions = if recommendations.is_empty() {
        catalog.wines.iter().take(GENERAL_SUGGESTIONS).cloned().collect()
    } else {
        Vec::new()
    };

    info!(
        "Consulta '{}': {} categorías, perfil '{}', {} vinos recomendados.",
        query,
        features.categories.len(),
        flavor_profile,
        recommendations.len()
    );

    Ok(PairingOutcome {
        request_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        query: query.to_string(),
        dish: dish.cloned(),
        features,
        flavor_profile,
        recommendations,
        general_suggestions,
    })
}
