//! Análisis de la descripción de un plato contra la taxonomía y resolución
//! del perfil de sabor dominante.

use crate::{
    models::{CategoryMatch, FeatureBundle},
    taxonomy::Taxonomy,
};

/// Orden de prioridad para elegir la categoría principal de un plato.
const CATEGORY_PRIORITY: [&str; 8] = [
    "sobremesas",
    "carnes_vermelhas",
    "queijos",
    "aves",
    "frutos_mar",
    "peixes",
    "massas",
    "vegetariano",
];

pub const DEFAULT_PROFILE: &str = "equilibrado";

fn profile_for_category(category: &str) -> &'static str {
    match category {
        "carnes_vermelhas" => "encorpado",
        "aves" => "medio",
        "peixes" => "leve",
        "frutos_mar" => "leve",
        "massas" => "medio",
        "queijos" => "cremoso",
        "vegetariano" => "fresco",
        "sobremesas" => "doce",
        _ => DEFAULT_PROFILE,
    }
}

/// Primera palabra clave (en el orden de la lista) contenida en `text`.
fn first_match<'a>(keywords: &'a [String], text: &str) -> Option<&'a String> {
    keywords
        .iter()
        .find(|k| text.contains(k.to_lowercase().as_str()))
}

/// Extrae categorías, métodos de preparación e ingredientes de un texto libre.
///
/// Cada categoría y cada método aparece como mucho una vez, etiquetado con la
/// primera palabra clave de su lista que esté presente. Los ingredientes se
/// registran todos. Un texto sin coincidencias produce un resultado vacío.
pub fn analyze(taxonomy: &Taxonomy, text: &str) -> FeatureBundle {
    let lowered = text.to_lowercase();

    let categories = taxonomy
        .categories
        .iter()
        .filter_map(|rule| {
            first_match(&rule.keywords, &lowered).map(|keyword| CategoryMatch {
                category: rule.name.clone(),
                keyword: keyword.clone(),
                intensity: rule.intensity.clone(),
            })
        })
        .collect();

    let methods = taxonomy
        .methods
        .iter()
        .filter(|rule| first_match(&rule.keywords, &lowered).is_some())
        .map(|rule| rule.name.clone())
        .collect();

    let ingredients = taxonomy
        .ingredients
        .iter()
        .filter(|i| lowered.contains(i.to_lowercase().as_str()))
        .cloned()
        .collect();

    FeatureBundle {
        categories,
        methods,
        ingredients,
        source_text: text.to_string(),
    }
}

/// Reduce un análisis a un único perfil de sabor.
pub fn resolve_flavor_profile(features: &FeatureBundle) -> &'static str {
    let Some(first) = features.categories.first() else {
        return DEFAULT_PROFILE;
    };

    let principal = CATEGORY_PRIORITY
        .iter()
        .copied()
        .find(|p| features.categories.iter().any(|c| c.category == *p))
        .unwrap_or(first.category.as_str());

    profile_for_category(principal)
}
