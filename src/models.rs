//! Modelos de dominio (platos y vinos del catálogo y rasgos derivados del análisis).

use serde::{Deserialize, Serialize};

/// Plato del catálogo (`pratos.json`).
/// Se carga una vez y no cambia durante la sesión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
    #[serde(rename = "intensidade", default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(rename = "harmonizacao_sugerida", default)]
    pub pairing_hints: Vec<String>,
}

/// Vino tal y como viene en `vinhos.json`: cualquier campo descriptivo puede faltar.
/// Sólo sirve como destino de deserialización; ver `catalog::validate_wine`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWine {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub wine_type: String,
    #[serde(rename = "notas")]
    pub notes: Option<Vec<String>>,
    #[serde(rename = "harmoniza_com")]
    pub pairs_with: Option<Vec<String>>,
    #[serde(rename = "perfil")]
    pub profile: Option<String>,
    #[serde(rename = "intensidade")]
    pub intensity: Option<String>,
}

/// Vino validado: todos los campos están presentes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wine {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub wine_type: String,
    #[serde(rename = "notas")]
    pub notes: Vec<String>,
    #[serde(rename = "harmoniza_com")]
    pub pairs_with: Vec<String>,
    #[serde(rename = "perfil")]
    pub profile: String,
    #[serde(rename = "intensidade")]
    pub intensity: String,
}

/// Categoría detectada en un texto, con la palabra clave que la disparó.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMatch {
    pub category: String,
    pub keyword: String,
    pub intensity: String,
}

/// Rasgos extraídos de la descripción de un plato.
/// Se recalcula en cada petición; nunca se persiste.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureBundle {
    pub categories: Vec<CategoryMatch>,
    pub methods: Vec<String>,
    pub ingredients: Vec<String>,
    pub source_text: String,
}

impl FeatureBundle {
    /// Intensidad de la primera categoría detectada, o "media" si no hay ninguna.
    pub fn dish_intensity(&self) -> &str {
        self.categories
            .first()
            .map(|c| c.intensity.as_str())
            .unwrap_or("media")
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(|c| c.category.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.methods.is_empty() && self.ingredients.is_empty()
    }
}

/// Vino con su puntuación durante el ranking. La puntuación no se expone al usuario.
#[derive(Debug, Clone, Copy)]
pub struct ScoredWine<'a> {
    pub wine: &'a Wine,
    pub score: u32,
}

/// Vino recomendado junto a su justificación.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub wine: Wine,
    pub justification: String,
}
