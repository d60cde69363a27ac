//! Taxonomía de palabras clave: categorías de plato, métodos de preparación
//! e ingredientes. Se construye una vez al arrancar y se comparte por referencia.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Categoría de plato con sus palabras clave (en orden de prioridad) y su intensidad fija.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
    pub intensity: String,
}

/// Grupo de método de preparación. No lleva intensidad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRule {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: Vec<CategoryRule>,
    pub methods: Vec<MethodRule>,
    pub ingredients: Vec<String>,
}

fn category(name: &str, intensity: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        intensity: intensity.to_string(),
    }
}

fn method(name: &str, keywords: &[&str]) -> MethodRule {
    MethodRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Taxonomy {
    /// Tablas por defecto (vocabulario en portugués).
    pub fn builtin() -> Self {
        let categories = vec![
            category(
                "carnes_vermelhas",
                "forte",
                &[
                    "bife", "picanha", "contrafilé", "alcatra", "costela", "carne bovina", "boi",
                    "carne de porco", "porco", "lombo", "carneiro", "cordero", "vitela",
                ],
            ),
            category(
                "aves",
                "media",
                &[
                    "frango", "galinha", "peru", "chester", "pato", "codorna", "ave",
                    "peito de frango", "coxa", "sobrecoxa",
                ],
            ),
            category(
                "peixes",
                "leve",
                &[
                    "salmão", "truta", "bacalhau", "atum", "tilápia", "pescada", "robalo",
                    "dourado", "corvina", "peixe", "file de peixe",
                ],
            ),
            category(
                "frutos_mar",
                "leve",
                &[
                    "camarão", "lagosta", "siri", "caranguejo", "ostra", "mexilhão", "polvo",
                    "lula", "marisco", "fruto do mar",
                ],
            ),
            category(
                "massas",
                "media",
                &[
                    "macarrão", "espaguete", "talharim", "ravioli", "lasanha", "nhoque",
                    "canelone", "massa", "carbonara",
                ],
            ),
            category(
                "queijos",
                "media",
                &[
                    "queijo", "brie", "gorgonzola", "cheddar", "mussarela", "parmesão",
                    "provolone", "coalho", "minas",
                ],
            ),
            category(
                "vegetariano",
                "leve",
                &[
                    "legumes", "vegetais", "salada", "berinjela", "abobrinha", "cogumelo", "tofu",
                    "grão de bico", "lentilha", "vegetariano", "vegano",
                ],
            ),
            category(
                "sobremesas",
                "doce",
                &[
                    "chocolate", "doce", "sobremesa", "pudim", "mousse", "sorvete", "torta",
                    "bolo", "creme", "açúcar",
                ],
            ),
        ];

        let methods = vec![
            method(
                "grelhado",
                &["grelhado", "grelhada", "na chapa", "churrasco", "assado na grelha"],
            ),
            method("assado", &["assado", "assada", "forno", "roast"]),
            method("frito", &["frito", "frita", "empanado", "empanada", "dorê"]),
            method("cozido", &["cozido", "cozida", "estufado", "ensopado", "guisado"]),
            method("cru", &["cru", "crua", "tártaro", "sashimi", "ceviche"]),
            method("molho", &["molho", "sauce", "caldo", "ao molho"]),
        ];

        let ingredients = [
            "alho", "cebola", "tomate", "limão", "azeite", "manteiga", "creme de leite", "vinho",
            "ervas", "tempero", "pimenta", "sal",
        ]
        .iter()
        .map(|i| i.to_string())
        .collect();

        Self {
            categories,
            methods,
            ingredients,
        }
    }

    /// Carga una taxonomía alternativa desde un JSON con la misma forma que `Taxonomy`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("No se pudo leer la taxonomía {}", path.display()))?;
        let taxonomy: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Taxonomía con formato inválido: {}", path.display()))?;
        info!(
            "Taxonomía cargada desde {}: {} categorías, {} métodos, {} ingredientes",
            path.display(),
            taxonomy.categories.len(),
            taxonomy.methods.len(),
            taxonomy.ingredients.len()
        );
        Ok(taxonomy)
    }

    /// Taxonomía del fichero indicado o, si no hay ninguno, la de serie.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }
}
