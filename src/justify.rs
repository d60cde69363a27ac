//! Justificación en lenguaje natural de cada maridaje.
//!
//! Se delega en un `TextGenerator`; ante cualquier fallo (timeout, credenciales,
//! respuesta vacía...) se devuelve una frase de respaldo determinista.

use std::{sync::Arc, time::Duration};

use tracing::warn;

use crate::{
    analysis::resolve_flavor_profile,
    llm::{GenerationError, TextGenerator},
    models::{Dish, FeatureBundle, Wine},
};

#[derive(Clone)]
pub struct Justifier {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl Justifier {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub fn generator_name(&self) -> String {
        self.generator.name()
    }

    /// Justificación para `wine`. Nunca falla.
    pub async fn justify(&self, dish: Option<&Dish>, features: &FeatureBundle, wine: &Wine) -> String {
        let prompt = build_prompt(dish, features, wine);

        let result = match tokio::time::timeout(self.timeout, self.generator.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Respuesta vacía al justificar '{}'; se usa el texto de respaldo.", wine.name);
                fallback_justification(features, wine)
            }
            Err(e) => {
                warn!("No se pudo generar la justificación para '{}': {}", wine.name, e);
                fallback_justification(features, wine)
            }
        }
    }
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{i}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Prompt con el contexto del plato, el análisis y el vino elegido.
pub fn build_prompt(dish: Option<&Dish>, features: &FeatureBundle, wine: &Wine) -> String {
    let (name, description, category) = match dish {
        Some(d) => (
            d.name.as_str(),
            d.description.as_str(),
            d.category.as_deref().unwrap_or("Não especificada"),
        ),
        None => ("Não encontrado", features.source_text.as_str(), "Não especificada"),
    };

    let categories: Vec<String> = features.categories.iter().map(|c| c.category.clone()).collect();
    let notes = wine.notes.join(", ");

    format!(
        "Atue como um sommelier experiente analisando esta harmonização:

Prato encontrado na base: {name}
Descrição: {description}
Categoria: {category}

Análise do prato:
- Categorias identificadas: {categories}
- Métodos de preparo: {methods}
- Perfil de sabor: {profile}

VINHO RECOMENDADO: {wine_name} ({wine_type})
Perfil: {wine_profile}
Notas: {notes}

Explique em 3-4 linhas por que essa harmonização funciona considerando:
- Correspondência de intensidades
- Complementaridade de sabores
- Como o vinho interage com os ingredientes e método de preparo

Seja técnico porém acessível.",
        categories = quoted_list(&categories),
        methods = quoted_list(&features.methods),
        profile = resolve_flavor_profile(features),
        wine_name = wine.name,
        wine_type = wine.wine_type,
        wine_profile = wine.profile,
    )
}

/// Frase de respaldo: categoría principal (o "o prato") y tipo del vino.
pub fn fallback_justification(features: &FeatureBundle, wine: &Wine) -> String {
    let subject = features.primary_category().unwrap_or("o prato");
    format!(
        "Esta harmonização entre {} e o {} funciona devido à complementaridade de intensidades e sabores.",
        subject, wine.wine_type
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::analyze,
        catalog::{example_dishes, example_wines},
        llm::OfflineGenerator,
        taxonomy::Taxonomy,
    };
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        fn name(&self) -> String {
            "canned".to_string()
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        fn name(&self) -> String {
            "failing".to_string()
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Provider("401 Unauthorized".to_string()))
        }
    }

    struct Slow;

    #[async_trait]
    impl TextGenerator for Slow {
        fn name(&self) -> String {
            "slow".to_string()
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("tarde demais".to_string())
        }
    }

    fn justifier(generator: impl TextGenerator + 'static) -> Justifier {
        Justifier::new(Arc::new(generator), Duration::from_millis(50))
    }

    fn picanha_and_malbec() -> (Dish, FeatureBundle, Wine) {
        let dish = example_dishes().remove(0);
        let features = analyze(&Taxonomy::builtin(), &dish.description);
        let wine = example_wines()
            .into_iter()
            .find(|w| w.name == "Malbec")
            .unwrap();
        (dish, features, wine)
    }

    #[tokio::test]
    async fn uses_generated_text() {
        let (dish, features, wine) = picanha_and_malbec();
        let text = justifier(Canned("Taninos firmes para a gordura da picanha."))
            .justify(Some(&dish), &features, &wine)
            .await;
        assert_eq!(text, "Taninos firmes para a gordura da picanha.");
    }

    #[tokio::test]
    async fn failure_falls_back_to_wine_type() {
        let (dish, features, wine) = picanha_and_malbec();
        let text = justifier(Failing).justify(Some(&dish), &features, &wine).await;
        assert!(!text.is_empty());
        assert!(text.contains("Tinto"));
        assert!(text.contains("carnes_vermelhas"));
    }

    #[tokio::test]
    async fn empty_and_disabled_responses_fall_back() {
        let (_, features, wine) = picanha_and_malbec();
        let expected = fallback_justification(&features, &wine);

        let text = justifier(Canned("   ")).justify(None, &features, &wine).await;
        assert_eq!(text, expected);

        let text = justifier(OfflineGenerator).justify(None, &features, &wine).await;
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn timeout_falls_back() {
        let (_, features, wine) = picanha_and_malbec();
        let text = justifier(Slow).justify(None, &features, &wine).await;
        assert_eq!(text, fallback_justification(&features, &wine));
    }

    #[test]
    fn fallback_without_categories_mentions_the_dish() {
        let features = analyze(&Taxonomy::builtin(), "algo indefinido");
        let wine = example_wines().remove(1);
        let text = fallback_justification(&features, &wine);
        assert_eq!(
            text,
            "Esta harmonização entre o prato e o Branco funciona devido à complementaridade de intensidades e sabores."
        );
    }

    #[test]
    fn prompt_carries_dish_analysis_and_wine() {
        let (dish, features, wine) = picanha_and_malbec();
        let prompt = build_prompt(Some(&dish), &features, &wine);
        assert!(prompt.contains("Prato encontrado na base: Picanha na Chapa"));
        assert!(prompt.contains("Categoria: carnes_vermelhas"));
        assert!(prompt.contains("Categorias identificadas: ['carnes_vermelhas']"));
        assert!(prompt.contains("Métodos de preparo: ['grelhado']"));
        assert!(prompt.contains("Perfil de sabor: encorpado"));
        assert!(prompt.contains("VINHO RECOMENDADO: Malbec (Tinto)"));
        assert!(prompt.contains("Notas: ameixa, amora, violeta, chocolate"));

        let prompt = build_prompt(None, &features, &wine);
        assert!(prompt.contains("Prato encontrado na base: Não encontrado"));
        assert!(prompt.contains("Descrição: Picanha grelhada na chapa com alho e sal grosso"));
    }
}
