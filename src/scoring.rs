//! Puntuación de afinidad plato/vino y ranking de recomendaciones.

use tracing::debug;

use crate::{
    analysis::resolve_flavor_profile,
    models::{Dish, FeatureBundle, ScoredWine, Wine},
};

/// Número máximo de vinos recomendados.
pub const TOP_N: usize = 3;

const HINT_NAME_OR_TYPE: u32 = 5;
const HINT_PROFILE_OR_INTENSITY: u32 = 3;
const CATEGORY_IN_PAIRING: u32 = 3;
const KEYWORD_IN_PAIRING: u32 = 2;
const INTENSITY_MATCH: u32 = 2;
const INTENSITY_NEAR: u32 = 1;
const PROFILE_MATCH: u32 = 2;

/// `haystack` ya en minúsculas. Un término vacío está contenido en cualquier texto.
fn mentions(haystack: &str, term: &str) -> bool {
    haystack.contains(term.to_lowercase().as_str())
}

/// Puntos por las sugerencias de maridaje del plato del catálogo.
fn hint_score(dish: Option<&Dish>, wine: &Wine) -> u32 {
    let Some(dish) = dish else {
        return 0;
    };

    dish.pairing_hints
        .iter()
        .map(|hint| {
            let hint = hint.to_lowercase();
            if mentions(&hint, &wine.name) || mentions(&hint, &wine.wine_type) {
                HINT_NAME_OR_TYPE
            } else if mentions(&hint, &wine.profile) || mentions(&hint, &wine.intensity) {
                HINT_PROFILE_OR_INTENSITY
            } else {
                0
            }
        })
        .sum()
}

/// Puntos por coincidencias entre `harmoniza_com` del vino y las categorías detectadas.
fn pairing_score(features: &FeatureBundle, wine: &Wine) -> u32 {
    wine.pairs_with
        .iter()
        .map(|entry| {
            let entry = entry.to_lowercase();
            features
                .categories
                .iter()
                .map(|m| {
                    let mut points = 0;
                    if mentions(&entry, &m.category.replace('_', " ")) {
                        points += CATEGORY_IN_PAIRING;
                    }
                    if mentions(&entry, &m.keyword) {
                        points += KEYWORD_IN_PAIRING;
                    }
                    points
                })
                .sum::<u32>()
        })
        .sum()
}

fn intensity_score(features: &FeatureBundle, wine: &Wine) -> u32 {
    let dish_intensity = features.dish_intensity();
    if dish_intensity == wine.intensity {
        INTENSITY_MATCH
    } else if matches!(dish_intensity, "forte" | "leve") && wine.intensity == "media" {
        INTENSITY_NEAR
    } else {
        0
    }
}

/// Puntuación total de un vino para el plato analizado.
pub fn score_wine(
    dish: Option<&Dish>,
    features: &FeatureBundle,
    flavor_profile: &str,
    wine: &Wine,
) -> u32 {
    let mut score = hint_score(dish, wine);
    score += pairing_score(features, wine);
    score += intensity_score(features, wine);
    if flavor_profile == wine.profile {
        score += PROFILE_MATCH;
    }
    score
}

/// Puntúa todo el catálogo, descarta los vinos con 0 puntos y ordena de mayor
/// a menor. Los empates conservan el orden del catálogo.
pub fn rank_wines<'a>(
    dish: Option<&Dish>,
    features: &FeatureBundle,
    wines: &'a [Wine],
) -> Vec<ScoredWine<'a>> {
    let flavor_profile = resolve_flavor_profile(features);

    let mut scored: Vec<ScoredWine<'a>> = wines
        .iter()
        .map(|wine| ScoredWine {
            wine,
            score: score_wine(dish, features, flavor_profile, wine),
        })
        .filter(|s| s.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Los `TOP_N` mejores vinos para el plato, sin puntuación.
pub fn recommend(dish: Option<&Dish>, features: &FeatureBundle, wines: &[Wine]) -> Vec<Wine> {
    let ranked = rank_wines(dish, features, wines);
    for s in &ranked {
        debug!("Puntuación {:>3} para '{}'", s.score, s.wine.name);
    }
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|s| s.wine.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analysis::analyze, catalog::example_dishes, taxonomy::Taxonomy};

    fn wine(name: &str, wine_type: &str, profile: &str, intensity: &str, pairs: &[&str]) -> Wine {
        Wine {
            name: name.to_string(),
            wine_type: wine_type.to_string(),
            notes: Vec::new(),
            pairs_with: pairs.iter().map(|p| p.to_string()).collect(),
            profile: profile.to_string(),
            intensity: intensity.to_string(),
        }
    }

    fn salmon_dish() -> Dish {
        example_dishes()
            .into_iter()
            .find(|d| d.name == "Salmão Grelhado")
            .unwrap()
    }

    #[test]
    fn white_wine_beats_red_for_grilled_salmon() {
        let t = Taxonomy::builtin();
        let dish = salmon_dish();
        let features = analyze(&t, &dish.description);
        let wines = vec![
            wine("Tannat Reserva", "Tinto", "encorpado", "forte", &[]),
            wine("Vinho Verde", "Branco", "leve", "leve", &[]),
        ];

        let ranked = rank_wines(Some(&dish), &features, &wines);
        assert_eq!(ranked[0].wine.name, "Vinho Verde");
        let red = ranked.iter().find(|s| s.wine.name == "Tannat Reserva");
        let red_score = red.map(|s| s.score).unwrap_or(0);
        assert!(ranked[0].score > red_score);

        let names: Vec<String> = recommend(Some(&dish), &features, &wines)
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names[0], "Vinho Verde");
    }

    #[test]
    fn hint_branches_are_exclusive_per_hint() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "");
        let dish = Dish {
            name: "Teste".to_string(),
            description: String::new(),
            category: None,
            ingredients: Vec::new(),
            intensity: None,
            pairing_hints: vec!["tintos leves".to_string()],
        };
        // Coincide el tipo ("tinto") y también el perfil ("leve"): sólo cuenta +5.
        let w = wine("X", "Tinto", "leve", "alta", &[]);
        assert_eq!(score_wine(Some(&dish), &features, "equilibrado", &w), 5);

        let by_profile = wine("Y", "Rosé", "leve", "alta", &[]);
        assert_eq!(score_wine(Some(&dish), &features, "equilibrado", &by_profile), 3);
    }

    #[test]
    fn pairing_entries_add_category_and_keyword_points() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "bife de chorizo");
        let profile = resolve_flavor_profile(&features);

        // Perfil e intensidad neutros para aislar los puntos de `harmoniza_com`.
        let base = wine("A", "Tinto", "x", "y", &["massas"]);
        assert_eq!(score_wine(None, &features, profile, &base), 0);

        let with_category = wine("A", "Tinto", "x", "y", &["massas", "carnes vermelhas"]);
        assert_eq!(score_wine(None, &features, profile, &with_category), 3);

        let with_both = wine("A", "Tinto", "x", "y", &["massas", "carnes vermelhas com bife"]);
        assert_eq!(score_wine(None, &features, profile, &with_both), 5);

        let keyword_only = wine("A", "Tinto", "x", "y", &["massas", "bife"]);
        assert_eq!(score_wine(None, &features, profile, &keyword_only), 2);
    }

    #[test]
    fn adding_a_matching_pairing_entry_increases_score() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "frango com queijo");
        let profile = resolve_flavor_profile(&features);

        let before = wine("A", "Branco", "cremoso", "media", &["frango"]);
        let after = wine("A", "Branco", "cremoso", "media", &["frango", "queijos"]);
        let s_before = score_wine(None, &features, profile, &before);
        let s_after = score_wine(None, &features, profile, &after);
        assert!(s_after >= s_before + 2);
    }

    #[test]
    fn intensity_rules() {
        let t = Taxonomy::builtin();
        let strong = analyze(&t, "costela");
        let none = analyze(&t, "");

        let media = wine("M", "z", "p", "media", &[]);
        let forte = wine("F", "z", "p", "forte", &[]);
        let leve = wine("L", "z", "p", "leve", &[]);

        assert_eq!(score_wine(None, &strong, "q", &forte), 2);
        assert_eq!(score_wine(None, &strong, "q", &media), 1);
        assert_eq!(score_wine(None, &strong, "q", &leve), 0);
        // Sin categorías la intensidad del plato es "media".
        assert_eq!(score_wine(None, &none, "q", &media), 2);
        assert_eq!(score_wine(None, &none, "q", &forte), 0);
    }

    #[test]
    fn sweet_dish_does_not_get_near_intensity_bonus() {
        let t = Taxonomy::builtin();
        let dessert = analyze(&t, "pudim");
        let media = wine("M", "z", "p", "media", &[]);
        assert_eq!(score_wine(None, &dessert, "q", &media), 0);
    }

    #[test]
    fn empty_profile_or_intensity_matches_every_hint() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "");
        let dish = Dish {
            name: "Teste".to_string(),
            description: String::new(),
            category: None,
            ingredients: Vec::new(),
            intensity: None,
            pairing_hints: vec!["qualquer coisa".to_string()],
        };
        let w = wine("X", "Rosé", "", "", &[]);
        // +3 por la sugerencia; la intensidad "" no coincide con "media".
        assert_eq!(score_wine(Some(&dish), &features, "equilibrado", &w), 3);

        let mut two_hints = dish.clone();
        two_hints.pairing_hints.push("outra coisa".to_string());
        assert_eq!(score_wine(Some(&two_hints), &features, "equilibrado", &w), 6);
    }

    #[test]
    fn empty_triggering_keyword_matches_every_pairing_entry() {
        let mut t = Taxonomy::builtin();
        t.categories[0].keywords.insert(0, String::new());
        let features = analyze(&t, "qualquer prato");
        assert_eq!(features.categories[0].keyword, "");

        // 2 entradas x (+2 por la palabra vacía); ni categoría ni intensidad coinciden.
        let w = wine("X", "Rosé", "frutado", "leve", &["aperitivos", "queijos"]);
        assert_eq!(score_wine(None, &features, "encorpado", &w), 4);
    }

    #[test]
    fn ranking_is_truncated_sorted_and_skips_zero_scores() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "picanha grelhada");
        let wines = vec![
            wine("Zero", "Rosé", "fresco", "leve", &[]),
            wine("Um", "Tinto", "frutado", "media", &[]),
            wine("Dois", "Tinto", "frutado", "forte", &[]),
            wine("Quatro", "Tinto", "encorpado", "forte", &[]),
            wine("Tres", "Tinto", "frutado", "forte", &["picanha"]),
            wine("Empate", "Tinto", "encorpado", "forte", &[]),
        ];

        let ranked = rank_wines(None, &features, &wines);
        assert!(ranked.iter().all(|s| s.score > 0));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(!ranked.iter().any(|s| s.wine.name == "Zero"));

        let top = recommend(None, &features, &wines);
        let names: Vec<&str> = top.iter().map(|w| w.name.as_str()).collect();
        // Quatro, Tres y Empate empatan a 4 puntos: se respeta el orden del catálogo.
        assert_eq!(names, ["Quatro", "Tres", "Empate"]);
    }

    #[test]
    fn empty_catalog_gives_no_recommendations() {
        let t = Taxonomy::builtin();
        let features = analyze(&t, "picanha");
        assert!(recommend(None, &features, &[]).is_empty());
    }
}
