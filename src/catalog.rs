//! Carga de los catálogos de platos y vinos desde ficheros JSON, con
//! validación de los vinos y creación de datos de ejemplo en el primer arranque.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    analysis::DEFAULT_PROFILE,
    models::{Dish, RawWine, Wine},
};

const DEFAULT_INTENSITY: &str = "media";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No existe el fichero de catálogo {0}")]
    Missing(PathBuf),

    #[error("Formato inválido en {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error de E/S leyendo {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Lee una lista de registros JSON.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogError::Missing(path.to_path_buf()),
        _ => CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&raw).map_err(|e| CatalogError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Completa los campos ausentes de un vino.
///
/// Orden de las reglas: perfil "equilibrado", intensidad "media", listas vacías;
/// después un perfil "equilibrado" se deduce del tipo y una intensidad "media"
/// se deduce del perfil.
pub fn validate_wine(raw: RawWine) -> Wine {
    let mut profile = raw.profile.unwrap_or_else(|| DEFAULT_PROFILE.to_string());
    let mut intensity = raw.intensity.unwrap_or_else(|| DEFAULT_INTENSITY.to_string());

    if profile == DEFAULT_PROFILE {
        match raw.wine_type.to_lowercase().as_str() {
            "tinto" | "red" => profile = "encorpado".to_string(),
            "branco" | "white" | "espumante" | "champagne" => profile = "leve".to_string(),
            _ => {}
        }
    }

    if intensity == DEFAULT_INTENSITY {
        match profile.as_str() {
            "encorpado" => intensity = "forte".to_string(),
            "leve" => intensity = "leve".to_string(),
            _ => {}
        }
    }

    Wine {
        name: raw.name,
        wine_type: raw.wine_type,
        notes: raw.notes.unwrap_or_default(),
        pairs_with: raw.pairs_with.unwrap_or_default(),
        profile,
        intensity,
    }
}

pub fn load_wines(path: &Path) -> Result<Vec<Wine>, CatalogError> {
    let raw: Vec<RawWine> = load_records(path)?;
    Ok(raw.into_iter().map(validate_wine).collect())
}

pub fn load_dishes(path: &Path) -> Result<Vec<Dish>, CatalogError> {
    load_records(path)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn example_dishes() -> Vec<Dish> {
    vec![
        Dish {
            name: "Picanha na Chapa".to_string(),
            description: "Picanha grelhada na chapa com alho e sal grosso".to_string(),
            category: Some("carnes_vermelhas".to_string()),
            ingredients: strings(&["picanha", "alho", "sal grosso", "azeite"]),
            intensity: Some("forte".to_string()),
            pairing_hints: strings(&["vinhos tintos encorpados", "malbec", "cabernet sauvignon"]),
        },
        Dish {
            name: "Salmão Grelhado".to_string(),
            description: "Salmão grelhado com molho de maracujá e arroz de açafrão".to_string(),
            category: Some("peixes".to_string()),
            ingredients: strings(&["salmão", "maracujá", "açafrão", "arroz"]),
            intensity: Some("leve".to_string()),
            pairing_hints: strings(&["vinhos brancos", "sauvignon blanc", "pinot noir"]),
        },
        Dish {
            name: "Lasanha à Bolonhesa".to_string(),
            description: "Lasanha tradicional com molho bolonhesa e queijos".to_string(),
            category: Some("massas".to_string()),
            ingredients: strings(&["carne moída", "molho de tomate", "massa de lasanha", "queijo"]),
            intensity: Some("media".to_string()),
            pairing_hints: strings(&["vinhos tintos médios", "chardonnay", "merlot"]),
        },
        Dish {
            name: "Risoto de Cogumelos".to_string(),
            description: "Risoto cremoso com cogumelos frescos e parmesão".to_string(),
            category: Some("vegetariano".to_string()),
            ingredients: strings(&["arroz arbório", "cogumelos", "parmesão", "vinho branco"]),
            intensity: Some("media".to_string()),
            pairing_hints: strings(&["pinot noir", "chardonnay", "vinhos brancos leves"]),
        },
    ]
}

pub fn example_wines() -> Vec<Wine> {
    fn wine(
        name: &str,
        wine_type: &str,
        notes: &[&str],
        pairs: &[&str],
        profile: &str,
        intensity: &str,
    ) -> Wine {
        Wine {
            name: name.to_string(),
            wine_type: wine_type.to_string(),
            notes: strings(notes),
            pairs_with: strings(pairs),
            profile: profile.to_string(),
            intensity: intensity.to_string(),
        }
    }

    vec![
        wine(
            "Cabernet Sauvignon",
            "Tinto",
            &["cassis", "cereja", "baunilha", "tabaco"],
            &["carnes vermelhas", "queijos curados", "massas com molho vermelho"],
            "encorpado",
            "forte",
        ),
        wine(
            "Chardonnay",
            "Branco",
            &["maçã verde", "baunilha", "manteiga", "carvalho"],
            &["frango", "peixes", "camarão", "massas brancas"],
            "cremoso",
            "media",
        ),
        wine(
            "Sauvignon Blanc",
            "Branco",
            &["maracujá", "limão", "grama cortada"],
            &["peixes", "frutos do mar", "saladas", "queijo de cabra"],
            "leve",
            "leve",
        ),
        wine(
            "Pinot Noir",
            "Tinto",
            &["morango", "cereja", "cogumelo", "terra úmida"],
            &["aves", "salmão", "cogumelos", "massas"],
            "frutado",
            "media",
        ),
        wine(
            "Malbec",
            "Tinto",
            &["ameixa", "amora", "violeta", "chocolate"],
            &["carnes vermelhas", "picanha", "churrasco"],
            "encorpado",
            "forte",
        ),
        wine(
            "Moscatel",
            "Branco",
            &["damasco", "mel", "flor de laranjeira"],
            &["sobremesas", "torta", "pudim"],
            "doce",
            "doce",
        ),
    ]
}

/// Escribe los datos de ejemplo como JSON legible (UTF-8 sin escapar).
fn persist_examples<T: Serialize>(path: &Path, records: &[T]) {
    let result = serde_json::to_string_pretty(records)
        .map_err(io::Error::from)
        .and_then(|json| fs::write(path, json));

    match result {
        Ok(()) => info!("Creado {} con datos de ejemplo.", path.display()),
        Err(e) => warn!("No se pudo crear {}: {}", path.display(), e),
    }
}

/// Carga un catálogo sin abortar nunca:
/// - si el fichero no existe se crean y devuelven los datos de ejemplo;
/// - si está corrupto se devuelve un catálogo vacío y un aviso.
fn load_or_seed<T: Serialize>(
    label: &str,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<Vec<T>, CatalogError>,
    examples: impl FnOnce() -> Vec<T>,
) -> (Vec<T>, Option<String>) {
    match load(path) {
        Ok(records) => {
            info!("Catálogo de {} cargado: {} registros encontrados", label, records.len());
            (records, None)
        }
        Err(CatalogError::Missing(_)) => {
            warn!("No existe {}; se crea con datos de ejemplo.", path.display());
            let records = examples();
            persist_examples(path, &records);
            (records, None)
        }
        Err(e) => {
            error!("Error al leer el catálogo de {}: {}", label, e);
            (Vec::new(), Some(e.to_string()))
        }
    }
}

/// Catálogos en memoria, de sólo lectura tras el arranque.
#[derive(Debug, Default)]
pub struct Catalog {
    pub dishes: Vec<Dish>,
    pub wines: Vec<Wine>,
    pub warnings: Vec<String>,
}

impl Catalog {
    pub fn load(dishes_path: &Path, wines_path: &Path) -> Self {
        let (wines, wines_warning) = load_or_seed("vinos", wines_path, load_wines, example_wines);
        let (dishes, dishes_warning) = load_or_seed("platos", dishes_path, load_dishes, example_dishes);

        Self {
            dishes,
            wines,
            warnings: wines_warning.into_iter().chain(dishes_warning).collect(),
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Catálogo: {} platos, {} vinos, {} avisos.",
            self.dishes.len(),
            self.wines.len(),
            self.warnings.len()
        )
    }
}
