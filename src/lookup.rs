//! Búsqueda de un plato del catálogo a partir del texto del usuario.

use crate::models::Dish;

/// Devuelve el primer plato cuyo nombre contiene la consulta completa o,
/// si ninguno la contiene, el primero cuyo nombre contiene alguna de sus palabras.
///
/// La consulta no se recorta: una consulta vacía coincide con el primer plato.
pub fn find_dish<'a>(query: &str, dishes: &'a [Dish]) -> Option<&'a Dish> {
    let query = query.to_lowercase();

    if let Some(dish) = dishes
        .iter()
        .find(|d| d.name.to_lowercase().contains(query.as_str()))
    {
        return Some(dish);
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    dishes.iter().find(|d| {
        let name = d.name.to_lowercase();
        tokens.iter().any(|t| name.contains(t))
    })
}
