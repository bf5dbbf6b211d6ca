//! Search-box filtering over a store.

use crate::entity::Entity;

/// Whether any of the entity's search fields contains `term`, ignoring case.
/// The empty term matches everything.
pub fn matches<E: Entity>(entity: &E, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    entity
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Entities matching `term`, in store order.
pub fn filter<'a, E: Entity>(
    entities: impl IntoIterator<Item = &'a E>,
    term: &str,
) -> Vec<&'a E> {
    entities.into_iter().filter(|e| matches(*e, term)).collect()
}
