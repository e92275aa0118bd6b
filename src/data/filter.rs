use super::model::{Dinosaur, FieldValue};

// ---------------------------------------------------------------------------
// Temporal filter: which dinosaurs were alive at a given time
// ---------------------------------------------------------------------------

/// Return indices of dinosaurs alive `mya` million years ago, in collection
/// order. See [`Mya::alive_at`](super::model::Mya::alive_at) for the tolerance
/// rules; records whose `mya` has neither one nor two values never match.
pub fn alive_indices(dinosaurs: &[Dinosaur], mya: f64) -> Vec<usize> {
    dinosaurs
        .iter()
        .enumerate()
        .filter(|(_, dino)| dino.mya.alive_at(mya))
        .map(|(i, _)| i)
        .collect()
}

/// Project every dinosaur alive `mya` million years ago.
///
/// With a `key`, each match yields its value for that field when the record
/// defines it; otherwise (no key, empty key, or an undefined field) the
/// record's `dinosaurId` is used.
pub fn dinosaurs_alive_mya(dinosaurs: &[Dinosaur], mya: f64, key: Option<&str>) -> Vec<FieldValue> {
    let key = key.filter(|k| !k.is_empty());
    let matches = alive_indices(dinosaurs, mya);
    log::debug!("{} of {} dinosaurs alive at {mya} mya", matches.len(), dinosaurs.len());

    matches
        .into_iter()
        .map(|i| {
            let dino = &dinosaurs[i];
            key.and_then(|k| dino.field(k))
                .unwrap_or_else(|| FieldValue::Text(dino.dinosaur_id.clone()))
        })
        .collect()
}
