use std::collections::BTreeMap;

use crate::data::model::Dinosaur;

/// Meters to feet.
pub const FEET_PER_METER: f64 = 3.281;

// ---------------------------------------------------------------------------
// Longest specimen
// ---------------------------------------------------------------------------

/// The longest dinosaur as `{ name: length_in_feet }`.
///
/// Empty input gives an empty map. On a tie the first record wins.
pub fn longest_dinosaur(dinosaurs: &[Dinosaur]) -> BTreeMap<String, f64> {
    let longest = dinosaurs.iter().fold(None::<&Dinosaur>, |best, dino| match best {
        Some(b) if b.length_in_meters >= dino.length_in_meters => Some(b),
        _ => Some(dino),
    });

    longest
        .map(|d| (d.name.clone(), d.length_in_meters * FEET_PER_METER))
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Description
// ---------------------------------------------------------------------------

/// Exact, case-sensitive lookup by `dinosaurId`.
pub fn find_dinosaur<'a>(dinosaurs: &'a [Dinosaur], id: &str) -> Option<&'a Dinosaur> {
    dinosaurs.iter().find(|d| d.dinosaur_id == id)
}

/// Two-line description of the dinosaur with `id`, or a not-found message
/// naming `id`.
pub fn dinosaur_description(dinosaurs: &[Dinosaur], id: &str) -> String {
    match find_dinosaur(dinosaurs, id) {
        Some(dino) => dino.description(),
        None => {
            log::debug!("no dinosaur with id '{id}'");
            format!("A dinosaur with an ID of '{id}' cannot be found.")
        }
    }
}

impl Dinosaur {
    /// `<name> (<pronunciation>)` followed by the info paragraph and the most
    /// recent bound of the era.
    pub fn description(&self) -> String {
        format!(
            "{} ({})\n{} It lived in the {} period, over {} million years ago.",
            self.name,
            self.pronunciation,
            self.info,
            self.period,
            format_mya(self.mya.most_recent()),
        )
    }
}

fn format_mya(v: f64) -> String {
    if v == f64::INFINITY {
        "Infinity".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::Mya;

    fn dino(id: &str, name: &str, length: f64, mya: &[f64]) -> Dinosaur {
        Dinosaur {
            dinosaur_id: id.to_string(),
            name: name.to_string(),
            pronunciation: "PRO-nun".to_string(),
            info: "Some info.".to_string(),
            period: "Late Jurassic".to_string(),
            mya: Mya(mya.to_vec()),
            length_in_meters: length,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn longest_converts_to_feet() {
        let dinos = vec![
            dino("a", "Small", 2.0, &[70.0]),
            dino("b", "Big", 10.0, &[70.0]),
            dino("c", "Medium", 5.0, &[70.0]),
        ];
        let longest = longest_dinosaur(&dinos);
        assert_eq!(longest.len(), 1);
        assert!((longest["Big"] - 32.81).abs() < 1e-9);
    }

    #[test]
    fn longest_of_nothing_is_empty() {
        assert!(longest_dinosaur(&[]).is_empty());
    }

    #[test]
    fn longest_tie_keeps_first() {
        let dinos = vec![
            dino("a", "First", 10.0, &[70.0]),
            dino("b", "Second", 10.0, &[70.0]),
        ];
        let longest = longest_dinosaur(&dinos);
        assert_eq!(longest.keys().collect::<Vec<_>>(), ["First"]);
    }

    #[test]
    fn describes_with_most_recent_mya() {
        let dinos = vec![dino("a", "Allosaurus", 12.0, &[156.0, 144.0])];
        assert_eq!(
            dinosaur_description(&dinos, "a"),
            "Allosaurus (PRO-nun)\nSome info. It lived in the Late Jurassic period, over 144 million years ago."
        );
    }

    #[test]
    fn fractional_mya_keeps_its_decimals() {
        let d = dino("a", "X", 1.0, &[77.5]);
        assert!(d.description().ends_with("over 77.5 million years ago."));
    }

    #[test]
    fn empty_mya_renders_infinity() {
        let d = dino("a", "X", 1.0, &[]);
        assert!(d.description().ends_with("over Infinity million years ago."));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let dinos = vec![dino("AbC", "X", 1.0, &[1.0])];
        assert!(find_dinosaur(&dinos, "AbC").is_some());
        assert!(find_dinosaur(&dinos, "abc").is_none());
        assert!(find_dinosaur(&dinos, "Ab").is_none());
        assert_eq!(
            dinosaur_description(&dinos, "abc"),
            "A dinosaur with an ID of 'abc' cannot be found."
        );
    }
}
