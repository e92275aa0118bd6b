/// Data layer: records, loading, and the temporal filter.
///
/// Architecture:
/// ```text
///  .json / .csv / bundled sample
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Dinosaur>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Dinosaur, Mya, FieldValue
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  alive at a given mya → projected values
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
