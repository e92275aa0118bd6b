//! Queries over a collection of dinosaur records: the longest specimen, a
//! description by identifier, and the dinosaurs alive at a given time.
//!
//! Every query takes the whole collection as a slice and returns a fresh value.

pub mod data;
pub mod facts;

pub use data::filter::{alive_indices, dinosaurs_alive_mya};
pub use data::model::{Dinosaur, FieldValue, Mya};
pub use facts::{dinosaur_description, find_dinosaur, longest_dinosaur};
