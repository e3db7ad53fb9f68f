pub mod compartments;
pub mod dbsystems;
pub mod idcs;
pub mod instances;
pub mod objects;
pub mod preauth;
pub mod tags;
pub mod vcns;
