pub mod candidate;
pub mod catalog_id;
pub mod track;
