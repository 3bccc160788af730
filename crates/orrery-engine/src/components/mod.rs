pub mod entity;
pub mod instances;
pub mod label;
pub mod mesh;
pub mod path;
