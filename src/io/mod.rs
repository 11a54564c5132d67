pub mod excel;
pub mod xml;
