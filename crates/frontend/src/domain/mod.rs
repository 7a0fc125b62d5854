pub mod a001_translations;
pub mod a002_landing;
