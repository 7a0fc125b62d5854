pub mod a001_translations;
