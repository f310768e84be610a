//! 同じ写真の低解像度版と高解像度版のあいだで、
//! Keyword / Subject / HierarchicalSubject を統合するライブラリ。

pub mod config;
pub mod domain;
pub mod error;
pub mod store;
