//! SeaORM entities for the `categorias` and `produtos` tables.
//!
//! Both entities live here because the relation is bidirectional: a
//! Category has many Products and every Product belongs to exactly one
//! Category, with cascade on delete.

pub mod categorias;
pub mod produtos;
