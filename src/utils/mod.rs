//! Utilidades compartidas
//!
//! Este módulo contiene errores, JWT y validaciones comunes.

pub mod errors;
pub mod jwt;
pub mod validation;
