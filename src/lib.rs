//! Backend de administración de alquiler de vehículos
//!
//! Expuesto como librería para que los tests de integración puedan montar
//! el router real; el binario en main.rs solo agrega I/O de arranque.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
