#![allow(dead_code)]

use std::env;

use actix_web::web;

use roster_engine::domain::catalog::{ShiftCatalog, ShiftDefinition, ShiftType};
use roster_engine::CatalogStore;

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small fixed catalog used across the tests: two mornings, an afternoon
/// and a midnight-wrapping night shift.
pub fn test_catalog() -> ShiftCatalog {
    ShiftCatalog::from_definitions([
        // 07:00-15:00
        ShiftDefinition::new("Piso 1", "M07", ShiftType::Morning, 420, 900),
        // 07:30-15:00
        ShiftDefinition::new("Piso 3", "M07b", ShiftType::Morning, 450, 900),
        // 15:00-21:00
        ShiftDefinition::new("Piso 1", "T15", ShiftType::Afternoon, 900, 1260),
        // 23:00-07:00
        ShiftDefinition::new("Piso 1", "N08", ShiftType::Night, 1380, 420),
    ])
    .expect("test catalog is valid")
}

pub fn catalog_store() -> web::Data<CatalogStore> {
    web::Data::new(CatalogStore::new(test_catalog()))
}
