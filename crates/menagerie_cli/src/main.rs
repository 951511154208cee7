//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `menagerie_core` wiring end to end without a routing layer.
//! - Keep output deterministic apart from the printed version.
//!
//! Usage: `menagerie_cli [config.json]`

use menagerie_core::{
    core_version, init_logging_from_config, AnimalDraft, AnimalKind, AnimalPatch, AnimalService,
    CoreConfig, SqliteAnimalStore,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("menagerie_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig {
            cat_create_delay_ms: 0,
            ..CoreConfig::default()
        },
    };
    init_logging_from_config(&config)?;

    let store = match config.db_path.as_deref() {
        Some(path) => SqliteAnimalStore::open(path)?,
        None => SqliteAnimalStore::open_in_memory()?,
    };
    let service = AnimalService::with_store(Arc::new(store), &config);

    println!("menagerie_core version={}", core_version());

    let dog = service.create(AnimalKind::Dog, AnimalDraft::new("Rex", 3))?;
    let cat = service.create(AnimalKind::Cat, AnimalDraft::new("Mia", 2))?;
    println!("created dog id={} cat id={}", dog.id, cat.id);

    let cross_read = service.read(AnimalKind::Dog, &cat.id)?;
    println!("read Dog with cat id found={}", cross_read.is_some());

    for kind in AnimalKind::ALL {
        println!("list {kind} count={}", service.list(kind)?.len());
    }

    let updated = service.update(AnimalKind::Cat, &cat.id, &AnimalPatch::age(3))?;
    println!(
        "update Cat age={}",
        updated.map_or_else(|| "not_found".to_string(), |animal| animal.age.to_string())
    );

    println!("delete Dog removed={}", service.delete(AnimalKind::Dog, &dog.id)?);
    println!("delete Dog again removed={}", service.delete(AnimalKind::Dog, &dog.id)?);
    Ok(())
}
