// src/main.rs
//
// Exercices Q-pur : point d’entrée (ligne de commande)
// ----------------------------------------------------
// But:
// - Journal : tracing-subscriber sur stderr, filtre RUST_LOG (défaut "info")
// - Arguments : clap (Args), contrôlés avant tout travail
// - Sortie : code 0 si tout est écrit, code non nul sinon (message sur stderr)
//
// IMPORTANT (structure projet):
// - toute la logique vit dans src/app.rs (coquille) et src/noyau/ (calcul exact)
// - ici: point d’entrée seulement

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod app;
mod noyau;

use app::Args;

/* ------------------------ Journal ------------------------ */

fn installer_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/* ------------------------ Entrée ------------------------ */

fn main() -> ExitCode {
    installer_journal();

    // "-n abc", "-r 1" ... : clap affiche l’usage et sort en code 2
    let args = Args::parse();

    match app::lance(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("erreur: {e:#}");
            ExitCode::FAILURE
        }
    }
}
