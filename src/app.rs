// src/app.rs
//
// Exercices Q-pur : module App (coquille)
// ---------------------------------------
// Rôle:
// - Déclarer les sous-modules (commande.rs + fichiers.rs)
// - Ré-exporter Args / Mode (pour main.rs: use crate::app::Args;)
// - Enchaîner : mode -> noyau -> fichiers
//
// Important:
// - Aucun calcul ici : tout passe par crate::noyau.
// - Un lot est atomique : si un exercice ne peut être produit, rien n’est écrit.

pub mod commande;
pub mod fichiers;

pub use commande::{Args, Mode};

use std::path::Path;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::noyau::generate_batch;

/// Point d’entrée unique de la coquille.
pub fn lance(args: &Args) -> anyhow::Result<()> {
    match args.mode()? {
        Mode::Generation { nombre, plage } => genere(args, nombre, plage),
        Mode::Correction { exercices, reponses } => corrige(args, &exercices, &reponses),
    }
}

/* ------------------------ Génération ------------------------ */

fn genere(args: &Args, nombre: i64, plage: i64) -> anyhow::Result<()> {
    let mut rng = match args.graine {
        Some(g) => StdRng::seed_from_u64(g),
        None => StdRng::from_entropy(),
    };

    info!(nombre, plage, graine = ?args.graine, "génération");
    let lot = generate_batch(&mut rng, nombre, plage)
        .with_context(|| format!("génération de {nombre} exercice(s) sur [0, {plage})"))?;

    let (ex, rep) = fichiers::ecrit_lot(&args.dossier, &lot)
        .with_context(|| format!("écriture du lot dans {}", args.dossier.display()))?;

    println!("{} exercice(s) -> {}", lot.len(), ex.display());
    println!("réponses      -> {}", rep.display());
    Ok(())
}

/* ------------------------ Correction ------------------------ */

fn corrige(args: &Args, exercices: &Path, reponses: &Path) -> anyhow::Result<()> {
    info!(exercices = %exercices.display(), reponses = %reponses.display(), "correction");
    let rapport = fichiers::corrige_chemins(exercices, reponses, &args.dossier)
        .with_context(|| format!("correction de {}", reponses.display()))?;

    for (rep, sortie, bilan) in &rapport.faits {
        println!(
            "{} : {}/{} juste(s) -> {}",
            rep.display(),
            bilan.corrects.len(),
            bilan.total(),
            sortie.display()
        );
    }

    // les fichiers écartés n’empêchent pas les autres, mais la sortie est en échec
    if !rapport.echecs.is_empty() {
        let details: Vec<String> = rapport.echecs.iter().map(|e| format!("  - {e}")).collect();
        bail!(
            "{} fichier(s) de réponses non corrigé(s) sur {}:\n{}",
            rapport.echecs.len(),
            rapport.echecs.len() + rapport.faits.len(),
            details.join("\n")
        );
    }
    Ok(())
}
