//! src/app/commande.rs
//!
//! Ligne de commande (sans noyau, sans fichiers).
//!
//! Rôle : décrire les options, les borner, et décider du mode.
//! - génération : -n <nombre> -r <plage>
//! - correction : -e <exercices> -a <réponses (fichier ou dossier)>
//!
//! Les bornes numériques sont contrôlées par clap AVANT tout travail :
//! "-n abc" ou "-r 1" sont refusés avec un message et un code de sortie non nul.

use std::path::PathBuf;

use clap::Parser;

use crate::noyau::Erreur;

/// Générateur et correcteur d’exercices d’arithmétique (entiers et fractions).
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Nombre d’exercices à générer (≥ 1).
    #[arg(short = 'n', long = "nombre", visible_alias = "number",
          value_parser = clap::value_parser!(i64).range(1..))]
    pub nombre: Option<i64>,

    /// Borne exclusive des nombres tirés (≥ 2).
    #[arg(short = 'r', long = "plage", visible_alias = "range",
          value_parser = clap::value_parser!(i64).range(2..))]
    pub plage: Option<i64>,

    /// Fichier d’exercices à corriger.
    #[arg(short = 'e', long = "exercices", visible_alias = "exercise")]
    pub exercices: Option<PathBuf>,

    /// Fichier de réponses, ou dossier de fichiers de réponses.
    #[arg(short = 'a', long = "reponses", visible_alias = "answer")]
    pub reponses: Option<PathBuf>,

    /// Dossier où écrire Exercises.txt / Answers.txt / <nom>_Grade.txt.
    #[arg(short = 'o', long = "dossier", default_value = ".")]
    pub dossier: PathBuf,

    /// Graine du générateur (lots reproductibles).
    #[arg(long = "graine", visible_alias = "seed")]
    pub graine: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Generation { nombre: i64, plage: i64 },
    Correction { exercices: PathBuf, reponses: PathBuf },
}

impl Args {
    /// Un seul mode, complet.
    pub fn mode(&self) -> Result<Mode, Erreur> {
        let generation = self.nombre.is_some() || self.plage.is_some();
        let correction = self.exercices.is_some() || self.reponses.is_some();

        match (generation, correction) {
            (true, true) => Err(Erreur::parametre(
                "mode",
                "génération (-n, -r) et correction (-e, -a) sont exclusives",
            )),
            (false, false) => Err(Erreur::parametre(
                "mode",
                "indiquer -n et -r (génération) ou -e et -a (correction)",
            )),
            (true, false) => match (self.nombre, self.plage) {
                (Some(nombre), Some(plage)) => Ok(Mode::Generation { nombre, plage }),
                (None, _) => Err(Erreur::parametre("nombre", "manquant (-n)")),
                (_, None) => Err(Erreur::parametre("plage", "manquante (-r)")),
            },
            (false, true) => match (&self.exercices, &self.reponses) {
                (Some(e), Some(a)) => Ok(Mode::Correction {
                    exercices: e.clone(),
                    reponses: a.clone(),
                }),
                (None, _) => Err(Erreur::parametre("exercices", "manquant (-e)")),
                (_, None) => Err(Erreur::parametre("reponses", "manquant (-a)")),
            },
        }
    }
}
