//! src/app/fichiers.rs
//!
//! Fichiers plats (lecture / écriture), sans logique de calcul.
//!
//! Contrats :
//! - toute erreur d’E/S devient `Erreur::Fichier { chemin, .. }` ; elle remonte,
//!   sauf en correction de dossier où le fichier fautif est écarté (`Rapport::echecs`)
//! - lecture : lignes vides ignorées, blancs autour retirés
//! - écriture : une entrée par ligne, fin de ligne "\n"

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::noyau::{grade, Bilan, Erreur, Exercice};

pub const FICHIER_EXERCICES: &str = "Exercises.txt";
pub const FICHIER_REPONSES: &str = "Answers.txt";
pub const SUFFIXE_BILAN: &str = "_Grade.txt";

/* ------------------------ Lecture ------------------------ */

pub fn lit_lignes(chemin: &Path) -> Result<Vec<String>, Erreur> {
    let contenu = fs::read_to_string(chemin).map_err(|e| Erreur::fichier(chemin, e))?;
    Ok(contenu
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/* ------------------------ Écriture ------------------------ */

fn ecrit_lignes<I, S>(chemin: &Path, lignes: I) -> Result<(), Erreur>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut texte = String::new();
    for l in lignes {
        texte.push_str(l.as_ref());
        texte.push('\n');
    }
    fs::write(chemin, texte).map_err(|e| Erreur::fichier(chemin, e))
}

/// Écrit Exercises.txt et Answers.txt dans `dossier` ; rend leurs chemins.
pub fn ecrit_lot(dossier: &Path, lot: &[Exercice]) -> Result<(PathBuf, PathBuf), Erreur> {
    fs::create_dir_all(dossier).map_err(|e| Erreur::fichier(dossier, e))?;

    let exercices = dossier.join(FICHIER_EXERCICES);
    let reponses = dossier.join(FICHIER_REPONSES);

    ecrit_lignes(&exercices, lot.iter().map(Exercice::ligne_enonce))?;
    ecrit_lignes(&reponses, lot.iter().map(|e| e.reponse.as_str()))?;

    info!(n = lot.len(), exercices = %exercices.display(), reponses = %reponses.display(), "lot écrit");
    Ok((exercices, reponses))
}

pub fn ecrit_bilan(chemin: &Path, bilan: &Bilan) -> Result<(), Erreur> {
    fs::write(chemin, bilan.to_string()).map_err(|e| Erreur::fichier(chemin, e))
}

/* ------------------------ Correction ------------------------ */

/// Corrige un fichier de réponses contre les lignes d’exercices déjà lues.
/// Un nombre de lignes différent est une erreur de fichier (chemin des réponses).
fn corrige_contre(exercices: &[String], reponses: &Path) -> Result<Bilan, Erreur> {
    let rep = lit_lignes(reponses)?;
    grade(exercices, &rep).map_err(|e| match e {
        Erreur::LignesDesalignees { .. } => Erreur::fichier(reponses, e),
        autre => autre,
    })
}

/// "<dossier>/<nom>_Grade.txt"
pub fn chemin_bilan(dossier: &Path, reponses: &Path) -> PathBuf {
    let nom = reponses
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Answers".to_string());
    dossier.join(format!("{nom}{SUFFIXE_BILAN}"))
}

/// Fichiers de réponses d’un dossier (récursif, triés) :
/// tous les *.txt sauf les bilans et le fichier d’exercices lui-même.
pub fn fichiers_reponses(dossier: &Path, exercices: &Path) -> Result<Vec<PathBuf>, Erreur> {
    let exclu = fs::canonicalize(exercices).ok();
    let mut out = Vec::new();
    collecte(dossier, exclu.as_deref(), &mut out)?;
    out.sort();
    Ok(out)
}

fn collecte(dossier: &Path, exclu: Option<&Path>, out: &mut Vec<PathBuf>) -> Result<(), Erreur> {
    let entrees = fs::read_dir(dossier).map_err(|e| Erreur::fichier(dossier, e))?;
    for entree in entrees {
        let chemin = entree.map_err(|e| Erreur::fichier(dossier, e))?.path();
        if chemin.is_dir() {
            collecte(&chemin, exclu, out)?;
            continue;
        }

        let nom = chemin
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !nom.ends_with(".txt") || nom.ends_with("Grade.txt") {
            continue;
        }
        if exclu.is_some() && fs::canonicalize(&chemin).ok().as_deref() == exclu {
            debug!(chemin = %chemin.display(), "fichier d’exercices ignoré");
            continue;
        }
        out.push(chemin);
    }
    Ok(())
}

/// Résultat d’une correction : fichiers corrigés, et fichiers écartés (dossier seulement).
#[derive(Debug, Default)]
pub struct Rapport {
    /// (fichier de réponses, fichier bilan, bilan)
    pub faits: Vec<(PathBuf, PathBuf, Bilan)>,
    pub echecs: Vec<Erreur>,
}

/// Mode correction complet : fichier unique ou dossier.
///
/// Fichier unique : toute erreur remonte.
/// Dossier : un fichier de réponses fautif (illisible, désaligné) est signalé,
/// noté dans `echecs`, et les autres sont corrigés quand même.
pub fn corrige_chemins(
    exercices: &Path,
    reponses: &Path,
    dossier_sortie: &Path,
) -> Result<Rapport, Erreur> {
    if !exercices.is_file() {
        return Err(Erreur::fichier(exercices, "fichier d’exercices introuvable"));
    }
    let ex = lit_lignes(exercices)?;
    let mut rapport = Rapport::default();

    if reponses.is_file() {
        fs::create_dir_all(dossier_sortie).map_err(|e| Erreur::fichier(dossier_sortie, e))?;
        let sortie = chemin_bilan(dossier_sortie, reponses);
        let bilan = corrige_un(&ex, reponses, &sortie)?;
        rapport.faits.push((reponses.to_path_buf(), sortie, bilan));
        return Ok(rapport);
    }
    if !reponses.is_dir() {
        return Err(Erreur::fichier(reponses, "ni fichier ni dossier"));
    }

    let fichiers = fichiers_reponses(reponses, exercices)?;
    if fichiers.is_empty() {
        return Err(Erreur::fichier(reponses, "aucun fichier de réponses (*.txt)"));
    }
    for rep in fichiers {
        let parent = rep.parent().unwrap_or(reponses).to_path_buf();
        let sortie = chemin_bilan(&parent, &rep);
        match corrige_un(&ex, &rep, &sortie) {
            Ok(bilan) => rapport.faits.push((rep, sortie, bilan)),
            Err(e) => {
                warn!(reponses = %rep.display(), erreur = %e, "fichier écarté");
                rapport.echecs.push(e);
            }
        }
    }
    Ok(rapport)
}

fn corrige_un(exercices: &[String], reponses: &Path, sortie: &Path) -> Result<Bilan, Erreur> {
    let bilan = corrige_contre(exercices, reponses)?;
    ecrit_bilan(sortie, &bilan)?;
    info!(
        reponses = %reponses.display(),
        bilan = %sortie.display(),
        corrects = bilan.corrects.len(),
        faux = bilan.faux.len(),
        "correction écrite"
    );
    Ok(bilan)
}
