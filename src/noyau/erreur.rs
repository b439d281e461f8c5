// src/noyau/erreur.rs
//
// Taxonomie des erreurs (noyau + coquille).
//
// Deux familles:
// - "récupérables" : ErreurAnalyse, Violation (regroupées dans ErreurEval).
//   Le générateur les transforme en nouvel essai, le correcteur en "faux".
// - "terminales"   : Erreur (paramètres, génération épuisée, fichiers).
//   Elles remontent toujours jusqu’à l’appelant.

use std::path::PathBuf;

use thiserror::Error;

/// Texte illisible (fraction ou expression).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("lecture impossible de {texte:?}{}: {raison}", position_txt(.position))]
pub struct ErreurAnalyse {
    pub texte: String,
    /// Décalage (octets) dans `texte`, quand il a un sens.
    pub position: Option<usize>,
    pub raison: String,
}

impl ErreurAnalyse {
    pub fn new(texte: &str, raison: impl Into<String>) -> Self {
        Self {
            texte: texte.to_string(),
            position: None,
            raison: raison.into(),
        }
    }

    pub fn at(texte: &str, position: usize, raison: impl Into<String>) -> Self {
        Self {
            texte: texte.to_string(),
            position: Some(position),
            raison: raison.into(),
        }
    }
}

fn position_txt(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" (position {p})"),
        None => String::new(),
    }
}

/// Règle du domaine (école élémentaire) enfreinte à un nœud binaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Violation {
    #[error("negative-result")]
    ResultatNegatif,
    #[error("division-by-zero")]
    DivisionParZero,
    #[error("improper-fraction-result")]
    FractionImpropre,
}

impl Violation {
    /// Nom stable de la règle (journaux, tests).
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::ResultatNegatif => "negative-result",
            Violation::DivisionParZero => "division-by-zero",
            Violation::FractionImpropre => "improper-fraction-result",
        }
    }
}

/// Tout ce que "lire puis évaluer" peut produire comme échec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error(transparent)]
    Analyse(#[from] ErreurAnalyse),
    #[error("règle violée: {0}")]
    Regle(#[from] Violation),
}

/// Erreurs terminales : jamais absorbées, jamais remplacées par une valeur par défaut.
#[derive(Debug, Error)]
pub enum Erreur {
    #[error("paramètre invalide `{champ}`: {raison}")]
    ParametreInvalide { champ: &'static str, raison: String },

    #[error("génération épuisée pour l’exercice {index} après {tentatives} tentatives")]
    GenerationEpuisee { index: usize, tentatives: usize },

    #[error("opération de fichier impossible sur {}: {raison}", .chemin.display())]
    Fichier { chemin: PathBuf, raison: String },

    #[error("fichiers désalignés: {exercices} exercice(s) pour {reponses} réponse(s)")]
    LignesDesalignees { exercices: usize, reponses: usize },
}

impl Erreur {
    pub fn parametre(champ: &'static str, raison: impl Into<String>) -> Self {
        Erreur::ParametreInvalide {
            champ,
            raison: raison.into(),
        }
    }

    pub fn fichier(chemin: impl Into<PathBuf>, raison: impl ToString) -> Self {
        Erreur::Fichier {
            chemin: chemin.into(),
            raison: raison.to_string(),
        }
    }
}
