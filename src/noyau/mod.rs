//! Noyau exact Q-pur : exercices d’arithmétique
//!
//! Organisation interne :
//! - rationnel.rs  : rationnel exact, toujours réduit
//! - format.rs     : notation des fichiers (3, 3/5, 2'3/5) + rendu d’arbre
//! - jetons.rs     : tokenisation paresseuse
//! - analyse.rs    : descente récursive -> Expr
//! - expr.rs       : AST (4 opérations)
//! - eval.rs       : évaluation + règles du domaine
//! - canon.rs      : clef canonique (dédoublonnage)
//! - generateur.rs : tirages, essais bornés, lots
//! - correction.rs : comparaison exacte ligne à ligne
//! - erreur.rs     : taxonomie des erreurs

pub mod analyse;
pub mod canon;
pub mod correction;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod generateur;
pub mod jetons;
pub mod rationnel;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use correction::{grade, Bilan};
pub use erreur::Erreur;
pub use generateur::{generate_batch, Exercice};
