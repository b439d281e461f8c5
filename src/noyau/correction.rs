//! Noyau : correction
//!
//! Exercice i  <->  réponse i (alignement strict des lignes).
//! Pour chaque paire: valeur de référence recalculée (analyse + règles),
//! réponse relue en notation des fichiers, comparaison EXACTE.
//! Une ligne illisible compte comme fausse ; elle n’interrompt jamais le lot.

use std::fmt;

use tracing::debug;

use super::erreur::{Erreur, ErreurEval};
use super::eval::eval_text;
use super::format::parse_rational;

/// Bilan d’une correction : indices 1-based, croissants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bilan {
    pub corrects: Vec<usize>,
    pub faux: Vec<usize>,
}

impl Bilan {
    pub fn total(&self) -> usize {
        self.corrects.len() + self.faux.len()
    }
}

/// Deux lignes exactement :
///   Correct: [1, 3]
///   Wrong: [2]
impl fmt::Display for Bilan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correct: {}", liste(&self.corrects))?;
        writeln!(f, "Wrong: {}", liste(&self.faux))
    }
}

fn liste(v: &[usize]) -> String {
    let items: Vec<String> = v.iter().map(|i| i.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn grade<E, R>(exercices: &[E], reponses: &[R]) -> Result<Bilan, Erreur>
where
    E: AsRef<str>,
    R: AsRef<str>,
{
    if exercices.len() != reponses.len() {
        return Err(Erreur::LignesDesalignees {
            exercices: exercices.len(),
            reponses: reponses.len(),
        });
    }

    let mut bilan = Bilan::default();
    for (i, (ex, rep)) in exercices.iter().zip(reponses).enumerate() {
        let index = i + 1;
        match corrige_ligne(ex.as_ref(), rep.as_ref()) {
            Ok(true) => bilan.corrects.push(index),
            Ok(false) => bilan.faux.push(index),
            Err(ErreurEval::Analyse(e)) => {
                debug!(index, erreur = %e, "ligne illisible, comptée fausse");
                bilan.faux.push(index);
            }
            Err(ErreurEval::Regle(v)) => {
                debug!(index, regle = v.kind(), "énoncé hors règles, compté faux");
                bilan.faux.push(index);
            }
        }
    }
    Ok(bilan)
}

fn corrige_ligne(exercice: &str, reponse: &str) -> Result<bool, ErreurEval> {
    let attendu = eval_text(enonce(exercice))?;
    let donne = parse_rational(sans_numero(reponse))?;
    Ok(attendu == donne)
}

/// "3. 1/2 + 1/3 =" ou "3. 1/2 + 1/3 = ?" -> "1/2 + 1/3"
fn enonce(ligne: &str) -> &str {
    let s = sans_numero(ligne).trim_end();
    let s = s.strip_suffix('?').unwrap_or(s).trim_end();
    s.strip_suffix('=').unwrap_or(s).trim_end()
}

/// Retire une numérotation "<k>. " en tête, si présente.
/// Le point doit être suivi d’un blanc : "1.5" n’est pas une numérotation.
fn sans_numero(ligne: &str) -> &str {
    let s = ligne.trim_start();
    let chiffres = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match s[chiffres..].strip_prefix('.') {
        Some(reste) if chiffres > 0 && reste.starts_with(char::is_whitespace) => reste.trim_start(),
        _ => s,
    }
}
