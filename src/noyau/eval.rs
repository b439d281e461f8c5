//! Noyau : évaluation avec règles du domaine
//!
//! Parcours post-ordre de l’arbre. Les règles sont vérifiées à CHAQUE nœud binaire :
//! - a - b : interdit si a < b (pas de résultat négatif)
//! - a ÷ b : interdit si b = 0, et le quotient doit être une fraction propre
//!   (ni entier, ni fraction impropre : contrainte voulue du domaine)
//!
//! Une violation n’importe où abandonne tout l’arbre : aucune valeur partielle.

use super::analyse::parse_expression;
use super::erreur::{ErreurEval, Violation};
use super::expr::{Expr, Op};
use super::rationnel::Rationnel;

pub fn evaluate(e: &Expr) -> Result<Rationnel, Violation> {
    match e {
        Expr::Nombre(r) => Ok(r.clone()),
        Expr::Binaire(op, a, b) => {
            let a = evaluate(a)?;
            let b = evaluate(b)?;
            applique(*op, &a, &b)
        }
    }
}

fn applique(op: Op, a: &Rationnel, b: &Rationnel) -> Result<Rationnel, Violation> {
    match op {
        Op::Plus => Ok(a.sum(b)),
        Op::Fois => Ok(a.product(b)),
        Op::Moins => {
            if a < b {
                return Err(Violation::ResultatNegatif);
            }
            Ok(a.difference(b))
        }
        Op::Divise => {
            let q = a.quotient(b).map_err(|_| Violation::DivisionParZero)?;
            if !q.is_proper_fraction() {
                return Err(Violation::FractionImpropre);
            }
            Ok(q)
        }
    }
}

/// API publique : texte -> arbre -> valeur.
pub fn eval_text(texte: &str) -> Result<Rationnel, ErreurEval> {
    let e = parse_expression(texte)?;
    Ok(evaluate(&e)?)
}
