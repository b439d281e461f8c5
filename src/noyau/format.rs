// src/noyau/format.rs
//
// Notation des fichiers (aller ET retour) :
// - entier          : "3"
// - fraction propre : "3/5"
// - fraction mixte  : "2'3/5"   (= 2 + 3/5)
// Un signe "-" unique en tête pour les négatifs ("-1'3/5").
//
// + rendu texte d’un arbre : " + ", " - ", " × ", " ÷ " et parenthèses minimales.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::erreur::ErreurAnalyse;
use super::expr::{Expr, Op};
use super::rationnel::Rationnel;

/* ------------------------ Rationnel -> texte ------------------------ */

pub fn format_rational(r: &Rationnel) -> String {
    let n = r.numer();
    let d = r.denom();

    if r.is_integer() {
        return format!("{n}");
    }

    let abs = n.abs();
    if &abs < d {
        return format!("{n}/{d}");
    }

    // fraction mixte : partie entière + reste (toujours non nul ici, car réduit et d > 1)
    let entier = &abs / d;
    let reste = &abs % d;
    let signe = if n.is_negative() { "-" } else { "" };
    format!("{signe}{entier}'{reste}/{d}")
}

/* ------------------------ texte -> Rationnel ------------------------ */

/// Lit une valeur en notation des fichiers (espaces autour tolérés).
pub fn parse_rational(texte: &str) -> Result<Rationnel, ErreurAnalyse> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurAnalyse::new(texte, "valeur vide"));
    }

    let (negatif, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let valeur = match corps.split_once('\'') {
        // "W'N/D"
        Some((entier, fraction)) => {
            let w = chiffres(texte, entier, "partie entière")?;
            let (n, d) = fraction_nd(texte, fraction)?;
            let f = Rationnel::new(n, d).map_err(|_| denominateur_nul(texte))?;
            Rationnel::from_integer(w).sum(&f)
        }
        None => match corps.split_once('/') {
            // "N/D"
            Some(_) => {
                let (n, d) = fraction_nd(texte, corps)?;
                Rationnel::new(n, d).map_err(|_| denominateur_nul(texte))?
            }
            // "N"
            None => Rationnel::from_integer(chiffres(texte, corps, "entier")?),
        },
    };

    Ok(if negatif {
        Rationnel::zero().difference(&valeur)
    } else {
        valeur
    })
}

/// "N/D" -> (N, D), D contrôlé non nul par l’appelant via Rationnel::new.
fn fraction_nd(texte: &str, s: &str) -> Result<(BigInt, BigInt), ErreurAnalyse> {
    let (n, d) = s
        .split_once('/')
        .ok_or_else(|| ErreurAnalyse::new(texte, "fraction attendue (N/D)"))?;
    let n = chiffres(texte, n, "numérateur")?;
    let d = chiffres(texte, d, "dénominateur")?;
    if d.is_zero() {
        return Err(denominateur_nul(texte));
    }
    Ok((n, d))
}

/// Suite non vide de chiffres ASCII (aucun signe : un "-" ici est une forme invalide).
fn chiffres(texte: &str, s: &str, quoi: &str) -> Result<BigInt, ErreurAnalyse> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErreurAnalyse::new(texte, format!("{quoi} invalide: {s:?}")));
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| ErreurAnalyse::new(texte, format!("{quoi} invalide: {s:?}")))
}

fn denominateur_nul(texte: &str) -> ErreurAnalyse {
    ErreurAnalyse::new(texte, "dénominateur nul")
}

/* ------------------------ Arbre -> texte ------------------------ */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cote {
    Gauche,
    Droite,
}

/// Rendu "1/2 + 3 × (4 - 1)".
/// Parenthèses si l’enfant lie moins fort que le parent, ou à précédence égale
/// côté droit (grammaire associative à gauche) : relire le texte redonne l’arbre.
pub fn format_expr(e: &Expr) -> String {
    let mut out = String::new();
    ecrit(e, None, &mut out);
    out
}

fn ecrit(e: &Expr, parent: Option<(Op, Cote)>, out: &mut String) {
    match e {
        Expr::Nombre(r) => out.push_str(&format_rational(r)),
        Expr::Binaire(op, a, b) => {
            let parens = match parent {
                None => false,
                Some((p, cote)) => {
                    op.precedence() < p.precedence()
                        || (op.precedence() == p.precedence() && cote == Cote::Droite)
                }
            };

            if parens {
                out.push('(');
            }
            ecrit(a, Some((*op, Cote::Gauche)), out);
            out.push(' ');
            out.push(op.symbole());
            out.push(' ');
            ecrit(b, Some((*op, Cote::Droite)), out);
            if parens {
                out.push(')');
            }
        }
    }
}
