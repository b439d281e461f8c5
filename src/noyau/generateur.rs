//! Noyau : génération d’exercices
//!
//! arbre aléatoire -> texte -> relecture -> évaluation (règles) -> clef canonique
//!
//! Chaque exercice a un budget d’essais fixe : un essai rejeté (règle violée,
//! relecture impossible, doublon) est jeté sans bruit et on recommence.
//! Budget épuisé => `Erreur::GenerationEpuisee`, et le lot entier échoue
//! (aucun lot partiel n’est rendu).

use std::collections::HashSet;

use num_bigint::BigInt;
use num_rational::BigRational;
use rand::Rng;
use tracing::{debug, trace, warn};

use super::analyse::parse_expression;
use super::canon::canonical_key;
use super::erreur::{Erreur, ErreurEval};
use super::eval::evaluate;
use super::expr::{Expr, Op};
use super::format::{format_expr, format_rational};
use super::rationnel::Rationnel;

/// Opérateurs par exercice : au plus 3.
pub const OPERATEURS_MAX: usize = 3;

/// Essais par exercice avant abandon.
pub const TENTATIVES_MAX: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exercice {
    /// 1-based
    pub index: usize,
    pub enonce: String,
    pub reponse: String,
}

impl Exercice {
    /// Ligne du fichier d’exercices.
    pub fn ligne_enonce(&self) -> String {
        format!("{} =", self.enonce)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Bornes exclusives des nombres tirés (> 1).
    pub plage: u64,
    pub operateurs_max: usize,
    pub tentatives: usize,
}

impl Reglages {
    pub fn new(plage: u64) -> Self {
        Self {
            plage,
            operateurs_max: OPERATEURS_MAX,
            tentatives: TENTATIVES_MAX,
        }
    }
}

/* ------------------------ Tirages ------------------------ */

/// Une chance sur deux : naturel dans [0, plage) ;
/// sinon fraction propre, dénominateur dans [2, plage), numérateur dans [1, dénominateur).
/// Avec plage = 2 l’intervalle des dénominateurs est vide : on tire un naturel.
pub fn random_operand<R: Rng + ?Sized>(rng: &mut R, plage: u64) -> Rationnel {
    if plage <= 2 || rng.gen_bool(0.5) {
        return Rationnel::from_integer(rng.gen_range(0..plage));
    }
    let d = rng.gen_range(2..plage);
    let n = rng.gen_range(1..d);
    Rationnel::from(BigRational::new(BigInt::from(n), BigInt::from(d)))
}

/// Arbre avec un nombre d’opérateurs uniforme dans [0, operateurs_max].
pub fn random_tree<R: Rng + ?Sized>(rng: &mut R, plage: u64, operateurs_max: usize) -> Expr {
    let k = rng.gen_range(0..=operateurs_max);
    construit(rng, plage, k)
}

/// `k` opérateurs exactement ; la répartition gauche/droite est tirée à chaque nœud.
fn construit<R: Rng + ?Sized>(rng: &mut R, plage: u64, k: usize) -> Expr {
    if k == 0 {
        return Expr::Nombre(random_operand(rng, plage));
    }
    let op = Op::TOUS[rng.gen_range(0..Op::TOUS.len())];
    let gauche = rng.gen_range(0..k);
    let a = construit(rng, plage, gauche);
    let b = construit(rng, plage, k - 1 - gauche);
    Expr::binaire(op, a, b)
}

/* ------------------------ Un exercice ------------------------ */

/// Tire jusqu’à trouver un exercice valide et inédit pour `vus` (lot courant).
pub fn generate_one<R: Rng + ?Sized>(
    rng: &mut R,
    reglages: &Reglages,
    vus: &mut HashSet<String>,
) -> Result<(Expr, Rationnel), Erreur> {
    for essai in 0..reglages.tentatives {
        let arbre = random_tree(rng, reglages.plage, reglages.operateurs_max);

        // On évalue ce qui sera écrit : le texte relu, pas l’arbre tiré.
        let texte = format_expr(&arbre);
        let verdict = parse_expression(&texte)
            .map_err(ErreurEval::from)
            .and_then(|relu| evaluate(&relu).map(|v| (relu, v)).map_err(ErreurEval::from));

        let (relu, valeur) = match verdict {
            Ok(ok) => ok,
            Err(ErreurEval::Regle(v)) => {
                trace!(essai, texte = %texte, regle = v.kind(), "essai rejeté");
                continue;
            }
            Err(ErreurEval::Analyse(e)) => {
                trace!(essai, texte = %texte, erreur = %e, "texte illisible, essai rejeté");
                continue;
            }
        };

        if !vus.insert(canonical_key(&relu)) {
            trace!(essai, texte = %texte, "doublon");
            continue;
        }

        return Ok((relu, valeur));
    }

    // rang de l’exercice dans le lot courant
    let index = vus.len() + 1;
    warn!(index, tentatives = reglages.tentatives, "budget d’essais épuisé");
    Err(Erreur::GenerationEpuisee {
        index,
        tentatives: reglages.tentatives,
    })
}

/* ------------------------ Un lot ------------------------ */

/// `n` exercices distincts (clef canonique) sur la plage `plage`.
/// Exige n > 0 et plage > 1.
pub fn generate_batch<R: Rng + ?Sized>(
    rng: &mut R,
    n: i64,
    plage: i64,
) -> Result<Vec<Exercice>, Erreur> {
    if n <= 0 {
        return Err(Erreur::parametre("nombre", format!("doit être > 0 (reçu {n})")));
    }
    if plage <= 1 {
        return Err(Erreur::parametre("plage", format!("doit être > 1 (reçu {plage})")));
    }
    let n = usize::try_from(n).map_err(|_| Erreur::parametre("nombre", "trop grand"))?;
    let plage = u64::try_from(plage).map_err(|_| Erreur::parametre("plage", "trop grande"))?;

    genere_lot(rng, n, &Reglages::new(plage))
}

pub(crate) fn genere_lot<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    reglages: &Reglages,
) -> Result<Vec<Exercice>, Erreur> {
    // `n` vient de l’utilisateur : réservation bornée, le lot grandit ensuite
    let reserve = n.min(reglages.tentatives);
    let mut vus: HashSet<String> = HashSet::with_capacity(reserve);
    let mut lot = Vec::with_capacity(reserve);

    for index in 1..=n {
        let (arbre, valeur) = generate_one(rng, reglages, &mut vus)?;
        lot.push(Exercice {
            index,
            enonce: format_expr(&arbre),
            reponse: format_rational(&valeur),
        });
    }

    debug!(n, plage = reglages.plage, "lot généré");
    Ok(lot)
}
