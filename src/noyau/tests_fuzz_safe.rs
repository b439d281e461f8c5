//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler lecture / évaluation / correction sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée des entrées
//! - budget temps global
//! - invariant clé : aucune entrée ne fait paniquer ; une erreur est toujours typée
//! - si un texte se lit, son rendu se relit en le même arbre

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::analyse::parse_expression;
use super::correction::grade;
use super::erreur::ErreurEval;
use super::eval::{eval_text, evaluate};
use super::format::{format_expr, format_rational, parse_rational};

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de textes (bornée) ------------------------ */

/// Alphabet volontairement proche de la grammaire, avec quelques intrus.
const ALPHABET: &[&str] = &[
    "0", "1", "2", "3", "7", "12", "/", "'", " ", " ", "+", "-", "×", "÷", "*", "(", ")", "=",
    ".", "x", "é",
];

fn texte_brut(rng: &mut StdRng, max: usize) -> String {
    let n = rng.gen_range(0..=max);
    (0..n)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

/// Expressions plutôt bien formées (pour atteindre l’évaluateur).
fn texte_expr(rng: &mut StdRng, profondeur: u32) -> String {
    if profondeur == 0 || rng.gen_bool(0.3) {
        let d = rng.gen_range(1..9u32);
        return match rng.gen_range(0..3) {
            0 => format!("{}", rng.gen_range(0..10u32)),
            1 => format!("{}/{d}", rng.gen_range(0..10u32)),
            _ => format!("{}'{}/{d}", rng.gen_range(1..4u32), rng.gen_range(1..9u32)),
        };
    }
    let op = ["+", "-", "×", "÷"][rng.gen_range(0..4)];
    let a = texte_expr(rng, profondeur - 1);
    let b = texte_expr(rng, profondeur - 1);
    if rng.gen_bool(0.4) {
        format!("({a} {op} {b})")
    } else {
        format!("{a} {op} {b}")
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_textes_bruts_sans_panique() {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for _ in 0..5_000 {
        budget(start, Duration::from_secs(20));
        let s = texte_brut(&mut rng, 24);

        // aucune panique, erreurs typées
        let _ = parse_rational(&s);
        match eval_text(&s) {
            Ok(_) | Err(ErreurEval::Analyse(_)) | Err(ErreurEval::Regle(_)) => {}
        }
    }
}

#[test]
fn fuzz_rendu_stable() {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(1234);

    let mut lus = 0usize;
    for _ in 0..3_000 {
        budget(start, Duration::from_secs(20));
        let s = texte_expr(&mut rng, 4);
        let Ok(arbre) = parse_expression(&s) else {
            panic!("expression bien formée refusée: {s:?}");
        };
        lus += 1;

        let rendu = format_expr(&arbre);
        let relu = parse_expression(&rendu)
            .unwrap_or_else(|e| panic!("rendu illisible {rendu:?} (source {s:?}): {e}"));
        assert_eq!(relu, arbre, "source={s:?} rendu={rendu:?}");

        // l’évaluation ne dépend pas de l’écriture
        assert_eq!(evaluate(&relu), evaluate(&arbre));
    }
    assert_eq!(lus, 3_000);
}

#[test]
fn fuzz_valeurs_evaluees_relisibles() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..3_000 {
        let s = texte_expr(&mut rng, 3);
        if let Ok(v) = eval_text(&s) {
            // une valeur acceptée n’est jamais négative
            assert!(!v.is_negative(), "{s:?} -> {v}");
            let t = format_rational(&v);
            assert_eq!(parse_rational(&t).unwrap(), v);
        }
    }
}

#[test]
fn fuzz_correction_ne_s_interrompt_jamais() {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        budget(start, Duration::from_secs(20));
        let n = rng.gen_range(0..20);
        let exercices: Vec<String> = (0..n)
            .map(|_| {
                if rng.gen_bool(0.7) {
                    format!("{} =", texte_expr(&mut rng, 2))
                } else {
                    texte_brut(&mut rng, 12)
                }
            })
            .collect();
        let reponses: Vec<String> = (0..n).map(|_| texte_brut(&mut rng, 6)).collect();

        let bilan = grade(&exercices, &reponses).unwrap();
        assert_eq!(bilan.total(), n);

        // partition exacte de 1..=n, chaque liste croissante
        let mut tous: Vec<usize> = bilan.corrects.iter().chain(&bilan.faux).copied().collect();
        tous.sort_unstable();
        assert_eq!(tous, (1..=n).collect::<Vec<_>>());
        assert!(bilan.corrects.windows(2).all(|w| w[0] < w[1]));
        assert!(bilan.faux.windows(2).all(|w| w[0] < w[1]));
    }
}
