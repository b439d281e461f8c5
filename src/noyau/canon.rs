// src/noyau/canon.rs
//
// Clef canonique (dédoublonnage d’un lot) :
// - sérialisation récursive déterministe
// - sous + et ×, les deux clefs enfants sont triées (ordre total des chaînes)
// - − et ÷ gardent leur ordre
//
// Donc "1/2 + 3/4" et "3/4 + 1/2" ont la même clef ; "3 - 1" et "1 - 3" non.
// Pas d’associativité : (1 + 2) + 3 et 1 + (2 + 3) restent distincts.

use super::expr::{Expr, Op};

pub fn canonical_key(e: &Expr) -> String {
    match e {
        Expr::Nombre(r) => format!("R{}/{}", r.numer(), r.denom()),
        Expr::Binaire(op, a, b) => {
            let mut ka = canonical_key(a);
            let mut kb = canonical_key(b);
            if op.is_commutative() && kb < ka {
                std::mem::swap(&mut ka, &mut kb);
            }
            format!("{}({ka},{kb})", nom(*op))
        }
    }
}

fn nom(op: Op) -> &'static str {
    match op {
        Op::Plus => "ADD",
        Op::Moins => "SUB",
        Op::Fois => "MUL",
        Op::Divise => "DIV",
    }
}
