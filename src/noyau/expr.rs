// src/noyau/expr.rs
//
// AST exact (sans flottants), quatre opérations seulement.
// - Nombre : feuille rationnelle
// - Binaire : opérateur + deux sous-arbres possédés (Box), pas de partage
//
// Immuable une fois construit : aucune méthode ne modifie un arbre existant.

use super::rationnel::Rationnel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Op {
    pub const TOUS: [Op; 4] = [Op::Plus, Op::Moins, Op::Fois, Op::Divise];

    /// × et ÷ lient plus fort que + et −.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Moins => 1,
            Op::Fois | Op::Divise => 2,
        }
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, Op::Plus | Op::Fois)
    }

    /// Symbole tel qu’écrit dans les fichiers d’exercices.
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '×',
            Op::Divise => '÷',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Nombre(Rationnel),
    Binaire(Op, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    /// Nombre d’opérateurs (nœuds internes).
    pub fn nb_operateurs(&self) -> usize {
        match self {
            Expr::Nombre(_) => 0,
            Expr::Binaire(_, a, b) => 1 + a.nb_operateurs() + b.nb_operateurs(),
        }
    }
}
