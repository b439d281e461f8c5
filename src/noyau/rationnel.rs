// src/noyau/rationnel.rs
//
// Rationnel exact (sans flottants), toujours réduit.
//
// Invariants (garantis par BigRational, jamais contournés ici):
// - dénominateur > 0
// - pgcd(|num|, den) = 1
// Aucun état non réduit n’est observable hors de ce module.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("division par zéro")]
pub struct DivisionParZero;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rationnel(BigRational);

impl Rationnel {
    /// n/d réduit ; refuse d = 0.
    pub fn new(n: impl Into<BigInt>, d: impl Into<BigInt>) -> Result<Self, DivisionParZero> {
        let d = d.into();
        if d.is_zero() {
            return Err(DivisionParZero);
        }
        // BigRational::new réduit et remet le signe au numérateur.
        Ok(Self(BigRational::new(n.into(), d)))
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.denom().is_one()
    }

    /// |num| < den ET den > 1 (donc ni entier, ni fraction impropre).
    pub fn is_proper_fraction(&self) -> bool {
        let d = self.0.denom();
        !d.is_one() && self.0.numer().abs() < *d
    }

    pub fn sum(&self, autre: &Self) -> Self {
        Self(&self.0 + &autre.0)
    }

    pub fn difference(&self, autre: &Self) -> Self {
        Self(&self.0 - &autre.0)
    }

    pub fn product(&self, autre: &Self) -> Self {
        Self(&self.0 * &autre.0)
    }

    pub fn quotient(&self, diviseur: &Self) -> Result<Self, DivisionParZero> {
        if diviseur.is_zero() {
            return Err(DivisionParZero);
        }
        Ok(Self(&self.0 / &diviseur.0))
    }
}

impl From<BigRational> for Rationnel {
    fn from(r: BigRational) -> Self {
        Self(r)
    }
}

/// Affichage brut "n" ou "n/d" (debug). La notation des fichiers est dans format.rs.
impl fmt::Display for Rationnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}
