// src/noyau/decimal.rs
//
// Décimal exact à échelle : valeur = unscaled × 10^-scale
// - unscaled : BigInt (aucune perte au-delà de 2^53)
// - scale    : nombre de chiffres après la virgule (>= 0)
//
// Le rendu texte retire les zéros fractionnaires finaux ("1.50" -> "1.5", "2.0" -> "2").

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::erreur::CalcError;

/// Précision par défaut de `divide` (chiffres fractionnaires du quotient).
pub const PRECISION_DIVISION: u32 = 20;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

#[derive(Clone, Debug)]
pub struct Decimal {
    unscaled: BigInt,
    scale: u32,
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    /// Décompose un littéral décimal : signe optionnel, au plus un point.
    /// Accepte "12", "-3.25", "5." et ".5".
    pub fn parse(s: &str) -> Result<Self, CalcError> {
        let invalide = || CalcError::syntaxe(format!("nombre invalide: '{s}'"));

        let (negatif, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s),
        };

        let (entier, frac) = corps.split_once('.').unwrap_or((corps, ""));
        let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if !chiffres_ok(entier) || !chiffres_ok(frac) || entier.len() + frac.len() == 0 {
            return Err(invalide());
        }

        let tout = format!("{entier}{frac}");
        let n = BigInt::parse_bytes(tout.as_bytes(), 10).ok_or_else(invalide)?;
        let unscaled = if negatif { -n } else { n };

        Ok(Self::new(unscaled, frac.len() as u32))
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn add(&self, other: &Decimal) -> Decimal {
        let (a, b, scale) = aligner(self, other);
        Decimal::new(a + b, scale)
    }

    pub fn subtract(&self, other: &Decimal) -> Decimal {
        let (a, b, scale) = aligner(self, other);
        Decimal::new(a - b, scale)
    }

    /// Pas d’alignement : les échelles s’additionnent.
    pub fn multiply(&self, other: &Decimal) -> Decimal {
        Decimal::new(&self.unscaled * &other.unscaled, self.scale + other.scale)
    }

    /// Quotient tronqué à `precision` chiffres fractionnaires.
    pub fn divide(&self, other: &Decimal, precision: u32) -> Result<Decimal, CalcError> {
        if other.unscaled.is_zero() {
            return Err(CalcError::division_par_zero());
        }

        let dividende = &self.unscaled * pow10(precision);
        let quotient = if self.scale >= other.scale {
            dividende / (&other.unscaled * pow10(self.scale - other.scale))
        } else {
            (dividende * pow10(other.scale - self.scale)) / &other.unscaled
        };

        Ok(Decimal::new(quotient, precision))
    }

    /// Même valeur, échelle minimale (zéros fractionnaires retirés de unscaled).
    pub fn normalize(&self) -> Decimal {
        let dix = BigInt::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;

        if unscaled.is_zero() {
            return Decimal::zero();
        }
        while scale > 0 && (&unscaled % &dix).is_zero() {
            unscaled /= &dix;
            scale -= 1;
        }
        Decimal::new(unscaled, scale)
    }

    /// Lecture flottante (perte possible, par nature).
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// Aligne deux décimaux sur la plus grande échelle.
fn aligner(a: &Decimal, b: &Decimal) -> (BigInt, BigInt, u32) {
    if a.scale == b.scale {
        return (a.unscaled.clone(), b.unscaled.clone(), a.scale);
    }

    let scale = a.scale.max(b.scale);
    let va = &a.unscaled * pow10(scale - a.scale);
    let vb = &b.unscaled * pow10(scale - b.scale);
    (va, vb, scale)
}

/* ------------------------ Rendu (scaled -> texte) ------------------------ */

/// Réinsère le point à `digits` chiffres de la droite, complète par des zéros,
/// puis retire les zéros fractionnaires finaux.
fn scaled_to_decimal(scaled: &BigInt, digits: u32) -> String {
    let signe = if scaled.is_negative() { "-" } else { "" };
    let magnitude = scaled.abs();

    if digits == 0 {
        return format!("{signe}{magnitude}");
    }

    let scale = pow10(digits);
    let int_part = &magnitude / &scale;
    let frac_part = &magnitude % &scale;

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        format!("{signe}{int_part}")
    } else {
        format!("{signe}{int_part}.{frac}")
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&scaled_to_decimal(&self.unscaled, self.scale))
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

impl std::ops::Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.unscaled, self.scale)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}

/// Égalité de valeur : "1.50" == "1.5".
impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = aligner(self, other);
        a == b
    }
}

impl Eq for Decimal {}
