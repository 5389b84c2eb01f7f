// src/noyau/valeur.rs
//
// Valeur numérique du noyau : entier EXACT (BigInt, non borné) ou réel (f64).
//
// Règles de promotion :
// - Entier ⊕ Entier reste Entier pour + - * % et ** (exposant ≥ 0)
// - "/" donne toujours un réel
// - dès qu’un réel intervient, le calcul passe en f64
//
// Garde-fou : une puissance entière exacte ne doit pas dépasser BITS_PUISSANCE_MAX
// (sinon le calcul ne serait plus “instantané”).

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalcul;

/// Taille maximale (en bits) d’un résultat exact de a ** b.
pub const BITS_PUISSANCE_MAX: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Entier(BigInt),
    Reel(f64),
}

impl Valeur {
    pub fn entier(n: i64) -> Self {
        Valeur::Entier(BigInt::from(n))
    }

    /// Conversion vers f64 ; un entier hors de portée de f64 est refusé.
    pub fn en_reel(&self) -> Result<f64, ErreurCalcul> {
        match self {
            Valeur::Reel(x) => Ok(*x),
            Valeur::Entier(n) => n
                .to_f64()
                .filter(|x| x.is_finite())
                .ok_or_else(|| ErreurCalcul::invalide("entier trop grand pour un réel")),
        }
    }

    /// Valeur entière exacte si elle existe (Entier, ou réel fini sans partie fractionnaire).
    pub fn en_entier(&self) -> Option<BigInt> {
        match self {
            Valeur::Entier(n) => Some(n.clone()),
            Valeur::Reel(x) if x.is_finite() && x.fract() == 0.0 => BigInt::from_f64(*x),
            Valeur::Reel(_) => None,
        }
    }

    pub fn est_zero(&self) -> bool {
        match self {
            Valeur::Entier(n) => n.is_zero(),
            Valeur::Reel(x) => *x == 0.0,
        }
    }

    pub fn oppose(&self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(-n),
            Valeur::Reel(x) => Valeur::Reel(-x),
        }
    }

    pub fn absolue(&self) -> Valeur {
        match self {
            Valeur::Entier(n) => Valeur::Entier(n.abs()),
            Valeur::Reel(x) => Valeur::Reel(x.abs()),
        }
    }
}

/* ------------------------ Opérations binaires ------------------------ */

pub fn addition(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Ok(Valeur::Entier(x + y)),
        _ => Ok(Valeur::Reel(a.en_reel()? + b.en_reel()?)),
    }
}

pub fn soustraction(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Ok(Valeur::Entier(x - y)),
        _ => Ok(Valeur::Reel(a.en_reel()? - b.en_reel()?)),
    }
}

pub fn multiplication(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => Ok(Valeur::Entier(x * y)),
        _ => Ok(Valeur::Reel(a.en_reel()? * b.en_reel()?)),
    }
}

/// Division “vraie” : toujours un réel.
pub fn division(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    if b.est_zero() {
        return Err(ErreurCalcul::DivisionParZero);
    }
    Ok(Valeur::Reel(a.en_reel()? / b.en_reel()?))
}

/// Modulo “plancher” : le reste prend le signe du diviseur (7 % -3 = -2).
pub fn modulo(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    if b.est_zero() {
        return Err(ErreurCalcul::DivisionParZero);
    }

    match (a, b) {
        (Valeur::Entier(x), Valeur::Entier(y)) => {
            let mut r = x % y;
            if !r.is_zero() && r.is_negative() != y.is_negative() {
                r += y;
            }
            Ok(Valeur::Entier(r))
        }
        _ => Ok(Valeur::Reel(modulo_reel(a.en_reel()?, b.en_reel()?))),
    }
}

/// x mod y (plancher) sur f64. y ≠ 0 supposé.
pub fn modulo_reel(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
    } else {
        r
    }
}

pub fn puissance(a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    if let (Valeur::Entier(x), Valeur::Entier(y)) = (a, b) {
        if !y.is_negative() {
            return puissance_entiere(x, y);
        }
        if x.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
    }

    let x = a.en_reel()?;
    let y = b.en_reel()?;

    if x == 0.0 && y < 0.0 {
        return Err(ErreurCalcul::DivisionParZero);
    }
    if x < 0.0 && y.is_finite() && y.fract() != 0.0 {
        return Err(ErreurCalcul::ResultatComplexe);
    }

    let r = x.powf(y);
    if r.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(ErreurCalcul::invalide("dépassement de capacité (puissance)"));
    }
    Ok(Valeur::Reel(r))
}

/// x ** n exact, n ≥ 0.
fn puissance_entiere(x: &BigInt, n: &BigInt) -> Result<Valeur, ErreurCalcul> {
    // bases triviales : pas de borne sur n
    if n.is_zero() || x.is_one() {
        return Ok(Valeur::entier(1));
    }
    if x.is_zero() {
        return Ok(Valeur::entier(0));
    }
    if *x == BigInt::from(-1) {
        let pair = (n % BigInt::from(2)).is_zero();
        return Ok(Valeur::entier(if pair { 1 } else { -1 }));
    }

    let trop_grand = n
        .to_u64()
        .and_then(|e| e.checked_mul(x.bits()))
        .map_or(true, |bits| bits > BITS_PUISSANCE_MAX);
    if trop_grand {
        return Err(ErreurCalcul::invalide("puissance entière trop grande"));
    }

    let e = n
        .to_u32()
        .ok_or_else(|| ErreurCalcul::invalide("exposant trop grand"))?;
    Ok(Valeur::Entier(x.pow(e)))
}
