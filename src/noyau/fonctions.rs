// src/noyau/fonctions.rs
//
// Bibliothèque de fonctions (liste blanche) + contrôles de domaine.
// Seul point d’entrée : `applique`, appelé par l’évaluation d’un noeud Expr::Appel.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use super::erreur::ErreurCalcul;
use super::expr::Fonction;
use super::trig::{trig, ModeAngle, TrigFn};
use super::valeur::{puissance, Valeur};

/// Garde-fou : n maximal pour fact, et nombre maximal de facteurs pour nPr/nCr.
pub const FACT_MAX: u64 = 5000;

/// Applique une fonction de la liste blanche à ses arguments déjà évalués.
pub fn applique(f: Fonction, args: &[Valeur], mode: ModeAngle) -> Result<Valeur, ErreurCalcul> {
    match (f, args) {
        (Fonction::Abs, [x]) => Ok(x.absolue()),
        (Fonction::Round, [x]) => arrondi(x),
        (Fonction::Round, [x, n]) => arrondi_a(x, n),
        (Fonction::Pow, [a, b]) => puissance(a, b),
        (Fonction::Exp, [x]) => exp(x),

        (Fonction::Sin, [x]) => Ok(Valeur::Reel(trig(TrigFn::Sin, x.en_reel()?, mode)?)),
        (Fonction::Cos, [x]) => Ok(Valeur::Reel(trig(TrigFn::Cos, x.en_reel()?, mode)?)),
        (Fonction::Tan, [x]) => Ok(Valeur::Reel(trig(TrigFn::Tan, x.en_reel()?, mode)?)),

        (Fonction::Ln, [x]) => ln(x),
        (Fonction::Log10, [x]) => log10(x),
        (Fonction::Log, [x]) => log(x, &Valeur::entier(10)),
        (Fonction::Log, [x, base]) => log(x, base),

        (Fonction::Sqrt, [x]) => sqrt(x),
        (Fonction::Root, [x]) => root(x, &Valeur::entier(2)),
        (Fonction::Root, [x, n]) => root(x, n),

        (Fonction::Fact, [n]) => fact(n),
        (Fonction::NPr, [n, r]) => npr(n, r),
        (Fonction::NCr, [n, r]) => ncr(n, r),

        _ => Err(ErreurCalcul::invalide(format!(
            "{}: {} argument(s)",
            f.nom(),
            args.len()
        ))),
    }
}

/* ------------------------ abs / round / exp ------------------------ */

/// round(x) : entier le plus proche, égalité vers le pair.
fn arrondi(x: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match x {
        Valeur::Entier(_) => Ok(x.clone()),
        Valeur::Reel(v) => BigInt::from_f64(v.round_ties_even())
            .map(Valeur::Entier)
            .ok_or_else(|| ErreurCalcul::invalide("round: valeur non finie")),
    }
}

/// round(x, n) : n décimales (n < 0 arrondit aux dizaines, centaines, …). n doit être un entier.
fn arrondi_a(x: &Valeur, n: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let n = match n {
        // au-delà de i32 : aussi loin que possible, le résultat est le même
        Valeur::Entier(n) => n
            .to_i32()
            .unwrap_or(if n.is_negative() { i32::MIN } else { i32::MAX }),
        Valeur::Reel(_) => {
            return Err(ErreurCalcul::invalide("round: nombre de décimales non entier"))
        }
    };

    match x {
        Valeur::Entier(m) if n >= 0 => Ok(Valeur::Entier(m.clone())),
        Valeur::Entier(m) => Ok(Valeur::Entier(arrondi_entier(m, n.unsigned_abs()))),
        Valeur::Reel(v) if !v.is_finite() => Ok(x.clone()),
        Valeur::Reel(v) if n < 0 => {
            // 10^-n au-delà de f64 : tout réel fini s’arrondit à zéro (signe conservé)
            let p = 10f64.powi(n.saturating_neg().min(400));
            if p.is_infinite() {
                return Ok(Valeur::Reel(0.0f64.copysign(*v)));
            }
            Ok(Valeur::Reel((v / p).round_ties_even() * p))
        }
        Valeur::Reel(v) => {
            let facteur = 10f64.powi(n.min(400));
            let agrandi = v * facteur;
            // plus de décimales que f64 n’en porte : rien à arrondir
            if !agrandi.is_finite() {
                return Ok(x.clone());
            }
            Ok(Valeur::Reel(agrandi.round_ties_even() / facteur))
        }
    }
}

/// Arrondi de m au multiple de 10^k le plus proche (égalité vers le pair).
fn arrondi_entier(m: &BigInt, k: u32) -> BigInt {
    // plus de chiffres décimaux à retirer que m n’en a : résultat nul
    if u64::from(k) > m.bits() {
        return BigInt::zero();
    }

    let p = BigInt::from(10).pow(k);
    let a = m.abs();
    let mut q = &a / &p;
    let double_reste = (&a % &p) * 2;

    let impair = !(&q % 2u32).is_zero();
    if double_reste > p || (double_reste == p && impair) {
        q += 1;
    }

    let r = q * p;
    if m.is_negative() {
        -r
    } else {
        r
    }
}

fn exp(x: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    let r = v.exp();
    if r.is_infinite() && v.is_finite() {
        return Err(ErreurCalcul::invalide("exp: dépassement de capacité"));
    }
    Ok(Valeur::Reel(r))
}

/* ------------------------ Logarithmes ------------------------ */

fn ln(x: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    if v <= 0.0 {
        return Err(ErreurCalcul::Domaine);
    }
    Ok(Valeur::Reel(v.ln()))
}

fn log10(x: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    if v <= 0.0 {
        return Err(ErreurCalcul::Domaine);
    }
    Ok(Valeur::Reel(v.log10()))
}

fn log(x: &Valeur, base: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    let b = base.en_reel()?;
    if v <= 0.0 || b <= 0.0 || b == 1.0 {
        return Err(ErreurCalcul::Domaine);
    }
    Ok(Valeur::Reel(v.ln() / b.ln()))
}

/* ------------------------ Racines ------------------------ */

fn sqrt(x: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    if v < 0.0 {
        return Err(ErreurCalcul::ResultatComplexe);
    }
    Ok(Valeur::Reel(v.sqrt()))
}

/// root(x, n) : racine n-ième réelle. n est tronqué vers zéro.
fn root(x: &Valeur, n: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let v = x.en_reel()?;
    let n = n
        .en_reel()?
        .trunc()
        .to_i64()
        .ok_or_else(|| ErreurCalcul::invalide("root: indice non représentable"))?;

    if n <= 0 {
        return Err(ErreurCalcul::RacineInvalide);
    }

    let inverse = 1.0 / n as f64;
    if v < 0.0 {
        if n % 2 == 0 {
            return Err(ErreurCalcul::ResultatComplexe);
        }
        return Ok(Valeur::Reel(-(-v).powf(inverse)));
    }
    Ok(Valeur::Reel(v.powf(inverse)))
}

/* ------------------------ Combinatoire (entiers exacts) ------------------------ */

fn entier_requis(v: &Valeur, message: &'static str) -> Result<BigInt, ErreurCalcul> {
    v.en_entier().ok_or(ErreurCalcul::EntierRequis(message))
}

/// Produit exact bas..=haut (vide => 1).
fn produit(bas: &BigInt, haut: &BigInt) -> BigInt {
    let mut acc = BigInt::one();
    let mut k = bas.clone();
    while &k <= haut {
        acc *= &k;
        k += 1;
    }
    acc
}

fn borne(nb_facteurs: &BigInt) -> Result<(), ErreurCalcul> {
    if *nb_facteurs > BigInt::from(FACT_MAX) {
        return Err(ErreurCalcul::invalide("combinatoire: argument trop grand"));
    }
    Ok(())
}

fn fact(n: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let n = entier_requis(n, "Factorial needs integer")?;
    if n.is_negative() {
        return Err(ErreurCalcul::Domaine);
    }
    borne(&n)?;
    Ok(Valeur::Entier(produit(&BigInt::one(), &n)))
}

/// Contrôles communs nPr / nCr : entiers, puis 0 ≤ r ≤ n.
fn n_et_r(n: &Valeur, r: &Valeur, message: &'static str) -> Result<(BigInt, BigInt), ErreurCalcul> {
    let n = entier_requis(n, message)?;
    let r = entier_requis(r, message)?;
    if n.is_negative() || r.is_negative() || r > n {
        return Err(ErreurCalcul::Domaine);
    }
    Ok((n, r))
}

/// nPr = n! / (n-r)! = (n-r+1)·…·n
fn npr(n: &Valeur, r: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let (n, r) = n_et_r(n, r, "nPr needs integers")?;
    borne(&r)?;
    Ok(Valeur::Entier(produit(&(&n - &r + 1), &n)))
}

/// nCr exact : c ← c·(n-k+i)/i, division toujours exacte.
fn ncr(n: &Valeur, r: &Valeur) -> Result<Valeur, ErreurCalcul> {
    let (n, r) = n_et_r(n, r, "nCr needs integers")?;
    let k = std::cmp::min(r.clone(), &n - &r);
    borne(&k)?;

    let mut c = BigInt::one();
    let mut i = BigInt::one();
    while i <= k {
        c = c * (&n - &k + &i) / &i;
        i += 1;
    }
    Ok(Valeur::Entier(c))
}
