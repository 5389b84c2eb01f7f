// src/noyau/format.rs
//
// Affichage d’un résultat :
// - entier exact          : tous les chiffres (pas de borne)
// - réel à valeur entière : affiché comme un entier (4.0 -> "4", 1e20 -> 20 zéros)
// - autre réel            : 12 chiffres significatifs, notation “générale” (%g)

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use super::valeur::Valeur;

/// Chiffres significatifs pour les réels non entiers.
pub const CHIFFRES_SIGNIFICATIFS: usize = 12;

pub fn format_resultat(v: &Valeur) -> String {
    match v {
        Valeur::Entier(n) => n.to_string(),
        Valeur::Reel(x) => format_reel(*x),
    }
}

pub fn format_reel(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    if x.fract() == 0.0 {
        if let Some(n) = BigInt::from_f64(x) {
            return n.to_string();
        }
    }

    format_general(x, CHIFFRES_SIGNIFICATIFS)
}

/// Équivalent de "%.{p}g" : p chiffres significatifs, zéros finaux retirés,
/// notation scientifique si l’exposant décimal est < -4 ou ≥ p.
fn format_general(x: f64, p: usize) -> String {
    let p = p.max(1);

    // L’arrondi à p chiffres peut changer l’exposant (9.9999999999996 -> 1e1) :
    // on lit donc l’exposant APRÈS arrondi.
    let sci = format!("{:.*e}", p - 1, x);
    let Some((mantisse, exposant)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exposant.parse::<i32>() else {
        return sci;
    };

    if exp < -4 || exp >= p as i32 {
        let signe = if exp < 0 { '-' } else { '+' };
        return format!("{}e{signe}{:02}", retire_zeros(mantisse), exp.unsigned_abs());
    }

    let decimales = (p as i32 - 1 - exp).max(0) as usize;
    retire_zeros(&format!("{:.*}", decimales, x))
}

/// "0.500000" -> "0.5" ; "3.000" -> "3" ; "120" reste "120".
fn retire_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
