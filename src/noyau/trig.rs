// src/noyau/trig.rs
//
// Trig selon le mode d’angle (DEG / RAD)
// --------------------------------------
// - DEG : conversion en radians AVANT la primitive f64
// - tan : indéfini (Domain Error) près des singularités, test fait sur l’angle SAISI
//   (avant conversion), à TOLERANCE_TAN près

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::erreur::{ErreurCalcul, ErreurMode};
use super::valeur::modulo_reel;

/// Distance absolue en dessous de laquelle tan(x) est déclarée indéfinie.
pub const TOLERANCE_TAN: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

#[derive(Clone, Copy, Debug)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl ModeAngle {
    pub fn en_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        }
    }

    /// L’autre mode (bouton bascule de l’interface).
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }
}

/// "DEG" / "RAD", insensible à la casse, espaces ignorés.
impl FromStr for ModeAngle {
    type Err = ErreurMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEG" => Ok(ModeAngle::Degres),
            "RAD" => Ok(ModeAngle::Radians),
            _ => Err(ErreurMode(s.to_string())),
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Degres => write!(f, "DEG"),
            ModeAngle::Radians => write!(f, "RAD"),
        }
    }
}

/// tan(x) est-elle indéfinie pour l’angle saisi `x` ?
///
/// - DEG : x ≡ 90 (mod 180)
/// - RAD : x ≡ π/2 (mod π), des deux côtés de la singularité
pub fn tan_indefinie(x: f64, mode: ModeAngle) -> bool {
    match mode {
        ModeAngle::Degres => (modulo_reel(x, 180.0) - 90.0).abs() < TOLERANCE_TAN,
        ModeAngle::Radians => {
            let r = modulo_reel(x - PI / 2.0, PI);
            r < TOLERANCE_TAN || PI - r < TOLERANCE_TAN
        }
    }
}

/// Applique sin/cos/tan à un angle exprimé dans `mode`.
pub fn trig(f: TrigFn, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
    let a = mode.en_radians(x);
    match f {
        TrigFn::Sin => Ok(a.sin()),
        TrigFn::Cos => Ok(a.cos()),
        TrigFn::Tan => {
            if tan_indefinie(x, mode) {
                return Err(ErreurCalcul::Domaine);
            }
            Ok(a.tan())
        }
    }
}
