// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Chaque variante a un message d’affichage FIXE : c’est ce texte qui part
// dans l’écran de la calculatrice (pas de parsing de message côté appelant).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("Error: Invalid Characters")]
    CaracteresInvalides,

    #[error("Error: Division by Zero")]
    DivisionParZero,

    #[error("Domain Error")]
    Domaine,

    #[error("Complex Result")]
    ResultatComplexe,

    #[error("Invalid Root")]
    RacineInvalide,

    /// Argument non entier pour fact/nPr/nCr (famille “expression invalide”,
    /// mais avec le message propre à la fonction).
    #[error("{0}")]
    EntierRequis(&'static str),

    /// Le détail sert aux journaux seulement : l’écran affiche le texte fixe.
    #[error("Error: Invalid Expression")]
    ExpressionInvalide(String),
}

impl ErreurCalcul {
    pub fn invalide(detail: impl Into<String>) -> Self {
        ErreurCalcul::ExpressionInvalide(detail.into())
    }

    /// Nom court pour les journaux.
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurCalcul::CaracteresInvalides => "caracteres_invalides",
            ErreurCalcul::DivisionParZero => "division_par_zero",
            ErreurCalcul::Domaine => "domaine",
            ErreurCalcul::ResultatComplexe => "resultat_complexe",
            ErreurCalcul::RacineInvalide => "racine_invalide",
            ErreurCalcul::EntierRequis(_) => "entier_requis",
            ErreurCalcul::ExpressionInvalide(_) => "expression_invalide",
        }
    }
}

/// Refus de `set_mode_angle` : le mode courant reste inchangé.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Angle mode must be 'DEG' or 'RAD'")]
pub struct ErreurMode(pub String);
