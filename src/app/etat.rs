//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (affichage, évaluateur, panneau historique)
//! et offrir les actions des boutons sans logique d’affichage.
//!
//! Contrats :
//! - Toute évaluation passe par `Evaluateur::evaluate` (texte -> texte).
//! - Le résultat (ou le message d’erreur) remplace le contenu de l’affichage.
//! - Actions déterministes, sans effet de bord caché.

use crate::noyau::{Evaluateur, ModeAngle};

/// Motifs retirés d’un seul coup par ⌫ (boutons qui insèrent `nom(`).
const MOTIFS_BACKSPACE: [&str; 13] = [
    "log10(", "sqrt(", "root(", "fact(", "sin(", "cos(", "tan(", "log(", "nPr(", "nCr(", "exp(",
    "ln(", "pi",
];

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- affichage (entrée + résultat) ---
    pub entree: String,

    // --- noyau : mode d’angle + historique ---
    pub evaluateur: Evaluateur,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
    pub afficher_historique: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            evaluateur: Evaluateur::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            afficher_historique: false,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    /// C : effacer l’affichage.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// Ajoute un texte en fin d’affichage.
    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    /// ⌫ “intelligent” : retire d’un coup les motifs insérés par les boutons ("sin(", "pi", …),
    /// sinon un seul caractère.
    pub fn backspace_entree(&mut self) {
        if let Some(pat) = MOTIFS_BACKSPACE.iter().find(|p| self.entree.ends_with(*p)) {
            self.entree.truncate(self.entree.len() - pat.len());
        } else {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    /// = : évalue l’affichage et le remplace par le résultat (ou le message d’erreur).
    pub fn calculer(&mut self) {
        let sortie = self.evaluateur.evaluate(&self.entree);
        self.entree = sortie;
        self.focus_entree = true;
    }

    /// Mode: DEG <-> Mode: RAD
    pub fn bascule_mode(&mut self) {
        let suivant = self.evaluateur.mode().bascule();
        // les deux modes sont toujours acceptés
        if let Err(e) = self.evaluateur.set_mode_angle(&suivant.to_string()) {
            tracing::warn!(erreur = %e, "bascule de mode refusée");
        }
        self.focus_entree = true;
    }

    pub fn libelle_mode(&self) -> &'static str {
        match self.evaluateur.mode() {
            ModeAngle::Degres => "Mode: DEG",
            ModeAngle::Radians => "Mode: RAD",
        }
    }

    pub fn clear_historique(&mut self) {
        self.evaluateur.clear_historique();
        self.focus_entree = true;
    }
}
