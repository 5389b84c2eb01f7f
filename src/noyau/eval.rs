//! Noyau — évaluation (pipeline réel)
//!
//! normalise -> jetons -> RPN -> Expr -> évaluation (liste blanche) -> format -> historique
//!
//! L’Evaluateur possède tout l’état mutable : mode d’angle + historique.
//! Une instance par session (ou par test) ; pas d’état global.

use super::erreur::{ErreurCalcul, ErreurMode};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::fonctions::applique;
use super::format::format_resultat;
use super::jetons::tokenize;
use super::normalise::normalise;
use super::rpn::parse;
use super::trig::ModeAngle;
use super::valeur::{
    addition, division, modulo, multiplication, puissance, soustraction, Valeur,
};

/// Mode d’angle au démarrage.
pub const MODE_DEFAUT: ModeAngle = ModeAngle::Degres;

/// Une évaluation réussie : texte saisi (tel quel) + valeur obtenue.
#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: Valeur,
}

#[derive(Clone, Debug)]
pub struct Evaluateur {
    mode: ModeAngle,
    historique: Vec<EntreeHistorique>,
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self::avec_mode(MODE_DEFAUT)
    }
}

impl Evaluateur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_mode(mode: ModeAngle) -> Self {
        Self {
            mode,
            historique: Vec::new(),
        }
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    /// "DEG" / "RAD" (casse et espaces ignorés). En cas de refus, le mode ne change pas.
    pub fn set_mode_angle(&mut self, mode: &str) -> Result<(), ErreurMode> {
        let m: ModeAngle = mode.parse()?;
        if m != self.mode {
            tracing::info!(avant = %self.mode, apres = %m, "mode d’angle");
        }
        self.mode = m;
        Ok(())
    }

    pub fn clear_historique(&mut self) {
        tracing::info!(entrees = self.historique.len(), "historique effacé");
        self.historique.clear();
    }

    /// Copie de l’historique (aucune vue sur l’état interne).
    pub fn historique(&self) -> Vec<EntreeHistorique> {
        self.historique.clone()
    }

    /* ------------------------ Évaluation ------------------------ */

    /// API publique : texte saisi -> texte à afficher (résultat ou message d’erreur).
    ///
    /// - entrée vide : "" (rien n’est enregistré)
    /// - succès      : résultat formaté, et (expression, valeur) ajouté à l’historique
    /// - échec       : message fixe de l’erreur, historique intact
    pub fn evaluate(&mut self, expression: &str) -> String {
        match self.calcule(expression) {
            Ok(None) => String::new(),
            Ok(Some(v)) => {
                let affiche = format_resultat(&v);
                tracing::debug!(expression, resultat = %affiche, "évaluation");
                self.historique.push(EntreeHistorique {
                    expression: expression.to_string(),
                    resultat: v,
                });
                affiche
            }
            Err(e) => {
                tracing::debug!(expression, genre = e.genre(), detail = ?e, "échec d’évaluation");
                e.to_string()
            }
        }
    }

    /// Pipeline sans effet de bord. `Ok(None)` pour une entrée vide.
    pub fn calcule(&self, expression: &str) -> Result<Option<Valeur>, ErreurCalcul> {
        let s = normalise(expression)?;
        if s.is_empty() {
            return Ok(None);
        }

        let jetons = tokenize(&s)?;
        let arbre = parse(&jetons)?;
        tracing::trace!(normalisee = %s, arbre = %arbre, "arbre");

        evalue(&arbre, self.mode).map(Some)
    }
}

/// Évalue un arbre. Seuls les six genres de noeuds existent : rien d’autre n’est atteignable.
pub fn evalue(expr: &Expr, mode: ModeAngle) -> Result<Valeur, ErreurCalcul> {
    match expr {
        Expr::Nombre(v) => Ok(v.clone()),
        Expr::Nom(c) => Ok(Valeur::Reel(c.valeur())),

        Expr::Unaire(OpUnaire::Neg, x) => Ok(evalue(x, mode)?.oppose()),

        Expr::Binaire(op, a, b) => binaire(*op, &evalue(a, mode)?, &evalue(b, mode)?),

        // de gauche à droite, sans récursion le long de la chaîne
        Expr::Suite(tete, reste) => {
            let mut acc = evalue(tete, mode)?;
            for (op, b) in reste {
                acc = binaire(*op, &acc, &evalue(b, mode)?)?;
            }
            Ok(acc)
        }

        Expr::Appel(f, args) => {
            let valeurs = args
                .iter()
                .map(|a| evalue(a, mode))
                .collect::<Result<Vec<_>, _>>()?;
            applique(*f, &valeurs, mode)
        }
    }
}

fn binaire(op: OpBinaire, a: &Valeur, b: &Valeur) -> Result<Valeur, ErreurCalcul> {
    match op {
        OpBinaire::Add => addition(a, b),
        OpBinaire::Sub => soustraction(a, b),
        OpBinaire::Mul => multiplication(a, b),
        OpBinaire::Div => division(a, b),
        OpBinaire::Mod => modulo(a, b),
        OpBinaire::Pow => puissance(a, b),
    }
}
