//! Noyau — évaluateur scientifique SAFE
//!
//! Organisation interne :
//! - normalise.rs : trim, × ÷ ^, liste blanche de caractères
//! - jetons.rs    : tokenisation (entiers exacts, réels, opérateurs, noms)
//! - rpn.rs       : shunting-yard + construction Expr (noms résolus ici)
//! - expr.rs      : AST fermé + table des fonctions/constantes
//! - valeur.rs    : Entier exact / Reel + opérations
//! - trig.rs      : mode d’angle + sin/cos/tan
//! - fonctions.rs : bibliothèque (log, racines, combinatoire, …)
//! - format.rs    : affichage du résultat
//! - erreur.rs    : erreurs + messages fixes
//! - eval.rs      : Evaluateur (pipeline + historique)

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod rpn;
pub mod trig;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::Evaluateur;
pub use trig::ModeAngle;
