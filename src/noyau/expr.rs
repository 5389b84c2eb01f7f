// src/noyau/expr.rs
//
// Arbre d’expression (fermé) :
// - Nombre   : littéral (Entier exact ou Reel)
// - Binaire  : ** (associatif à droite)
// - Suite    : chaîne associative à gauche, à plat : ((a op1 b) op2 c) …
// - Unaire   : moins unaire
// - Appel    : fonction de la liste blanche + arguments
// - Nom      : constante de la liste blanche (pi, e)
//
// IMPORTANT (SAFE):
// - Appel/Nom portent des valeurs TYPÉES (Fonction, Constante), résolues au parse.
// - Aucun nom libre ne survit dans l’arbre : il n’existe rien d’autre à atteindre.

use std::fmt;
use std::ops::RangeInclusive;

use super::valeur::Valeur;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Abs,
    Round,
    Pow,
    Exp,

    Sin,
    Cos,
    Tan,

    Ln,
    Log,
    Log10,

    Sqrt,
    Root,

    Fact,
    NPr,
    NCr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(Valeur),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    /// Tête puis (op, opérande) appliqués de gauche à droite.
    /// Une longue somme reste un seul noeud : pas de profondeur en plus.
    Suite(Box<Expr>, Vec<(OpBinaire, Expr)>),
    Unaire(OpUnaire, Box<Expr>),
    Appel(Fonction, Vec<Expr>),
    Nom(Constante),
}

impl Constante {
    /// Résolution stricte (sensible à la casse).
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "pi" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

impl Fonction {
    pub const TOUTES: [Fonction; 15] = [
        Fonction::Abs,
        Fonction::Round,
        Fonction::Pow,
        Fonction::Exp,
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Ln,
        Fonction::Log,
        Fonction::Log10,
        Fonction::Sqrt,
        Fonction::Root,
        Fonction::Fact,
        Fonction::NPr,
        Fonction::NCr,
    ];

    /// Résolution stricte (sensible à la casse) : la liste blanche, rien d’autre.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Abs => "abs",
            Fonction::Round => "round",
            Fonction::Pow => "pow",
            Fonction::Exp => "exp",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Log10 => "log10",
            Fonction::Sqrt => "sqrt",
            Fonction::Root => "root",
            Fonction::Fact => "fact",
            Fonction::NPr => "nPr",
            Fonction::NCr => "nCr",
        }
    }

    /// Nombre d’arguments accepté.
    pub fn arites(self) -> RangeInclusive<usize> {
        match self {
            Fonction::Round | Fonction::Log | Fonction::Root => 1..=2,
            Fonction::Pow | Fonction::NPr | Fonction::NCr => 2..=2,
            _ => 1..=1,
        }
    }
}

impl OpBinaire {
    fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Mod => "%",
            OpBinaire::Pow => "**",
        }
    }
}

/// Affichage entièrement parenthésé (journaux / tests de structure).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(Valeur::Entier(n)) => write!(f, "{n}"),
            Expr::Nombre(Valeur::Reel(x)) => write!(f, "{x:?}"),
            Expr::Nom(c) => write!(f, "{}", c.nom()),
            Expr::Unaire(OpUnaire::Neg, x) => write!(f, "(-{x})"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
            Expr::Suite(tete, reste) => {
                write!(f, "{}{tete}", "(".repeat(reste.len()))?;
                for (op, b) in reste {
                    write!(f, "{}{b})", op.symbole())?;
                }
                Ok(())
            }
            Expr::Appel(fonction, args) => {
                write!(f, "{}(", fonction.nom())?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
