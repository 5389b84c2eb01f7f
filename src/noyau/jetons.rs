// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::ErreurCalcul;
use super::valeur::Valeur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Valeur),

    // Tout nom [a-zA-Z_][a-zA-Z0-9_]* (sensible à la casse).
    // NOTE: c’est from_rpn qui le résout contre la liste blanche (fonction ou constante).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar, // ** (et ^ après normalisation)

    Comma,
    LPar,
    RPar,

    // Produits seulement par to_rpn :
    Neg,                  // moins unaire
    Appel(String, usize), // appel de fonction + nombre d’arguments
}

/// Tokenize une expression déjà normalisée.
/// Supporte:
/// - entiers exacts (ex: 12, 10000000000000000000000)
/// - réels (ex: 1.5, .5, 5., 1e3, 2.5E-3)
/// - opérateurs + - * / % **
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs + ponctuation
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::StarStar);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre : chiffres, ou '.' suivi d’un chiffre
        let point_puis_chiffre =
            c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || point_puis_chiffre {
            let (v, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = fin;
            continue;
        }

        return Err(ErreurCalcul::invalide(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `start`. Retourne (valeur, index de fin).
fn lire_nombre(chars: &[char], start: usize) -> Result<(Valeur, usize), ErreurCalcul> {
    let mut i = start;
    let mut reel = false;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }

    if i < chars.len() && chars[i] == '.' {
        reel = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }

    // exposant : e5, E-3, e+10 (un 'e' sans chiffres derrière n’en fait pas partie)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            reel = true;
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    let txt: String = chars[start..i].iter().collect();
    let v = if reel {
        let x = txt
            .parse::<f64>()
            .map_err(|_| ErreurCalcul::invalide(format!("réel invalide: {txt}")))?;
        Valeur::Reel(x)
    } else {
        let n = BigInt::parse_bytes(txt.as_bytes(), 10)
            .ok_or_else(|| ErreurCalcul::invalide(format!("entier invalide: {txt}")))?;
        Valeur::Entier(n)
    };

    Ok((v, i))
}

/// Format utilitaire (journaux) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(Valeur::Entier(n)) => n.to_string(),
            Tok::Num(Valeur::Reel(x)) => format!("{x:?}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::StarStar => "**".to_string(),

            Tok::Comma => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel(name, n) => format!("{name}/{n}"),
        };
        out.push(s);
    }
    out.join(" ")
}
