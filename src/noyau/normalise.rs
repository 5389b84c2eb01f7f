// src/noyau/normalise.rs
//
// Prétraitement du texte saisi, AVANT toute tokenisation :
// - trim
// - glyphes d’affichage × ÷ -> * /
// - ^ -> ** (puissance)
// - liste blanche de caractères (tout le reste est refusé d’emblée)

use super::erreur::ErreurCalcul;

/// Caractère autorisé après normalisation.
fn est_autorise(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || matches!(c, '+' | '-' | '*' | '/' | '%' | '.' | '(' | ')' | ',')
        || c.is_whitespace()
}

/// Normalise une expression brute.
///
/// Retourne `Ok("")` pour une entrée vide (l’appelant en fait un no-op),
/// `Err(CaracteresInvalides)` si un caractère sort de la liste blanche.
pub fn normalise(brut: &str) -> Result<String, ErreurCalcul> {
    let s = brut
        .trim()
        .replace('×', "*")
        .replace('÷', "/")
        .replace('^', "**");

    if let Some(c) = s.chars().find(|c| !est_autorise(*c)) {
        tracing::debug!(caractere = %c, "caractère refusé");
        return Err(ErreurCalcul::CaracteresInvalides);
    }

    Ok(s)
}
