// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire Expr en résolvant chaque nom contre la liste blanche
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction (arité comptée aux virgules)
// - Ident(name) seul         => constante
// - '-' quand on n’attend PAS d’opérateur => moins unaire (Tok::Neg)
// - '+' dans la même position => ignoré (plus unaire)
// - Précédence : ** > moins unaire > * / % > + -
//   ** associatif à droite, le reste à gauche.

use super::erreur::ErreurCalcul;
use super::expr::{Constante, Expr, Fonction, OpBinaire, OpUnaire};
use super::jetons::Tok;

/// Profondeur maximale de l’arbre (l’évaluation est récursive).
pub const PROFONDEUR_MAX: usize = 1000;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        Tok::StarStar => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::StarStar)
}

/// Une paire de parenthèses ouverte : simple groupe ou appel de fonction.
struct Cadre {
    appel: Option<String>,
    virgules: usize,
}

fn invalide(detail: &str) -> ErreurCalcul {
    ErreurCalcul::invalide(detail)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("log"), LPar, Num(8), Comma, Num(2), RPar]
///   rpn:    [Num(8), Num(2), Appel("log", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();
    let mut cadres: Vec<Cadre> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions ("2 3", "2(3)").
    let mut prev_was_value = false;
    // vrai juste après '(' : autorise l’appel vide "f()" (l’arité sera refusée plus loin)
    let mut vient_d_ouvrir = false;

    let mut iter = tokens.iter().cloned().peekable();

    while let Some(tok) = iter.next() {
        let ouvre = matches!(tok, Tok::LPar)
            || (matches!(tok, Tok::Ident(_)) && matches!(iter.peek(), Some(Tok::LPar)));

        if prev_was_value && (ouvre || matches!(tok, Tok::Num(_) | Tok::Ident(_))) {
            return Err(invalide("valeurs juxtaposées"));
        }

        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if matches!(iter.peek(), Some(Tok::LPar)) {
                    // appel : on consomme '(' tout de suite
                    iter.next();
                    ops.push(Tok::LPar);
                    cadres.push(Cadre {
                        appel: Some(name),
                        virgules: 0,
                    });
                    prev_was_value = false;
                    vient_d_ouvrir = true;
                    continue;
                }
                out.push(Tok::Ident(name));
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(Tok::LPar);
                cadres.push(Cadre {
                    appel: None,
                    virgules: 0,
                });
                prev_was_value = false;
                vient_d_ouvrir = true;
                continue;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(invalide("virgule sans argument"));
                }
                depile_jusqu_a_parenthese(&mut ops, &mut out);
                match cadres.last_mut() {
                    Some(Cadre {
                        appel: Some(_),
                        virgules,
                    }) => *virgules += 1,
                    _ => return Err(invalide("virgule hors d’un appel")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                let cadre = cadres.pop().ok_or_else(|| invalide("')' sans '('"))?;

                let appel_vide = vient_d_ouvrir && cadre.appel.is_some();
                if !prev_was_value && !appel_vide {
                    return Err(invalide("')' inattendue"));
                }

                // dépile jusqu’à '(' puis retire la '('
                depile_jusqu_a_parenthese(&mut ops, &mut out);
                ops.pop();

                if let Some(name) = cadre.appel {
                    let arite = if appel_vide { 0 } else { cadre.virgules + 1 };
                    out.push(Tok::Appel(name, arite));
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // signe unaire : '+' ne fait rien, '-' devient Neg (empilé sans rien dépiler)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::StarStar => {
                if !prev_was_value {
                    return Err(invalide("opérateur sans opérande gauche"));
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    match ops.pop() {
                        Some(t) if doit_pop => out.push(t),
                        Some(t) => {
                            ops.push(t);
                            break;
                        }
                        None => break,
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg | Tok::Appel(..) => return Err(invalide("jeton interne en entrée")),
        }

        vient_d_ouvrir = false;
    }

    if !prev_was_value {
        return Err(invalide("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(invalide("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Dépile les opérateurs jusqu’à la '(' courante (qui reste sur la pile).
fn depile_jusqu_a_parenthese(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if let Some(t) = ops.pop() {
            out.push(t);
        }
    }
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident(name)       => constante de la liste blanche, sinon erreur
/// - Appel(name, n)    => fonction de la liste blanche avec n arguments acceptés, sinon erreur
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalcul> {
    // (noeud, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn.iter().cloned() {
        let noeud = match tok {
            Tok::Num(v) => (Expr::Nombre(v), 1),

            Tok::Ident(name) => {
                let c = Constante::depuis_nom(&name)
                    .ok_or_else(|| invalide(&format!("nom inconnu: {name}")))?;
                (Expr::Nom(c), 1)
            }

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(|| invalide("moins sans opérande"))?;
                (Expr::Unaire(OpUnaire::Neg, Box::new(x)), p + 1)
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::StarStar => {
                let (b, pb) = st.pop().ok_or_else(|| invalide("expression invalide"))?;
                let (a, pa) = st.pop().ok_or_else(|| invalide("expression invalide"))?;

                let op = match tok {
                    Tok::Plus => OpBinaire::Add,
                    Tok::Minus => OpBinaire::Sub,
                    Tok::Star => OpBinaire::Mul,
                    Tok::Slash => OpBinaire::Div,
                    Tok::Percent => OpBinaire::Mod,
                    _ => OpBinaire::Pow,
                };

                match (op, a) {
                    (OpBinaire::Pow, a) => (
                        Expr::Binaire(op, Box::new(a), Box::new(b)),
                        pa.max(pb) + 1,
                    ),
                    // associatif à gauche : on prolonge la suite existante
                    (_, Expr::Suite(tete, mut reste)) => {
                        reste.push((op, b));
                        (Expr::Suite(tete, reste), pa.max(pb + 1))
                    }
                    (_, a) => (
                        Expr::Suite(Box::new(a), vec![(op, b)]),
                        pa.max(pb) + 1,
                    ),
                }
            }

            Tok::Appel(name, n) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| invalide(&format!("fonction inconnue: {name}")))?;
                if !f.arites().contains(&n) {
                    return Err(invalide(&format!("{name}: {n} argument(s)")));
                }
                if st.len() < n {
                    return Err(invalide("arguments manquants"));
                }

                let args: Vec<(Expr, usize)> = st.split_off(st.len() - n);
                let p = args.iter().map(|(_, p)| *p).max().unwrap_or(0);
                (
                    Expr::Appel(f, args.into_iter().map(|(e, _)| e).collect()),
                    p + 1,
                )
            }

            Tok::Comma | Tok::LPar | Tok::RPar => {
                return Err(invalide("parenthèse inattendue en RPN"))
            }
        };

        if noeud.1 > PROFONDEUR_MAX {
            return Err(invalide("expression trop profonde"));
        }
        st.push(noeud);
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide("expression invalide")),
    }
}

/// tokenize -> RPN -> Expr, en une fois.
pub fn parse(tokens: &[Tok]) -> Result<Expr, ErreurCalcul> {
    let rpn = to_rpn(tokens)?;
    tracing::trace!(rpn = %super::jetons::format_tokens(&rpn), "RPN");
    from_rpn(&rpn)
}
