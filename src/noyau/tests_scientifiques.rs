//! Tests scientifiques (campagne) : propriétés attendues de l’évaluateur, de bout en bout.
//!
//! Chaque test passe par `Evaluateur::evaluate` (texte -> texte), comme l’interface.
//! Les messages d’erreur sont comparés au texte exact affiché.

use std::time::{Duration, Instant};

use super::valeur::Valeur;
use super::{Evaluateur, ModeAngle};

const DOMAINE: &str = "Domain Error";
const COMPLEXE: &str = "Complex Result";
const DIV_ZERO: &str = "Error: Division by Zero";
const INVALIDE: &str = "Error: Invalid Expression";
const CARACTERES: &str = "Error: Invalid Characters";

fn ev(expr: &str) -> String {
    Evaluateur::new().evaluate(expr)
}

fn ev_rad(expr: &str) -> String {
    Evaluateur::avec_mode(ModeAngle::Radians).evaluate(expr)
}

fn assert_ev(expr: &str, attendu: &str) {
    assert_eq!(ev(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Liste de contrôle de référence ------------------------ */

#[test]
fn sci_liste_de_controle() {
    let cas = [
        ("2+3*5", "17"),
        ("2^8", "256"),
        ("sqrt(64)", "8"),
        ("root(27,3)", "3"),
        ("sin(30)", "0.5"),
        ("log(100)", "2"),
        ("log(8,2)", "3"),
        ("ln(e)", "1"),
        ("1/0", DIV_ZERO),
        ("tan(90)", DOMAINE),
        ("fact(5)", "120"),
        ("nPr(5,2)", "20"),
        ("nCr(5,2)", "10"),
        ("exp(2)", "7.38905609893"),
    ];

    let mut calc = Evaluateur::new();
    for (expr, attendu) in cas {
        assert_eq!(calc.evaluate(expr), attendu, "expr={expr:?}");
    }
    // tout sauf 1/0 et tan(90)
    assert_eq!(calc.historique().len(), cas.len() - 2);
}

/* ------------------------ Formatage ------------------------ */

#[test]
fn sci_reels_entiers_sans_point() {
    assert_ev("2+2", "4");
    assert_ev("4.0", "4");
    assert_ev("10/5", "2");
    assert_ev("sqrt(16)*1.0", "4");
    assert_ev("1e20", "100000000000000000000");
}

#[test]
fn sci_puissance_associative_droite() {
    assert_ev("2^3^2", "512");
    assert_ev("(2^3)^2", "64");
}

#[test]
fn sci_entiers_exacts_non_bornes() {
    let f50 = "30414093201713378043612608166064768844377641568960512000000000000";
    assert_ev("fact(50)", f50);
    assert_ev("fact(20)*fact(20)-fact(20)^2", "0");
    assert_ev("nCr(60,30)", "118264581564861424");
}

/* ------------------------ Racines ------------------------ */

#[test]
fn sci_racines() {
    assert_ev("sqrt(64)", "8");
    assert_ev("sqrt(-1)", COMPLEXE);
    assert_ev("root(27,3)", "3");
    assert_ev("root(-8,3)", "-2");
    assert_ev("root(-8,2)", COMPLEXE);
    assert_ev("root(9)", "3");
    assert_ev("root(8,0)", "Invalid Root");
}

/* ------------------------ Trigonométrie ------------------------ */

#[test]
fn sci_mode_angle() {
    let mut calc = Evaluateur::new();
    assert_eq!(calc.evaluate("sin(30)"), "0.5");

    calc.set_mode_angle("RAD").unwrap();
    let s = calc.evaluate("sin(3.14159265358979)");
    let v: f64 = s.parse().unwrap_or_else(|_| panic!("nombre attendu: {s:?}"));
    assert!(v.abs() < 1e-12, "sin(π) ≈ 0, obtenu {s}");

    calc.set_mode_angle("deg").unwrap();
    assert_eq!(calc.evaluate("cos(60)"), "0.5");
}

#[test]
fn sci_tan_singularites() {
    assert_ev("tan(90)", DOMAINE);
    assert_ev("tan(270)", DOMAINE);
    assert_ev("tan(-90)", DOMAINE);
    assert_ev("tan(45)", "1");

    assert_eq!(ev_rad("tan(pi/2)"), DOMAINE);
    assert_eq!(ev_rad("tan(3*pi/2)"), DOMAINE);
    assert_eq!(ev_rad("tan(0)"), "0");
    // 90 radians n’est pas une singularité
    assert_ne!(ev_rad("tan(90)"), DOMAINE);
}

#[test]
fn sci_identites_symetrie() {
    assert_ev("sin(-30)", "-0.5");
    assert_ev("cos(-60)", "0.5");
    assert_ev("sin(30)^2 + cos(30)^2", "1");
}

/* ------------------------ Logarithmes ------------------------ */

#[test]
fn sci_logarithmes() {
    assert_ev("log(8,2)", "3");
    assert_ev("log(100)", "2");
    assert_ev("log10(1000)", "3");
    assert_ev("ln(e)", "1");
    assert_ev("ln(0)", DOMAINE);
    assert_ev("log(-1)", DOMAINE);
    assert_ev("log(8,1)", DOMAINE);
    assert_ev("log(8,-2)", DOMAINE);
    assert_ev("log10(0)", DOMAINE);
}

/* ------------------------ Combinatoire ------------------------ */

#[test]
fn sci_combinatoire() {
    assert_ev("fact(5)", "120");
    assert_ev("fact(0)", "1");
    assert_ev("fact(-1)", DOMAINE);
    assert_ev("fact(2.5)", "Factorial needs integer");
    assert_ev("nPr(5,2)", "20");
    assert_ev("nCr(5,2)", "10");
    assert_ev("nCr(2,5)", DOMAINE);
    assert_ev("nPr(5.5,2)", "nPr needs integers");
    assert_ev("nCr(5,2.5)", "nCr needs integers");
    assert_ev("nCr(5.0,2.0)", "10");
}

/* ------------------------ Historique ------------------------ */

#[test]
fn sci_historique_n_succes_m_echecs() {
    let mut calc = Evaluateur::new();
    let entrees = [
        ("1+1", true),
        ("1/0", false),
        ("2*3", true),
        ("sqrt(-4)", false),
        ("", false),
        ("nCr(5,2)", true),
        ("__import__(os)", false),
        ("7/2", true),
    ];

    let mut attendu = Vec::new();
    for (expr, succes) in entrees {
        let avant = calc.historique().len();
        let sortie = calc.evaluate(expr);
        if succes {
            attendu.push((expr.to_string(), sortie));
        } else {
            assert_eq!(calc.historique().len(), avant, "expr={expr:?}");
        }
    }

    let h = calc.historique();
    assert_eq!(h.len(), attendu.len());
    for (entree, (expr, affiche)) in h.iter().zip(&attendu) {
        assert_eq!(&entree.expression, expr);
        assert_eq!(&super::format::format_resultat(&entree.resultat), affiche);
    }
    assert_eq!(h[3].resultat, Valeur::Reel(3.5));
}

#[test]
fn sci_clear_historique_idempotent() {
    let mut calc = Evaluateur::new();
    calc.clear_historique();
    assert!(calc.historique().is_empty());

    calc.evaluate("1+2");
    calc.evaluate("3+4");
    calc.clear_historique();
    assert!(calc.historique().is_empty());
    calc.clear_historique();
    assert!(calc.historique().is_empty());

    // l’évaluateur reste utilisable
    assert_eq!(calc.evaluate("2+2"), "4");
    assert_eq!(calc.historique().len(), 1);
}

#[test]
fn sci_etat_intact_apres_echec() {
    let mut calc = Evaluateur::avec_mode(ModeAngle::Radians);
    calc.evaluate("1+1");
    for mauvais in ["1/0", "tan(pi/2)", "((", "x", "fact(-3)", "'"] {
        calc.evaluate(mauvais);
    }
    assert_eq!(calc.mode(), ModeAngle::Radians);
    assert_eq!(calc.historique().len(), 1);
}

/* ------------------------ Sécurité (liste blanche) ------------------------ */

#[test]
fn sci_securite() {
    assert_ev("__import__('os')", CARACTERES);
    assert_ev("__import__(\"os\").system(\"ls\")", CARACTERES);
    assert_ev("[].__class__", CARACTERES);
    assert_ev("__import__(os)", INVALIDE);
    assert_ev("eval(1)", INVALIDE);
    assert_ev("open(1)", INVALIDE);
    assert_ev("pi.real", INVALIDE);
    assert_ev("abs.__call__(1)", INVALIDE);
    assert_ev("__builtins__", INVALIDE);
    assert_ev("lambda", INVALIDE);
    assert_ev("SIN(30)", INVALIDE);
}

#[test]
fn sci_syntaxe_hors_grammaire() {
    for expr in ["7//2", "2 3", "2pi", "(1,2)", "sin 30", "1 +", "()", "sqrt(1,2)"] {
        assert_ev(expr, INVALIDE);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_bornes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // puissance exacte trop grande : refus immédiat, pas de calcul
    assert_ev("9^(9^9)", INVALIDE);
    budget(t0, max);

    // réel qui déborde
    assert_ev("10.0^400", INVALIDE);
    assert_ev("exp(1000)", INVALIDE);
    budget(t0, max);

    // factorielle au-delà de la borne
    assert_ev("fact(100000)", INVALIDE);
    budget(t0, max);

    // entier trop grand pour un réel
    assert_ev("sin(10^400)", INVALIDE);
    budget(t0, max);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1/2"; 80].join(" + ");
    budget(t0, max);

    assert_ev(&expr, "40");
}
