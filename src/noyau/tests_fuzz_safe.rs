//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * evaluate ne panique jamais et renvoie un résultat OU un message connu
//!   * l’historique compte exactement les succès, dans l’ordre
//!   * même entrée => même sortie

use std::time::{Duration, Instant};

use super::Evaluateur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const MESSAGES_CONNUS: [&str; 9] = [
    "Error: Invalid Characters",
    "Error: Division by Zero",
    "Domain Error",
    "Complex Result",
    "Invalid Root",
    "Error: Invalid Expression",
    "Factorial needs integer",
    "nPr needs integers",
    "nCr needs integers",
];

fn est_erreur(sortie: &str) -> bool {
    MESSAGES_CONNUS.contains(&sortie)
}

/// Un résultat affiché : entier, décimal, notation scientifique, inf/nan.
fn ressemble_a_un_nombre(sortie: &str) -> bool {
    sortie.parse::<f64>().is_ok() || matches!(sortie, "inf" | "-inf" | "nan")
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}", rng.pick(1000)),
        3 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        4 => "pi".to_string(),
        _ => "e".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(14) {
        0 => gen_nombre(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a}%{})", gen_expr(rng, depth - 1)),
        6 => format!("({a})^{}", rng.pick(4)), // exposant petit : pas d’explosion
        7 => format!("-{a}"),
        8 => {
            let f = ["sin", "cos", "tan", "ln", "log", "log10", "sqrt", "exp", "abs", "round"]
                [rng.pick(10) as usize];
            format!("{f}({a})")
        }
        9 => format!("root({a},{})", rng.pick(5)),
        10 => format!("log({a},{})", gen_nombre(rng)),
        11 => format!("fact({})", rng.pick(30)),
        12 => {
            let f = if rng.coin() { "nPr" } else { "nCr" };
            format!("{f}({},{})", rng.pick(20), rng.pick(20))
        }
        _ => {
            // du bruit syntaxique : doit échouer proprement
            let bruit = ["(", ")", ",", "**", "//", "x", "2 3", "$", "'"][rng.pick(9) as usize];
            format!("{a}{bruit}")
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_sorties_connues_et_historique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut calc = Evaluateur::new();

    let mut succes: Vec<String> = Vec::new();
    let mut seen_err = 0usize;

    for k in 0..300 {
        budget(t0, max);

        if k % 50 == 25 {
            let mode = if rng.coin() { "RAD" } else { "DEG" };
            calc.set_mode_angle(mode).unwrap();
        }

        let expr = gen_expr(&mut rng, 4);
        let sortie = calc.evaluate(&expr);

        if est_erreur(&sortie) {
            seen_err += 1;
        } else {
            assert!(
                ressemble_a_un_nombre(&sortie),
                "sortie inattendue: expr={expr:?} sortie={sortie:?}"
            );
            succes.push(expr);
        }
    }

    // l’historique = exactement les succès, dans l’ordre
    let h = calc.historique();
    assert_eq!(h.len(), succes.len());
    for (entree, expr) in h.iter().zip(&succes) {
        assert_eq!(&entree.expression, expr);
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(succes.len() > 10, "trop peu de succès: {}", succes.len());
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let mut rng_a = Rng::new(0xBADC0DE_u64);
    let mut rng_b = Rng::new(0xBADC0DE_u64);
    let mut calc_a = Evaluateur::new();
    let mut calc_b = Evaluateur::new();

    for _ in 0..100 {
        budget(t0, max);

        let ea = gen_expr(&mut rng_a, 3);
        let eb = gen_expr(&mut rng_b, 3);
        assert_eq!(ea, eb);
        assert_eq!(calc_a.evaluate(&ea), calc_b.evaluate(&eb), "expr={ea:?}");
    }

    // (comparaison par texte : un nan n’est pas égal à lui-même)
    let ha: Vec<String> = calc_a.historique().into_iter().map(|h| h.expression).collect();
    let hb: Vec<String> = calc_b.historique().into_iter().map(|h| h.expression).collect();
    assert_eq!(ha, hb);
}

#[test]
fn fuzz_safe_octets_arbitraires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let alphabet: Vec<char> = "0123456789.+-*/%^(),eEpi_ abcxyz×÷'\"[];=".chars().collect();
    let mut rng = Rng::new(0x5EED_u64);
    let mut calc = Evaluateur::new();

    for _ in 0..400 {
        budget(t0, max);

        let n = rng.pick(16) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        let sortie = calc.evaluate(&s);
        assert!(
            sortie.is_empty() || est_erreur(&sortie) || ressemble_a_un_nombre(&sortie),
            "sortie inattendue: entree={s:?} sortie={sortie:?}"
        );
    }
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // beaucoup de parenthèses : pas de noeud en plus, donc accepté
    let expr = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(Evaluateur::new().evaluate(&expr), "1");
    budget(t0, max);

    // beaucoup de signes : arbre trop profond, refus propre (pas de débordement de pile)
    let expr = format!("{}1", "-".repeat(50_000));
    assert_eq!(
        Evaluateur::new().evaluate(&expr),
        "Error: Invalid Expression"
    );
    budget(t0, max);
}
