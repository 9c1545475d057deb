//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit être typée (jamais de panique), et la même entrée
//!   doit donner exactement le même résultat (bits identiques) ou la même erreur

use std::time::{Duration, Instant};

use super::eval_expression;

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

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour provoquer des divisions par zéro)
    let a = rng.pick(10);
    if rng.coin() {
        format!("{a}.{}", rng.pick(100))
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "E".to_string(),
        _ => format!("-{}", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("{a}/{}", gen_expr(rng, depth - 1)),
        5 => format!("({a})^2"),
        6 => format!("sin({a})"),
        7 => format!("sqrt(abs({a}))"),
        8 => format!("max({a},{},{})", gen_expr(rng, depth - 1), gen_atom(rng)),
        9 => format!("pmt({a}/100, 12, {})", gen_atom(rng)),
        _ => format!("-({a})"),
    }
}

/// Mutation : casse une expression valide (caractère retiré / inséré).
fn muter(rng: &mut Rng, expr: &str) -> String {
    let mut chars: Vec<char> = expr.chars().collect();
    if chars.is_empty() {
        return expr.to_string();
    }
    let i = rng.pick(chars.len() as u32) as usize;
    if rng.coin() {
        chars.remove(i);
    } else {
        let bruit = ['(', ')', ',', '+', '*', '^', '.', 'x', '$', ' '];
        chars.insert(i, bruit[rng.pick(bruit.len() as u32) as usize]);
    }
    chars.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let r1 = eval_expression(&expr);
        let r2 = eval_expression(&expr);
        match (&r1, &r2) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(a), Err(b)) => {
                assert_eq!(a, b, "expr={expr:?}");
                seen_err += 1;
            }
            _ => panic!("résultats divergents pour {expr:?}: {r1:?} / {r2:?}"),
        }
    }
    budget(t0, max);

    // Expressions bien formées : seules des divisions par zéro peuvent échouer.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_ok + seen_err == 150);
}

#[test]
fn fuzz_safe_mutations_erreurs_typees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_err = 0usize;
    for _ in 0..300 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = muter(&mut rng, &base);

        // pas de panique : Ok ou Err typée avec un message lisible
        if let Err(e) = eval_expression(&expr) {
            assert!(!e.to_string().is_empty(), "message vide pour {expr:?}");
            seen_err += 1;
        }
    }
    budget(t0, max);

    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}
