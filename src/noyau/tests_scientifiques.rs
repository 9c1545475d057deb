//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du noyau f64 sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - comparaisons à tolérance près dès qu’il y a de la trigonométrie ou de la finance
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Le moins unaire lie plus fort que `^` : "-2^2" vaut 4, pas -4.
//! - Les erreurs de domaine (sqrt(-1), ln(0)) ne sont PAS des erreurs : f64 donne NaN / -∞.
//!   Seule la division par zéro est refusée, et c’est le fournisseur arithmétique qui décide.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use super::erreurs::Categorie;
use super::eval_expression;

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64, tol: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

fn assert_categorie(expr: &str, cat: Categorie) {
    match eval_expression(expr) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer, obtenu {v}"),
        Err(e) => assert_eq!(e.categorie(), cat, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identités trig ------------------------ */

#[test]
fn sci_identites_trig() {
    // sin² + cos² = 1
    for x in ["0.3", "1", "2.5", "pi/7", "-4"] {
        assert_proche(&format!("sin({x})^2 + cos({x})^2"), 1.0, 1e-12);
    }
    // réciproques
    assert_proche("asin(sin(0.5))", 0.5, 1e-12);
    assert_proche("acos(cos(0.5))", 0.5, 1e-12);
    assert_proche("atan(tan(0.5))", 0.5, 1e-12);
    assert_proche("4*atan(1)", PI, 1e-15);
}

#[test]
fn sci_symetries() {
    // sin(-x) = -sin(x), cos(-x) = cos(x)
    assert_proche("sin(-pi/4) + sin(pi/4)", 0.0, 1e-15);
    assert_proche("cos(-pi/3) - cos(pi/3)", 0.0, 1e-15);
}

/* ------------------------ Logarithmes / puissances ------------------------ */

#[test]
fn sci_log_et_puissances() {
    assert_proche("ln(e^3)", 3.0, 1e-12);
    assert_proche("log(pow(10, 4))", 4.0, 1e-12);
    assert_proche("sqrt(2)^2", 2.0, 1e-12);
    assert_proche("pow(2, 0.5) - sqrt(2)", 0.0, 1e-15);
    assert_proche("2^10 - pow(2, 10)", 0.0, 0.0);
}

#[test]
fn sci_domaine_f64() {
    assert!(eval_ok("sqrt(-1)").is_nan());
    assert_eq!(eval_ok("ln(0)"), f64::NEG_INFINITY);
}

/* ------------------------ Finance : cohérence entre fonctions ------------------------ */

#[test]
fn sci_finance_aller_retour() {
    // le versement calculé par pmt ramène pv à 0 selon fv
    let taux = "0.045/12";
    let n = "180";
    let pv = "-250000";
    let p = eval_ok(&format!("pmt({taux}, {n}, {pv})"));
    assert_proche(&format!("fv({taux}, {n}, {p}, {pv})"), 0.0, 1e-6);
    // et nper retrouve la durée
    assert_proche(&format!("nper({taux}, {p}, {pv})"), 180.0, 1e-6);
    // et pv retrouve le capital
    assert_proche(&format!("pv({taux}, {n}, {p})"), -250000.0, 1e-6);
}

#[test]
fn sci_finance_debut_de_periode() {
    // type=1 : chaque versement capitalise une période de plus => plus petit
    let fin = eval_ok("pmt(0.01, 24, -5000)");
    let debut = eval_ok("pmt(0.01, 24, -5000, 0, 1)");
    assert!(debut < fin, "debut={debut} fin={fin}");
    assert_proche("pmt(0.01, 24, -5000, 0, 1)*1.01", fin, 1e-9);
}

#[test]
fn sci_finance_limite_taux_nul() {
    // près du seuil, la forme générale rejoint la limite linéaire
    let lineaire = eval_ok("pmt(0, 12, -1200)");
    assert_proche("pmt(0, 12, -1200)", 100.0, 1e-12);
    assert_proche("pmt(1/1000000000, 12, -1200)", lineaire, 1e-4);
    assert_proche("fv(0, 12, -100)", 1200.0, 1e-12);
    assert_proche("pv(0, 12, -100)", 1200.0, 1e-12);
    assert_proche("nper(0, -100, 1200)", 12.0, 1e-12);
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_categories_erreurs() {
    assert_categorie("", Categorie::Entree);
    assert_categorie("2 # 3", Categorie::Lexicale);
    assert_categorie("foo + 1", Categorie::Lexicale);
    assert_categorie("(1+2", Categorie::Syntaxe);
    assert_categorie("1,2", Categorie::Syntaxe);
    assert_categorie("foo(1)", Categorie::Syntaxe);
    assert_categorie("1..2", Categorie::Syntaxe);
    assert_categorie("1+", Categorie::Evaluation);
    assert_categorie("sin()", Categorie::Evaluation);
    assert_categorie("sin(1, 2)", Categorie::Evaluation);
    assert_categorie("5/0", Categorie::Arithmetique);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // Pas d’AST récursif : la profondeur ne consomme que des Vec.
    let profondeur = 2000;
    let expr = format!("{}1{}", "(".repeat(profondeur), ")".repeat(profondeur));

    let v = eval_ok(&expr);
    budget(t0, max);
    assert_eq!(v, 1.0);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..1000 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
    }

    let v = eval_ok(&expr);
    budget(t0, max);
    // 0.5 est exact en binaire : somme exacte
    assert_eq!(v, 500.0);
}

#[test]
fn sci_stress_appels_imbriques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "1".to_string();
    for k in 0..200 {
        expr = format!("max({expr}, {k})");
    }

    let v = eval_ok(&expr);
    budget(t0, max);
    assert_eq!(v, 199.0);
}
