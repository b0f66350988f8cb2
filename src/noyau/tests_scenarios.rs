//! Tests scénarios (campagne) : propriétés de bout en bout du noyau.
//!
//! - évaluation : précédence, vide => 0, division par zéro, parenthèses non appariées
//! - décimal : aller-retour texte, précision au-delà de 2^53, 0.1 + 0.2

use super::decimal::Decimal;
use super::erreur::ErrorKind;
use super::{eval_expression, evaluate, preprocess, tokenize};

fn flottant(expr: &str) -> Result<f64, ErrorKind> {
    let jetons = tokenize(expr).map_err(|e| e.kind)?;
    evaluate(&preprocess(&jetons)).map_err(|e| e.kind)
}

fn exact(expr: &str) -> String {
    let (v, _d) = eval_expression(expr, 20).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    v.to_string()
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn precedence_et_associativite() {
    let cas = [
        ("2 + 3 * 4", 14.0),
        ("(2 + 3) * 4", 20.0),
        ("10 - 4 - 3", 3.0),
        ("100 / 10 / 5", 2.0),
        ("2 * (3 + (4 - 1)) / 3", 4.0),
        ("1 - 2 * 3 + 4", -1.0),
    ];
    for (expr, attendu) in cas {
        assert_eq!(flottant(expr), Ok(attendu), "expr={expr:?}");
    }
}

#[test]
fn vide_vaut_zero_jamais_erreur() {
    assert_eq!(evaluate(&[]), Ok(0.0));
    assert_eq!(exact(""), "0");
}

#[test]
fn division_par_zero_detectee() {
    for expr in ["1 / 0", "5 + 3 / 0", "(2 * 3) / (4 - 4)", "0 / 0"] {
        assert_eq!(
            flottant(expr),
            Err(ErrorKind::DivisionByZero),
            "expr={expr:?}"
        );
    }
}

#[test]
fn parentheses_non_appariees() {
    for expr in ["(1+2", "1+2)", "((1)", "(1))"] {
        assert_eq!(flottant(expr), Err(ErrorKind::SyntaxError), "expr={expr:?}");
    }
}

/* ------------------------ Décimal ------------------------ */

#[test]
fn decimal_aller_retour_texte() {
    let cas = [
        ("0", "0"),
        ("42", "42"),
        ("-17", "-17"),
        ("3.14159", "3.14159"),
        ("1.50", "1.5"),
        ("-0.250", "-0.25"),
        ("100.000", "100"),
        ("0.000001", "0.000001"),
        ("123456789012345678901234567890.5", "123456789012345678901234567890.5"),
    ];
    for (s, attendu) in cas {
        let d: Decimal = s.parse().unwrap_or_else(|e| panic!("{s:?}: {e}"));
        assert_eq!(d.to_string(), attendu, "s={s:?}");
    }
}

#[test]
fn decimal_au_dela_des_entiers_surs() {
    let a = Decimal::parse("9007199254740993").unwrap();
    let b = Decimal::parse("1").unwrap();
    assert_eq!(a.add(&b).to_string(), "9007199254740994");

    // le flottant, lui, confond les deux opérandes
    let f: f64 = "9007199254740993".parse().unwrap();
    assert_eq!(f + 1.0, f);
    assert_eq!(exact("9007199254740993 + 1"), "9007199254740994");
}

#[test]
fn decimal_sans_residu_flottant() {
    let r = Decimal::parse("0.1").unwrap().add(&Decimal::parse("0.2").unwrap());
    assert_eq!(r.to_string(), "0.3");
    assert_eq!(exact("0.1 + 0.2"), "0.3");
    assert_ne!(0.1_f64 + 0.2_f64, 0.3_f64);
}
