// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de jetons (déjà prétraités) en RPN (postfix)
// - Puis réduire la RPN avec une pile de valeurs
//
// Règles:
// - précédence + - = 1 ; * / = 2 ; associativité à gauche (on dépile sur >=)
// - ')' sans '(' ou '(' jamais fermée => SyntaxError
// - opérande manquant ou pile finale != 1 valeur => IncompleteExpression
// - suite vide => 0 (cas spécial, hors algorithme)
//
// La réduction est générique : f64 (contrat numérique simple) ou Decimal (exact).

use tracing::debug;

use super::decimal::Decimal;
use super::erreur::CalcError;
use super::jetons::{format_tokens, Jeton, Nombre, Op, Tok};

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(1), Plus, Num(2), Star, Num(3)]
///   rpn:    [Num(1), Num(2), Num(3), Star, Plus]
pub fn to_rpn(tokens: &[Jeton]) -> Result<Vec<Jeton>, CalcError> {
    let mut out: Vec<Jeton> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Jeton> = Vec::new();

    for jeton in tokens.iter().cloned() {
        match jeton.tok {
            Tok::Num(_) => out.push(jeton),

            Tok::Op(op) => {
                // dépile tant que le sommet est un opérateur de précédence >=
                // ('(' bloque : as_op() == None)
                while ops
                    .last()
                    .and_then(Jeton::as_op)
                    .is_some_and(|top| top.precedence() >= op.precedence())
                {
                    out.extend(ops.pop());
                }
                ops.push(jeton);
            }

            Tok::LPar => ops.push(jeton),

            Tok::RPar => {
                // dépile jusqu’à '(' (jetée)
                loop {
                    match ops.pop() {
                        Some(Jeton { tok: Tok::LPar, .. }) => break,
                        Some(j) => out.push(j),
                        None => {
                            return Err(CalcError::syntaxe(
                                "parenthèses non appariées: ')' sans '('",
                            ))
                        }
                    }
                }
            }
        }
    }

    // vide la pile ops
    while let Some(j) = ops.pop() {
        if matches!(j.tok, Tok::LPar) {
            return Err(CalcError::syntaxe("parenthèses non appariées: '(' non fermée"));
        }
        out.push(j);
    }

    Ok(out)
}

/// Réduit une RPN avec une pile de valeurs.
/// `lire` décode un nombre, `appliquer` calcule a op b.
fn reduire<N>(
    rpn: &[Jeton],
    lire: impl Fn(&Nombre) -> N,
    appliquer: impl Fn(N, Op, N) -> Result<N, CalcError>,
) -> Result<N, CalcError> {
    let mut st: Vec<N> = Vec::new();

    for j in rpn {
        match &j.tok {
            Tok::Num(n) => st.push(lire(n)),

            Tok::Op(op) => {
                let b = st.pop();
                let a = st.pop();
                let (Some(a), Some(b)) = (a, b) else {
                    return Err(CalcError::incomplete("expression invalide: opérande manquant"));
                };
                st.push(appliquer(a, *op, b)?);
            }

            Tok::LPar | Tok::RPar => {
                return Err(CalcError::syntaxe("parenthèse inattendue en RPN"));
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(CalcError::incomplete("expression invalide")),
    }
}

fn apply_f64(a: f64, op: Op, b: f64) -> Result<f64, CalcError> {
    match op {
        Op::Plus => Ok(a + b),
        Op::Minus => Ok(a - b),
        Op::Star => Ok(a * b),
        Op::Slash => {
            if b == 0.0 {
                return Err(CalcError::division_par_zero());
            }
            Ok(a / b)
        }
    }
}

/// a op b en décimal exact ; le résultat est normalisé (échelle minimale).
pub fn apply_exact(
    a: &Decimal,
    op: Op,
    b: &Decimal,
    precision: u32,
) -> Result<Decimal, CalcError> {
    let r = match op {
        Op::Plus => a.add(b),
        Op::Minus => a.subtract(b),
        Op::Star => a.multiply(b),
        Op::Slash => a.divide(b, precision)?,
    };
    Ok(r.normalize())
}

/// Évalue une suite de jetons (infixe, prétraitée) en flottant.
pub fn evaluate(tokens: &[Jeton]) -> Result<f64, CalcError> {
    if tokens.is_empty() {
        return Ok(0.0);
    }

    let rpn = to_rpn(tokens)?;
    reduire(&rpn, |n| n.valeur().to_f64(), apply_f64)
}

/// Évalue une suite de jetons (infixe, prétraitée) en décimal exact.
/// `precision` : chiffres fractionnaires gardés à chaque division.
pub fn evaluate_exact(tokens: &[Jeton], precision: u32) -> Result<Decimal, CalcError> {
    if tokens.is_empty() {
        return Ok(Decimal::zero());
    }

    let rpn = to_rpn(tokens)?;
    debug!(rpn = %format_tokens(&rpn), "postfixe");

    reduire_exact(&rpn, precision)
}

/// Réduit une RPN déjà construite en décimal exact.
pub fn reduire_exact(rpn: &[Jeton], precision: u32) -> Result<Decimal, CalcError> {
    reduire(
        rpn,
        |n| n.valeur().clone(),
        |a, op, b| apply_exact(&a, op, &b, precision),
    )
}

/// Calcul direct sur textes : "a" op "b" (op hors alphabet => UnknownOperator).
pub fn calculer_texte(a: &str, op: &str, b: &str, precision: u32) -> Result<Decimal, CalcError> {
    let op: Op = op.parse()?;
    apply_exact(&Decimal::parse(a)?, op, &Decimal::parse(b)?, precision)
}
