// src/noyau/pretraitement.rs
//
// Réécritures au niveau des jetons, avant shunting-yard.
// Ordre FIXE (chaque règle suppose les précédentes appliquées) :
//   1) repli des négatifs   : "-" NUM en position unaire => NUM négatif
//   2) zéro implicite       : opérateur (autre que '-') en tête => "0" devant
//   3) multiplication implicite : NUM "(" / ")" NUM / ")" "("
//
// Fonction pure, sans échec : les suites malformées sont laissées à l’évaluateur.

use super::decimal::Decimal;
use super::jetons::{position_unaire, Jeton, Nombre, Op, Tok};

pub fn preprocess(tokens: &[Jeton]) -> Vec<Jeton> {
    let t = replier_negatifs(tokens);
    let t = zero_implicite(t);
    multiplication_implicite(t)
}

fn replier_negatifs(tokens: &[Jeton]) -> Vec<Jeton> {
    let mut out: Vec<Jeton> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let j = &tokens[i];

        if j.as_op() == Some(Op::Minus) && position_unaire(out.last()) {
            if let Some(n) = tokens.get(i + 1).and_then(Jeton::as_num) {
                out.push(Jeton {
                    tok: Tok::Num(n.negatif()),
                    position: j.position,
                });
                i += 2;
                continue;
            }
        }

        out.push(j.clone());
        i += 1;
    }

    out
}

fn zero_implicite(mut tokens: Vec<Jeton>) -> Vec<Jeton> {
    let tete = tokens.first().and_then(Jeton::as_op);
    if matches!(tete, Some(op) if op != Op::Minus) {
        tokens.insert(0, Jeton::new(Tok::Num(Nombre::from(Decimal::zero()))));
    }
    tokens
}

fn multiplication_implicite(tokens: Vec<Jeton>) -> Vec<Jeton> {
    let mut out: Vec<Jeton> = Vec::with_capacity(tokens.len() + 4);

    for j in tokens {
        if let Some(prec) = out.last() {
            let juxtaposes = matches!(
                (&prec.tok, &j.tok),
                (Tok::Num(_), Tok::LPar) | (Tok::RPar, Tok::Num(_)) | (Tok::RPar, Tok::LPar)
            );
            if juxtaposes {
                out.push(Jeton::op(Op::Star));
            }
        }
        out.push(j);
    }

    out
}
