//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> prétraitement -> RPN -> réduction exacte (Decimal)
//!
//! La démarche garde le rendu texte de chaque étape (utile au lanceur `--demarche`).

use tracing::debug;

use super::decimal::Decimal;
use super::erreur::CalcError;
use super::jetons::{format_tokens, tokenize, Jeton};
use super::pretraitement::preprocess;
use super::rpn::{reduire_exact, to_rpn};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub pretraites: String,
    pub rpn: String,
}

/// API publique : évalue une expression texte et retourne la valeur exacte + la démarche.
pub fn eval_expression(expr_str: &str, precision: u32) -> Result<(Decimal, Demarche), CalcError> {
    let jetons = tokenize(expr_str)?;
    eval_jetons(&jetons, precision)
}

/// Même pipeline, à partir de jetons déjà formés (ex: saisie incrémentale).
pub fn eval_jetons(jetons: &[Jeton], precision: u32) -> Result<(Decimal, Demarche), CalcError> {
    // 1) Prétraitement (négatifs, zéro implicite, multiplication implicite)
    let pretraites = preprocess(jetons);

    let d = Demarche {
        jetons: format_tokens(jetons),
        pretraites: format_tokens(&pretraites),
        rpn: String::new(),
    };
    debug!(jetons = %d.jetons, pretraites = %d.pretraites, "évaluation");

    // suite vide => 0 (hors algorithme)
    if pretraites.is_empty() {
        return Ok((Decimal::zero(), d));
    }

    // 2) RPN (une seule fois : démarche + réduction)
    let rpn = to_rpn(&pretraites)?;
    let d = Demarche {
        rpn: format_tokens(&rpn),
        ..d
    };
    debug!(rpn = %d.rpn, "postfixe");

    // 3) Valeur
    let valeur = reduire_exact(&rpn, precision)?;

    Ok((valeur, d))
}
