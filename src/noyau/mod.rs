//! Noyau exact
//!
//! Organisation interne :
//! - erreur.rs        : taxonomie des erreurs (genre + détail)
//! - decimal.rs       : décimal exact à échelle (BigInt × 10^-scale)
//! - jetons.rs        : modèle de jetons + tokenisation
//! - pretraitement.rs : négatifs, zéro implicite, multiplication implicite
//! - rpn.rs           : shunting-yard + réduction postfixe
//! - eval.rs          : pipeline complet

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod pretraitement;
pub mod rpn;

#[cfg(test)]
mod tests_scenarios;


// API publique minimale
pub use decimal::{Decimal, PRECISION_DIVISION};
pub use erreur::{CalcError, ErrorKind};
pub use eval::{eval_expression, eval_jetons, Demarche};
pub use jetons::{format_tokens, tokenize, Jeton, Nombre, Op, Tok};
pub use pretraitement::preprocess;
pub use rpn::{evaluate, evaluate_exact, reduire_exact, to_rpn};
