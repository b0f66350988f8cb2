//! Calculatrice à touches : évaluateur d’expressions arithmétiques exact,
//! piloté par une suite d’événements clavier.
//!
//! - `noyau` : jetons, prétraitement, shunting-yard, décimal exact
//! - `app`   : machine à états de saisie + rendu texte

pub mod app;
pub mod noyau;
