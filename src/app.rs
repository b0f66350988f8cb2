// src/app.rs
//
// Calculatrice à touches — module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (evenement.rs + etat.rs + vue.rs) + la campagne tests_saisie.rs
// - Ré-exporter Calculatrice (pour main.rs: use calculatrice_touches::app::Calculatrice;)
//
// Important:
// - Aucune E/S ici : le lanceur (main.rs) lit les touches et imprime l’écran.

pub mod etat;
pub mod evenement;
pub mod vue;

#[cfg(test)]
mod tests_saisie;

// Ré-exports pratiques
pub use etat::{Calculatrice, Instantane, Reglages, Statut, PRECISION_DEFAUT, PRECISION_MAX};
pub use evenement::{depuis_touches, Evenement};
pub use vue::{
    affichage, texte_demarche, texte_ecran, texte_expression, texte_resultat, Affichage,
};
