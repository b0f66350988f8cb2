// src/app/vue.rs
//
// Vue texte : instantané -> chaînes affichables
// ---------------------------------------------
// Contrat :
// - Expression : jetons séparés par un espace, saisie en cours à la fin, "0" si tout est vide
// - Résultat   : valeur exacte, ou message lisible selon le genre d’erreur
// - Le noyau garde l’erreur verbatim ; la traduction en message se fait ICI seulement

use super::etat::{Instantane, Statut};
use crate::noyau::erreur::{CalcError, ErrorKind};
use crate::noyau::eval::Demarche;

/// Tout ce qu’un écran affiche pour un instantané.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affichage {
    pub ecran: String,
    pub resultat: Option<String>,
    pub erreur: Option<String>,
    pub statut: Statut,
}

pub fn affichage(etat: &Instantane) -> Affichage {
    Affichage {
        ecran: texte_ecran(etat),
        resultat: match etat.statut {
            Statut::Resultat => etat.resultat.as_ref().map(ToString::to_string),
            _ => None,
        },
        erreur: match etat.statut {
            Statut::Erreur => etat.erreur.as_ref().map(message_erreur),
            _ => None,
        },
        statut: etat.statut,
    }
}

/// Expression en cours de saisie.
pub fn texte_expression(etat: &Instantane) -> String {
    let mut morceaux: Vec<String> = etat.jetons.iter().map(ToString::to_string).collect();
    if !etat.saisie.is_empty() {
        morceaux.push(etat.saisie.clone());
    }

    if morceaux.is_empty() {
        "0".to_string()
    } else {
        morceaux.join(" ")
    }
}

/// Résultat (ou message d’erreur) ; None en cours de saisie sans résultat.
pub fn texte_resultat(etat: &Instantane) -> Option<String> {
    if let (Statut::Erreur, Some(e)) = (etat.statut, etat.erreur.as_ref()) {
        return Some(message_erreur(e));
    }
    etat.resultat.as_ref().map(ToString::to_string)
}

pub fn message_erreur(e: &CalcError) -> String {
    match e.kind {
        ErrorKind::DivisionByZero => "Division par zéro impossible".to_string(),
        ErrorKind::IncompleteExpression => "Expression incomplète".to_string(),
        ErrorKind::SyntaxError => "Erreur de syntaxe".to_string(),
        ErrorKind::UnknownOperator if !e.detail.is_empty() => e.detail.clone(),
        ErrorKind::UnknownOperator => "Erreur de calcul".to_string(),
    }
}

/// Ligne principale de l’écran (une seule chaîne, comme une calculatrice de poche).
pub fn texte_ecran(etat: &Instantane) -> String {
    match (etat.statut, &etat.erreur, &etat.resultat) {
        (Statut::Erreur, Some(e), _) => format!("Erreur : {}", message_erreur(e)),
        (Statut::Resultat, _, Some(r)) => r.to_string(),
        _ => texte_expression(etat),
    }
}

/// Démarche sur plusieurs lignes (lanceur `--demarche`).
pub fn texte_demarche(d: &Demarche) -> String {
    format!(
        "Jetons : {}\nAprès prétraitement : {}\nRPN : {}",
        d.jetons, d.pretraites, d.rpn
    )
}
