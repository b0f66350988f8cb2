//! src/app/etat.rs
//!
//! État de la calculatrice (saisie incrémentale, sans vue).
//!
//! Rôle : accumuler les jetons validés + la saisie en cours, et appliquer les
//! événements (chiffre, opérateur, parenthèse, calcul, retour, effacements).
//!
//! Contrats :
//! - Une transition est atomique : calculée sur une copie, puis validée d’un coup.
//! - Un calcul raté garde jetons + saisie intacts et passe en Erreur (genre + détail verbatim).
//! - Défense en profondeur : bornes sur la précision des divisions.

use tracing::{trace, warn};

use super::evenement::Evenement;
use crate::noyau::decimal::{Decimal, PRECISION_DIVISION};
use crate::noyau::erreur::CalcError;
use crate::noyau::eval::{eval_jetons, Demarche};
use crate::noyau::jetons::{Jeton, Nombre, Op, Tok};

/// Précision par défaut des divisions exactes.
pub const PRECISION_DEFAUT: u32 = PRECISION_DIVISION;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const PRECISION_MAX: u32 = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Statut {
    #[default]
    Saisie,
    Resultat,
    Erreur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    /// Chiffres fractionnaires gardés à chaque division.
    pub precision: u32,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            precision: PRECISION_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn avec_precision(precision: u32) -> Self {
        Self {
            precision: precision.min(PRECISION_MAX),
        }
    }
}

/// Instantané lisible par l’UI : tout ce qu’il faut pour afficher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instantane {
    pub jetons: Vec<Jeton>,
    /// Nombre en cours de frappe (chiffres, point, '-' initial).
    pub saisie: String,
    pub resultat: Option<Decimal>,
    pub statut: Statut,
    pub erreur: Option<CalcError>,
}

#[derive(Clone, Debug, Default)]
pub struct Calculatrice {
    etat: Instantane,
    reglages: Reglages,
    demarche: Option<Demarche>,
}

impl Calculatrice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            reglages: Reglages::avec_precision(reglages.precision),
            ..Self::default()
        }
    }

    pub fn reglages(&self) -> Reglages {
        self.reglages
    }

    /// Garde-fou : limite la précision.
    pub fn set_precision(&mut self, precision: u32) {
        self.reglages = Reglages::avec_precision(precision);
    }

    pub fn instantane(&self) -> &Instantane {
        &self.etat
    }

    pub fn statut(&self) -> Statut {
        self.etat.statut
    }

    pub fn resultat(&self) -> Option<&Decimal> {
        self.etat.resultat.as_ref()
    }

    pub fn erreur(&self) -> Option<&CalcError> {
        self.etat.erreur.as_ref()
    }

    /// Démarche du dernier calcul réussi.
    pub fn demarche(&self) -> Option<&Demarche> {
        self.demarche.as_ref()
    }

    /// Applique un événement.
    /// - Ok(true)  : l’instantané a changé (l’UI doit se redessiner)
    /// - Ok(false) : événement ignoré dans cet état
    /// - Err(_)    : charge utile invalide ; l’état n’est pas touché
    pub fn appliquer(&mut self, ev: Evenement) -> Result<bool, CalcError> {
        let mut suivant = self.etat.clone();

        match ev {
            Evenement::Chiffre(c) => {
                if !c.is_ascii_digit() {
                    return Err(CalcError::syntaxe(format!("chiffre invalide: '{c}'")));
                }
                suivant.chiffre(c);
            }
            Evenement::Point => suivant.point(),
            Evenement::Operateur(c) => suivant.operateur(Op::try_from(c)?)?,
            Evenement::Parenthese('(') => suivant.parenthese(true)?,
            Evenement::Parenthese(')') => suivant.parenthese(false)?,
            Evenement::Parenthese(c) => {
                return Err(CalcError::syntaxe(format!("parenthèse invalide: '{c}'")));
            }
            Evenement::Calculer => {
                if let Some(d) = suivant.calculer(self.reglages.precision) {
                    self.demarche = Some(d);
                }
            }
            Evenement::Retour => suivant.retour(),
            Evenement::EffacerExpression => suivant.effacer_expression(),
            Evenement::EffacerTout => {
                suivant = Instantane::default();
                self.demarche = None;
            }
        }

        let change = suivant != self.etat;
        self.etat = suivant;

        trace!(evenement = ?ev, statut = ?self.etat.statut, change, "transition");
        Ok(change)
    }

    /// Applique une suite d’événements ; s’arrête à la première charge invalide.
    pub fn appliquer_tous(
        &mut self,
        evs: impl IntoIterator<Item = Evenement>,
    ) -> Result<bool, CalcError> {
        let mut change = false;
        for ev in evs {
            change |= self.appliquer(ev)?;
        }
        Ok(change)
    }
}

/* ------------------------ Transitions (sur la copie) ------------------------ */

impl Instantane {
    /// Repart d’un état vide avec cette saisie.
    fn repartir(&mut self, saisie: &str) {
        *self = Instantane {
            saisie: saisie.to_string(),
            ..Instantane::default()
        };
    }

    /// Remet en saisie avec le résultat précédent comme premier jeton.
    fn reprendre_resultat(&mut self) -> bool {
        let Some(r) = self.resultat.clone() else {
            return false;
        };
        self.jetons = vec![Jeton::new(Tok::Num(Nombre::from(r)))];
        self.saisie.clear();
        self.statut = Statut::Saisie;
        self.erreur = None;
        true
    }

    /// Convertit la saisie en cours en jeton (un '-' seul devient l’opérateur).
    fn valider_saisie(&mut self) -> Result<(), CalcError> {
        match self.saisie.as_str() {
            "" => {}
            "-" => self.jetons.push(Jeton::op(Op::Minus)),
            s => self.jetons.push(Jeton::nombre(s)?),
        }
        self.saisie.clear();
        Ok(())
    }

    /// Nombre final laissé par un retour : il redevient la saisie en cours.
    fn rouvrir_nombre(&mut self) {
        if !self.saisie.is_empty() {
            return;
        }
        if let Some(n) = self.jetons.last().and_then(Jeton::as_num) {
            self.saisie = n.texte().to_string();
            self.jetons.pop();
        }
    }

    fn chiffre(&mut self, c: char) {
        match self.statut {
            Statut::Saisie => {
                self.rouvrir_nombre();
                self.saisie.push(c);
            }
            Statut::Resultat | Statut::Erreur => self.repartir(&c.to_string()),
        }
    }

    fn point(&mut self) {
        match self.statut {
            Statut::Resultat | Statut::Erreur => self.repartir("0."),
            Statut::Saisie => {
                let avant = self.clone();
                self.rouvrir_nombre();
                if self.saisie.contains('.') {
                    *self = avant;
                    return;
                }
                if self.saisie.is_empty() || self.saisie == "-" {
                    self.saisie.push('0');
                }
                self.saisie.push('.');
            }
        }
    }

    fn operateur(&mut self, op: Op) -> Result<(), CalcError> {
        match self.statut {
            Statut::Erreur => return Ok(()),
            Statut::Resultat => {
                if self.reprendre_resultat() {
                    self.jetons.push(Jeton::op(op));
                    return Ok(());
                }
            }
            Statut::Saisie => {}
        }

        // Signe en attente : un second '-' est ignoré, un autre opérateur le remplace.
        if self.saisie == "-" {
            if op == Op::Minus {
                return Ok(());
            }
            self.saisie.clear();
        } else if op == Op::Minus && self.jetons.is_empty() && self.saisie.is_empty() {
            self.saisie.push('-');
            return Ok(());
        }

        if !self.saisie.is_empty() {
            self.valider_saisie()?;
        } else if self.jetons.last().is_some_and(Jeton::is_op) {
            // substitution d’opérateur
            self.jetons.pop();
        }

        self.jetons.push(Jeton::op(op));
        self.statut = Statut::Saisie;
        Ok(())
    }

    fn parenthese(&mut self, ouvrante: bool) -> Result<(), CalcError> {
        match self.statut {
            Statut::Erreur => return Ok(()),
            Statut::Resultat => {
                self.reprendre_resultat();
            }
            Statut::Saisie => {}
        }

        self.valider_saisie()?;

        // multiplication implicite : nombre "(" ou ")" "("
        let apres_valeur = self
            .jetons
            .last()
            .is_some_and(|j| j.is_num() || j.tok == Tok::RPar);
        if ouvrante && apres_valeur {
            self.jetons.push(Jeton::op(Op::Star));
        }

        let j = if ouvrante { Jeton::lpar() } else { Jeton::rpar() };
        self.jetons.push(j);
        self.statut = Statut::Saisie;
        Ok(())
    }

    /// Calcul transactionnel : succès => Resultat ; échec => Erreur, jetons gardés.
    fn calculer(&mut self, precision: u32) -> Option<Demarche> {
        if self.statut != Statut::Saisie {
            return None;
        }

        let mut complet = self.clone();
        let evaluation = complet
            .valider_saisie()
            .and_then(|()| eval_jetons(&complet.jetons, precision));

        match evaluation {
            Ok((valeur, demarche)) => {
                self.jetons.clear();
                self.saisie.clear();
                self.resultat = Some(valeur);
                self.statut = Statut::Resultat;
                self.erreur = None;
                Some(demarche)
            }
            Err(e) => {
                warn!(genre = %e.kind, detail = %e.detail, "calcul en erreur");
                self.statut = Statut::Erreur;
                self.erreur = Some(e);
                None
            }
        }
    }

    fn retour(&mut self) {
        match self.statut {
            Statut::Erreur => *self = Instantane::default(),
            Statut::Resultat => {
                self.reprendre_resultat();
            }
            Statut::Saisie => {
                if self.saisie.pop().is_some() {
                    return;
                }
                if let Some(dernier) = self.jetons.pop() {
                    // nombre à plusieurs chiffres : on retire un chiffre ; sinon le jeton part
                    if let Some(n) = dernier.as_num().and_then(Nombre::tronque) {
                        self.jetons.push(Jeton {
                            tok: Tok::Num(n),
                            position: dernier.position,
                        });
                    }
                }
            }
        }
    }

    /// C : efface l’entrée (et l’erreur), garde le dernier résultat.
    fn effacer_expression(&mut self) {
        self.jetons.clear();
        self.saisie.clear();
        self.erreur = None;
        self.statut = Statut::Saisie;
    }
}
