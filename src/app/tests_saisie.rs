//! Tests saisie (campagne) : scénarios touche par touche + événements aléatoires.
//!
//! - scénarios : précédence, parenthèses, moins unaire, division par zéro,
//!   multiplication implicite, calcul enchaîné
//! - retour répété : finit toujours sur "0", puis plus rien ne bouge
//! - RNG déterministe (seed fixe) + budget temps global

use std::time::{Duration, Instant};

use super::etat::{Calculatrice, Statut};
use super::evenement::{depuis_touches, Evenement};
use super::vue::{texte_ecran, texte_expression};
use crate::noyau::erreur::ErrorKind;

fn touches(s: &str) -> Calculatrice {
    let mut c = Calculatrice::new();
    c.appliquer_tous(depuis_touches(s)).unwrap_or_else(|e| panic!("touches={s:?} err={e}"));
    c
}

fn resultat(s: &str) -> String {
    let c = touches(s);
    assert_eq!(
        c.statut(),
        Statut::Resultat,
        "touches={s:?} etat={:?}",
        c.instantane()
    );
    texte_ecran(c.instantane())
}

/// Retour jusqu’à l’état vide ; vérifie "0" puis l’immobilité.
fn retour_jusqu_a_zero(c: &mut Calculatrice, origine: &str) {
    let mut pas = 0;
    while !(c.statut() == Statut::Saisie
        && c.instantane().jetons.is_empty()
        && c.instantane().saisie.is_empty())
    {
        c.appliquer(Evenement::Retour).unwrap();
        pas += 1;
        assert!(
            pas < 1_000,
            "retour sans fin ({origine}): {:?}",
            c.instantane()
        );
    }

    assert_eq!(texte_expression(c.instantane()), "0", "{origine}");
    let fige = c.instantane().clone();
    assert!(!c.appliquer(Evenement::Retour).unwrap(), "{origine}");
    assert_eq!(c.instantane(), &fige);
}

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn gen_evenement(rng: &mut Rng) -> Evenement {
    const OPS: [char; 4] = ['+', '-', '*', '/'];
    match rng.pick(20) {
        0..=8 => Evenement::Chiffre(char::from(b'0' + rng.pick(10) as u8)),
        9 => Evenement::Point,
        10..=13 => Evenement::Operateur(OPS[rng.pick(4) as usize]),
        14 => Evenement::Parenthese('('),
        15 => Evenement::Parenthese(')'),
        16 | 17 => Evenement::Calculer,
        18 => Evenement::Retour,
        _ if rng.pick(2) == 0 => Evenement::EffacerExpression,
        _ => Evenement::EffacerTout,
    }
}

/* ------------------------ Scénarios ------------------------ */

#[test]
fn scenario_precedence() {
    assert_eq!(resultat("2+3*4="), "14");
}

#[test]
fn scenario_parentheses() {
    assert_eq!(resultat("(2+3)*4="), "20");
}

#[test]
fn scenario_moins_unaire() {
    assert_eq!(resultat("-5+3="), "-2");
}

#[test]
fn scenario_division_par_zero() {
    let c = touches("1/0=");
    assert_eq!(c.statut(), Statut::Erreur);
    assert_eq!(c.erreur().map(|e| e.kind), Some(ErrorKind::DivisionByZero));
}

#[test]
fn scenario_multiplication_implicite() {
    assert_eq!(resultat("2(3+4)="), "14");
}

#[test]
fn scenario_calcul_enchaine() {
    let mut c = touches("2+3=");
    assert_eq!(texte_ecran(c.instantane()), "5");
    c.appliquer_tous(depuis_touches("*4=")).unwrap();
    assert_eq!(texte_ecran(c.instantane()), "20");
}

#[test]
fn scenario_grand_entier_exact() {
    assert_eq!(resultat("9007199254740993+1="), "9007199254740994");
    assert_eq!(resultat("0.1+0.2="), "0.3");
}

#[test]
fn retour_repete_atteint_zero_puis_ne_bouge_plus() {
    for s in ["12+34", "(1.5*2", "2+3=", "1/0=", "-7", "123*(4-5)=<", "12+<3"] {
        let mut c = touches(s);
        retour_jusqu_a_zero(&mut c, s);
    }
}

/* ------------------------ Événements aléatoires ------------------------ */

#[test]
fn fuzz_safe_evenements_puis_retour_jusqu_a_zero() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x5EED_u64);

    for tour in 0..150 {
        budget(t0, max);

        let mut c = Calculatrice::new();
        let n = 1 + rng.pick(30);

        for _ in 0..n {
            let ev = gen_evenement(&mut rng);
            let avant = c.instantane().clone();

            // alphabet fixe : aucune charge invalide
            c.appliquer(ev).unwrap_or_else(|e| panic!("ev={ev:?} err={e}"));

            let apres = c.instantane();
            assert_eq!(
                apres.statut == Statut::Erreur,
                apres.erreur.is_some(),
                "{apres:?}"
            );
            assert!(apres.saisie.matches('.').count() <= 1, "{apres:?}");
            if apres.statut == Statut::Resultat {
                assert!(apres.resultat.is_some());
                assert!(apres.jetons.is_empty() && apres.saisie.is_empty());
            }

            // calcul raté : jetons et saisie intacts
            if ev == Evenement::Calculer && apres.statut == Statut::Erreur {
                assert_eq!(apres.jetons, avant.jetons);
                assert_eq!(apres.saisie, avant.saisie);
            }
        }

        retour_jusqu_a_zero(&mut c, &format!("tour {tour}"));
    }
}
