//! Tests scientifiques (campagne) : scénarios clavier + invariants + limites contrôlées.
//!
//! But : passer par le moteur complet (touches -> tampon -> évaluation -> affichage),
//! comme le ferait l’interface.
//! - scénarios de bout en bout (3+4=, fraction 1/0, sin(30))
//! - domaines (√, log, sin⁻¹)
//! - ANS : aller-retour exact
//! - stress : parenthèses profondes (pile explicite, pas de récursion)

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::format::ERREUR_AFFICHAGE;
use super::registres::RegistreAns;
use super::tampon::{Direction, Moitie};
use super::evaluer;
use crate::app::{EtatMoteur, Fonction, Moteur, Operateur, Special, Touche};

use crate::app::Touche::{Chiffre as C, Fonction as F, Navigation as N, Operateur as O, Special as S};

fn taper(m: &mut Moteur, touches: &[Touche]) -> EtatMoteur {
    let mut e = m.etat();
    for t in touches {
        e = m.touche(*t);
    }
    e
}

fn eval_ok(expr: &str) -> f64 {
    evaluer(expr, &RegistreAns::new()).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_erreur(expr: &str, attendu: ErreurCalc) {
    assert_eq!(evaluer(expr, &RegistreAns::new()), Err(attendu), "expr={expr:?}");
}

fn assert_proche(x: f64, attendu: f64) {
    assert!((x - attendu).abs() < 1e-9, "x={x} attendu={attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios clavier ------------------------ */

#[test]
fn sci_scenario_addition() {
    let mut m = Moteur::new();
    let e = taper(&mut m, &[C(3), O(Operateur::Plus), C(4), S(Special::Egal)]);
    assert_eq!(e.texte, "3+4");
    assert_eq!(e.resultat, "7");
    assert!(e.resultat_valide);
    assert_eq!(m.ans(), Some(7.0));
}

#[test]
fn sci_scenario_fraction_division_par_zero() {
    let mut m = Moteur::new();
    let e = taper(
        &mut m,
        &[
            S(Special::Fraction),
            C(1),
            N(Direction::Bas),
            C(0),
        ],
    );
    assert_eq!(e.texte, "1/0");
    assert_eq!(e.fraction.moitie, Moitie::Denominateur);

    let e = m.touche(S(Special::Egal));
    assert_eq!(e.resultat, ERREUR_AFFICHAGE);
    assert!(!e.resultat_valide);
    assert_eq!(e.erreur, Some(ErreurCalc::DivisionParZero));
    assert_eq!(m.ans(), None);

    // le moteur reste utilisable
    let e = taper(&mut m, &[S(Special::Del), C(4), S(Special::Egal)]);
    assert_eq!(e.texte, "1/4");
    assert_eq!(e.resultat, "0.25");
}

#[test]
fn sci_scenario_fraction_apres_une_saisie() {
    let mut m = Moteur::new();
    let e = taper(&mut m, &[C(2), S(Special::Fraction)]);
    assert_eq!(e.texte, "2×□/□");

    let e = taper(&mut m, &[C(1), N(Direction::Bas), C(4), S(Special::Egal)]);
    assert_eq!(e.texte, "2×1/4");
    assert_eq!(e.resultat, "0.5");
    assert!(e.resultat_valide);

    // après un opérateur : pas de × ajouté
    let e = taper(
        &mut m,
        &[
            S(Special::Ac),
            C(3),
            O(Operateur::Plus),
            S(Special::Fraction),
            C(1),
            N(Direction::Bas),
            C(2),
            S(Special::Egal),
        ],
    );
    assert_eq!(e.texte, "3+1/2");
    assert_eq!(e.resultat, "3.5");
}

#[test]
fn sci_scenario_fraction_remplie_par_ans() {
    let mut m = Moteur::new();
    taper(&mut m, &[C(6), S(Special::Egal)]);
    assert_eq!(m.ans(), Some(6.0));

    let e = taper(
        &mut m,
        &[
            S(Special::Ac),
            S(Special::Fraction),
            S(Special::Ans),
            N(Direction::Bas),
            C(2),
            S(Special::Egal),
        ],
    );
    assert_eq!(e.texte, "ans/2");
    assert_eq!(e.resultat, "3");
    assert_eq!(m.ans(), Some(3.0));

    // ans au dénominateur, derrière un produit
    let e = taper(
        &mut m,
        &[
            S(Special::Ac),
            C(2),
            O(Operateur::Fois),
            S(Special::Fraction),
            C(9),
            N(Direction::Bas),
            S(Special::Ans),
            S(Special::Egal),
        ],
    );
    assert_eq!(e.texte, "2×9/ans");
    assert_eq!(e.resultat, "6");
}

#[test]
fn sci_scenario_fraction_remplie_par_memoire() {
    let mut m = Moteur::new();
    taper(&mut m, &[C(5), S(Special::MPlus), S(Special::Ac)]);
    assert_eq!(m.memoire(), 5.0);

    let e = taper(
        &mut m,
        &[
            S(Special::Fraction),
            S(Special::Mr),
            N(Direction::Bas),
            C(2),
            S(Special::Egal),
        ],
    );
    assert_eq!(e.texte, "5/2");
    assert_eq!(e.resultat, "2.5");
}

#[test]
fn sci_scenario_sinus() {
    let mut m = Moteur::new();
    let e = taper(&mut m, &[F(Fonction::Sin), C(3), C(0), S(Special::Egal)]);
    assert_eq!(e.texte, "sin(30)");
    assert_proche(m.ans().unwrap(), 0.5);
    assert_eq!(e.resultat, "0.5");
}

#[test]
fn sci_scenario_chaine_avec_ans() {
    let mut m = Moteur::new();
    taper(&mut m, &[C(1), C(2), O(Operateur::Divise), C(4), S(Special::Egal)]);
    assert_eq!(m.ans(), Some(3.0));

    // "2□²" incomplet : refusé
    let e = taper(&mut m, &[S(Special::Ac), C(2), F(Fonction::Carre), S(Special::Egal)]);
    assert_eq!(e.texte, "2□²");
    assert_eq!(e.resultat, "");

    // ans remplit la case du carré : 2 × ans²
    let e = taper(&mut m, &[S(Special::Ans), S(Special::Egal)]);
    assert_eq!(e.texte, "2ans²");
    assert_eq!(e.resultat, "18");
}

#[test]
fn sci_gabarits_remplis_dans_l_ordre() {
    let mut m = Moteur::new();
    let e = taper(
        &mut m,
        &[
            F(Fonction::Carre),
            O(Operateur::Plus),
            F(Fonction::Racine),
            C(9),
            C(4),
            S(Special::Egal),
        ],
    );
    // √ passe avant ² : 9 remplit la racine, 4 le carré
    assert_eq!(e.texte, "4²+√9");
    assert_eq!(e.resultat, "19");
}

#[test]
fn sci_effacement_idempotent() {
    let mut m = Moteur::new();
    let e = taper(&mut m, &[F(Fonction::Racine), C(9), S(Special::Del)]);
    assert_eq!(e.texte, "√□");
    let e = taper(&mut m, &[C(9), S(Special::Del)]);
    assert_eq!(e.texte, "√□");
}

/* ------------------------ Domaines ------------------------ */

#[test]
fn sci_racine_et_log() {
    assert_eq!(eval_ok("√4"), 2.0);
    assert_erreur("√(-1)", ErreurCalc::HorsDomaine("√"));
    assert_erreur("√-1", ErreurCalc::HorsDomaine("√"));
    assert_erreur("log0", ErreurCalc::HorsDomaine("log"));
    assert_erreur("log-5", ErreurCalc::HorsDomaine("log"));
    assert_eq!(eval_ok("log100"), 2.0);
    assert_erreur("ln0", ErreurCalc::HorsDomaine("ln"));
}

#[test]
fn sci_trig_reciproque() {
    assert_erreur("sin⁻¹(2)", ErreurCalc::HorsDomaine("sin⁻¹"));
    assert_erreur("cos⁻¹(-1.5)", ErreurCalc::HorsDomaine("cos⁻¹"));
    assert_proche(eval_ok("sin⁻¹(1)"), 90.0);
    assert_proche(eval_ok("cos⁻¹(0)"), 90.0);
    assert_proche(eval_ok("tan⁻¹(1)"), 45.0);
}

#[test]
fn sci_angles_remarquables_exacts() {
    assert_eq!(eval_ok("sin(180)"), 0.0);
    assert_eq!(eval_ok("cos(60)"), 0.5);
    assert_eq!(eval_ok("tan(45)"), 1.0);
    assert_eq!(eval_ok("sin(-30)"), -0.5);
}

#[test]
fn sci_factorielle_et_pourcent() {
    assert_eq!(eval_ok("5!"), 120.0);
    assert_eq!(eval_ok("0!"), 1.0);
    assert_erreur("171!", ErreurCalc::Depassement("!"));
    assert_erreur("2.5!", ErreurCalc::HorsDomaine("!"));
    assert_eq!(eval_ok("200×50%"), 100.0);
}

/* ------------------------ Précédence “deux passes” ------------------------ */

#[test]
fn sci_deux_passes_gauche_droite() {
    assert_eq!(eval_ok("2+3×4-6÷2"), 11.0);
    assert_eq!(eval_ok("100÷10÷2"), 5.0);
    assert_eq!(eval_ok("1-2-3"), -4.0);
    assert_eq!(eval_ok("-2×-3"), 6.0);
}

/* ------------------------ ANS ------------------------ */

#[test]
fn sci_ans_aller_retour_exact() {
    let mut m = Moteur::new();
    for touches in [
        vec![C(1), O(Operateur::Divise), C(3)],
        vec![F(Fonction::Racine), C(2)],
        vec![F(Fonction::Sin), C(1)],
    ] {
        taper(&mut m, &[S(Special::Ac)]);
        taper(&mut m, &touches);
        m.touche(S(Special::Egal));
        let precedent = m.ans().unwrap();

        taper(&mut m, &[S(Special::Ac), S(Special::Ans), S(Special::Egal)]);
        assert_eq!(m.ans().unwrap().to_bits(), precedent.to_bits());
    }
}

#[test]
fn sci_ans_indisponible() {
    let mut m = Moteur::new();
    let e = taper(&mut m, &[S(Special::Ans), O(Operateur::Plus), C(1), S(Special::Egal)]);
    assert_eq!(e.erreur, Some(ErreurCalc::AnsIndisponible));
    assert_eq!(e.resultat, ERREUR_AFFICHAGE);
}

/* ------------------------ Saisie incomplète ------------------------ */

#[test]
fn sci_refus_silencieux() {
    let mut m = Moteur::new();
    let avant = taper(&mut m, &[C(8), S(Special::Egal)]);
    for touches in [
        vec![S(Special::Fraction)],
        vec![F(Fonction::Log)],
        vec![S(Special::ParOuvrante), C(2)],
        vec![F(Fonction::Tan)],
    ] {
        taper(&mut m, &[S(Special::Ac)]);
        taper(&mut m, &touches);
        let e = m.touche(S(Special::Egal));
        assert_eq!(e.erreur, None);
        assert!(!e.resultat_valide);
        assert_eq!(m.ans(), Some(8.0));
    }
    assert_eq!(avant.resultat, "8");
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_parentheses_profondes() {
    let start = Instant::now();
    let max = Duration::from_secs(2);

    let profondeur = 5_000;
    let expr = format!("{}7{}", "(".repeat(profondeur), ")".repeat(profondeur));
    assert_eq!(eval_ok(&expr), 7.0);
    budget(start, max);

    let expr = format!("{}5{}²", "√(".repeat(200), ")".repeat(200));
    let x = eval_ok(&expr);
    assert!(x.is_finite() && x > 0.0);
    budget(start, max);
}

#[test]
fn sci_longue_chaine() {
    let start = Instant::now();
    let expr = vec!["1"; 2_000].join("+");
    assert_eq!(eval_ok(&expr), 2_000.0);
    budget(start, Duration::from_secs(2));
}
