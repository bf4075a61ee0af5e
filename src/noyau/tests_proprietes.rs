//! Tests de propriétés (proptest) : invariants qui doivent tenir pour TOUTE entrée.
//!
//! 1. "a op b" = résultat IEEE exact de op (÷0 -> DivisionParZero).
//! 2. ANS : aller-retour bit à bit.
//! 3. Tampon : après toute suite de touches, 0 ≤ curseur ≤ longueur et texte non vide ;
//!    une case de fraction n’est jamais collée à un littéral déjà saisi.
//! 4. Évaluation : aucune panique sur un texte arbitraire de glyphes de saisie.

use proptest::prelude::*;

use super::erreur::ErreurCalc;
use super::evaluer;
use super::jetons::nb_unites;
use super::registres::RegistreAns;
use super::tampon::Direction;
use crate::app::{Fonction, Moteur, Operateur, Special, Touche};

// ── Helpers ─────────────────────────────────────────────────────────────

fn operande() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6..1.0e6f64,
        (-1000i32..1000).prop_map(f64::from),
        Just(0.0),
    ]
}

fn operateur() -> impl Strategy<Value = Operateur> {
    prop::sample::select(vec![
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
    ])
}

fn touche() -> impl Strategy<Value = Touche> {
    let mut touches: Vec<Touche> = (0u8..10).map(Touche::Chiffre).collect();
    touches.push(Touche::Point);
    touches.extend(
        [Operateur::Plus, Operateur::Moins, Operateur::Fois, Operateur::Divise]
            .map(Touche::Operateur),
    );
    touches.extend(
        [
            Fonction::Sin,
            Fonction::Cos,
            Fonction::Tan,
            Fonction::Log,
            Fonction::Ln,
            Fonction::Carre,
            Fonction::Racine,
            Fonction::Exp10,
            Fonction::Factorielle,
            Fonction::Pourcent,
        ]
        .map(Touche::Fonction),
    );
    touches.extend(
        [Direction::Gauche, Direction::Droite, Direction::Haut, Direction::Bas]
            .map(Touche::Navigation),
    );
    touches.extend(
        [
            Special::Shift,
            Special::Egal,
            Special::Ac,
            Special::Del,
            Special::Del,
            Special::Ans,
            Special::Fraction,
            Special::Signe,
            Special::ParOuvrante,
            Special::ParFermante,
            Special::MPlus,
            Special::MMoins,
            Special::Mr,
            Special::Mc,
        ]
        .map(Touche::Special),
    );
    prop::sample::select(touches)
}

/// Touches de saisie de fractions (valeurs, opérateurs, focus) : ni effacement ni Gauche/Droite.
fn touche_fraction() -> impl Strategy<Value = Touche> {
    let mut touches: Vec<Touche> = (0u8..10).map(Touche::Chiffre).collect();
    touches.push(Touche::Point);
    touches.extend(
        [Operateur::Plus, Operateur::Moins, Operateur::Fois, Operateur::Divise]
            .map(Touche::Operateur),
    );
    touches.extend([Direction::Haut, Direction::Bas].map(Touche::Navigation));
    touches.extend(
        [
            Special::Fraction,
            Special::Fraction,
            Special::Ans,
            Special::Mr,
            Special::Egal,
            Special::Ac,
        ]
        .map(Touche::Special),
    );
    prop::sample::select(touches)
}

/// Vrai si un □ touche un chiffre, un point ou "ans".
fn case_collee(texte: &str) -> bool {
    let litteral = |c: char| c.is_ascii_digit() || c == '.';
    let chars: Vec<char> = texte.chars().collect();
    chars.windows(2).any(|w| {
        (w[0] == '□' && litteral(w[1])) || (litteral(w[0]) && w[1] == '□')
    }) || texte.contains("ans□")
        || texte.contains("□ans")
}

fn appliquer(op: Operateur, a: f64, b: f64) -> f64 {
    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise => a / b,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Arithmétique exacte
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn binaire_exact_ieee(a in operande(), op in operateur(), b in operande()) {
        let texte = format!("{a}{}{b}", op.glyphe());
        let r = evaluer(&texte, &RegistreAns::new());

        if op == Operateur::Divise && b == 0.0 {
            prop_assert_eq!(r, Err(ErreurCalc::DivisionParZero), "texte={}", texte);
        } else {
            let attendu = appliquer(op, a, b);
            prop_assert_eq!(r, Ok(attendu), "texte={}", texte);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. ANS aller-retour
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ans_aller_retour_bit_a_bit(x in any::<f64>().prop_filter("fini", |x| x.is_finite())) {
        let mut ans = RegistreAns::new();
        ans.ecrire(x);

        for texte in ["ans", "(ans)", "ans×1"] {
            let r = evaluer(texte, &ans);
            prop_assert_eq!(r.map(f64::to_bits), Ok(x.to_bits()), "texte={}", texte);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Invariant du tampon
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn curseur_toujours_borne(touches in prop::collection::vec(touche(), 0..80)) {
        let mut m = Moteur::new();
        for t in touches {
            let e = m.touche(t);
            prop_assert!(!e.texte.is_empty(), "texte vide après {:?}", t);
            prop_assert!(
                e.curseur <= nb_unites(&e.texte),
                "curseur {} hors de {:?} après {:?}",
                e.curseur, e.texte, t
            );
        }
    }
}

proptest! {
    #[test]
    fn case_de_fraction_jamais_collee(touches in prop::collection::vec(touche_fraction(), 0..60)) {
        let mut m = Moteur::new();
        for t in touches {
            let e = m.touche(t);
            prop_assert!(!case_collee(&e.texte), "case collée dans {:?} après {:?}", e.texte, t);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Pas de panique
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn evaluer_ne_panique_jamais(texte in "[0-9.+×÷/()√²³!%□-]{0,24}") {
        let mut ans = RegistreAns::new();
        ans.ecrire(2.0);
        let _ = evaluer(&texte, &ans);
    }
}
