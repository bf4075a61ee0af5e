// src/noyau/format.rs
//
// Affichage d’un résultat (transformations de présentation seulement, aucune sémantique d’évaluation).
// - Standard     : entier si la partie fractionnaire est nulle, sinon %g à `chiffres` chiffres significatifs
// - Fixe(n)      : n décimales
// - Ingenieur    : mantisse × 10^(multiple de 3)
// - Sexagesimal  : D°M′S″ (secondes à 2 décimales)
// - Fraction     : approximation p/q (fractions continues), sinon Standard

use num_rational::Ratio;
use num_traits::ToPrimitive;

/// Texte affiché pour tout échec d’évaluation.
pub const ERREUR_AFFICHAGE: &str = "Error";

/// Au-delà, un entier n’est plus affiché en toutes lettres.
const ENTIER_MAX_AFFICHE: f64 = 1e15;

const DENOMINATEUR_MAX: i64 = 10_000;
const TOLERANCE_FRACTION: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatAffichage {
    #[default]
    Standard,
    Fixe(usize),
    Ingenieur,
    Sexagesimal,
    Fraction,
}

/// Formate `x` ; `chiffres` = chiffres significatifs (Standard, Ingénieur).
pub fn formater(x: f64, format: FormatAffichage, chiffres: usize) -> String {
    if !x.is_finite() {
        return non_fini(x);
    }
    let chiffres = chiffres.max(1);

    match format {
        FormatAffichage::Standard => standard(x, chiffres),
        FormatAffichage::Fixe(n) => format!("{:.*}", n, x),
        FormatAffichage::Ingenieur => ingenieur(x, chiffres),
        FormatAffichage::Sexagesimal => sexagesimal(x),
        FormatAffichage::Fraction => match approx_fraction(x) {
            Some(r) => format!("{r}"),
            None => standard(x, chiffres),
        },
    }
}

fn non_fini(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

/* ------------------------ Helpers décimaux ------------------------ */

fn retirer_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// (mantisse, exposant) arrondis à `chiffres` significatifs : 12345.6, 3 -> ("1.23", 4)
fn scientifique(x: f64, chiffres: usize) -> (String, i32) {
    let s = format!("{:.*e}", chiffres - 1, x);
    match s.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn standard(x: f64, chiffres: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.fract() == 0.0 && x.abs() < ENTIER_MAX_AFFICHE {
        return format!("{x:.0}");
    }
    format_g(x, chiffres)
}

/// Équivalent de printf("%.{chiffres}g").
fn format_g(x: f64, chiffres: usize) -> String {
    let (mantisse, exp) = scientifique(x, chiffres);
    let p = chiffres.to_i32().unwrap_or(i32::MAX);

    if exp < -4 || exp >= p {
        let signe = if exp < 0 { '-' } else { '+' };
        return format!("{}e{signe}{:02}", retirer_zeros(&mantisse), exp.unsigned_abs());
    }

    let decimales = (p - 1 - exp).max(0).to_usize().unwrap_or(0);
    retirer_zeros(&format!("{:.*}", decimales, x))
}

/* ------------------------ Ingénieur ------------------------ */

fn ingenieur(x: f64, chiffres: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let (mantisse, exp) = scientifique(x, chiffres);
    let exp3 = exp.div_euclid(3) * 3;
    let decalage = exp - exp3; // 0, 1 ou 2

    let m: f64 = mantisse.parse().unwrap_or(x);
    let v = m * 10f64.powi(decalage);
    let decimales = chiffres.saturating_sub(1 + decalage.unsigned_abs() as usize);
    let corps = retirer_zeros(&format!("{:.*}", decimales, v));

    if exp3 == 0 {
        corps
    } else {
        format!("{corps}×10^{exp3}")
    }
}

/* ------------------------ Sexagésimal ------------------------ */

fn sexagesimal(x: f64) -> String {
    let signe = if x < 0.0 { "-" } else { "" };
    let a = x.abs();

    let mut degres = a.trunc();
    let reste = (a - degres) * 60.0;
    let mut minutes = reste.trunc();
    let mut secondes = ((reste - minutes) * 60.0 * 100.0).round() / 100.0;

    // retenues (59.999″ arrondi à 60″)
    if secondes >= 60.0 {
        secondes -= 60.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degres += 1.0;
    }

    format!(
        "{signe}{degres:.0}°{minutes:.0}′{}″",
        retirer_zeros(&format!("{secondes:.2}"))
    )
}

/* ------------------------ Fraction ------------------------ */

/// Réduite de fraction continue la plus courte à TOLERANCE près, dénominateur ≤ DENOMINATEUR_MAX.
/// None pour un entier (affiché tel quel) ou sans approximation convenable.
fn approx_fraction(x: f64) -> Option<Ratio<i64>> {
    if x.fract() == 0.0 {
        return None;
    }
    let signe: i64 = if x < 0.0 { -1 } else { 1 };
    let a = x.abs();

    let (mut h0, mut h1) = (0i64, 1i64);
    let (mut k0, mut k1) = (1i64, 0i64);
    let mut r = a;

    for _ in 0..32 {
        let ai = r.floor().to_i64()?;
        let h2 = ai.checked_mul(h1)?.checked_add(h0)?;
        let k2 = ai.checked_mul(k1)?.checked_add(k0)?;
        if k2 > DENOMINATEUR_MAX {
            return None;
        }
        (h0, h1, k0, k1) = (h1, h2, k1, k2);

        let approx = h2.to_f64()? / k2.to_f64()?;
        if (approx - a).abs() <= TOLERANCE_FRACTION * a.max(1.0) {
            return Some(Ratio::new(signe * h2, k2));
        }

        let f = r - r.floor();
        if f == 0.0 {
            return None;
        }
        r = 1.0 / f;
    }
    None
}
