//! Noyau — évaluation (pipeline réel)
//!
//! contrôle de complétude -> littéral direct ? -> jetons -> ans substitué
//!        -> multiplication implicite -> réduction des notations -> fraction directe ?
//!        -> passe (× ÷) -> passe (+ -) -> littéral final
//!
//! Remarque : les deux passes sont strictement gauche -> droite ; il n’y a PAS d’autre
//! précédence (les groupes entre parenthèses sont déjà réduits à un littéral).

use tracing::{debug, trace};

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::{Noeud, Op};
use super::implicite::expliciter_jetons;
use super::jetons::{commence_operande, finit_operande, texte_jetons, tokenize, Tok, ANS, BARRE, CASE, CASE_EXPOSANT};
use super::reduction::{reduire, texte_termes, Terme};
use super::registres::RegistreAns;

/// Refus silencieux : case restante, appel vide, parenthèses déséquilibrées, moitié de fraction vide.
pub fn verifier_complet(texte: &str) -> ResultatCalc<()> {
    let incomplet = texte.contains(CASE)
        || texte.contains(CASE_EXPOSANT)
        || texte.contains("()")
        || texte.matches('(').count() != texte.matches(')').count()
        || texte.match_indices(BARRE).any(|(o, _)| {
            !finit_operande(&texte[..o]) || !commence_operande(&texte[o + BARRE.len_utf8()..])
        });

    if incomplet {
        return Err(ErreurCalc::SaisieIncomplete);
    }
    Ok(())
}

/// Littéral strict : [-]chiffres[.chiffres] (pas de "inf", "1e5", "+3"…).
fn litteral_strict(s: &str) -> Option<f64> {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let valide = corps.chars().any(|c| c.is_ascii_digit())
        && corps.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !valide {
        return None;
    }
    s.parse().ok()
}

/// API publique : évalue le texte du tampon (fonction pure du texte + ANS).
pub fn evaluer(texte: &str, ans: &RegistreAns) -> ResultatCalc<f64> {
    verifier_complet(texte)?;

    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurCalc::ExpressionInvalide);
    }
    debug!(expression = s, "évaluation");

    // 1) Raccourcis
    if let Some(x) = litteral_strict(s) {
        return Ok(x);
    }
    if s == ANS {
        return ans.lire();
    }

    // 2) Jetons + substitution de ans
    let jetons = tokenize(s)?
        .into_iter()
        .map(|t| match t {
            Tok::Ans => ans.lire().map(Tok::Num),
            autre => Ok(autre),
        })
        .collect::<ResultatCalc<Vec<Tok>>>()?;

    // 3) Multiplication implicite
    let jetons = expliciter_jetons(jetons);
    trace!(jetons = %texte_jetons(&jetons), "jetons explicités");

    // 4) Notations spéciales
    let termes = reduire(&jetons)?;

    // 5) Arithmétique
    let x = calculer(termes)?;
    if !x.is_finite() {
        return Err(ErreurCalc::ExpressionInvalide);
    }

    debug!(resultat = x, "évaluation terminée");
    Ok(x)
}

/// Fraction directe a/b, sinon deux passes gauche -> droite.
pub fn calculer(termes: Vec<Terme>) -> ResultatCalc<f64> {
    if let [Terme::Val(n), Terme::Op(Op::Divise), Terme::Val(d)] = termes.as_slice() {
        return Noeud::fraction(Noeud::Lit(*n), Noeud::Lit(*d)).reduire();
    }

    let termes = passe(termes, Op::est_multiplicatif)?;
    trace!(termes = %texte_termes(&termes), "passe × ÷");
    let termes = passe(termes, |op| !op.est_multiplicatif())?;

    match termes.as_slice() {
        [Terme::Val(x)] => Ok(*x),
        _ => Err(ErreurCalc::ExpressionInvalide),
    }
}

/// Une passe : chaque opérateur retenu, pris le plus à gauche, combine ses deux voisins.
fn passe(termes: Vec<Terme>, retenir: impl Fn(Op) -> bool) -> ResultatCalc<Vec<Terme>> {
    let mut out: Vec<Terme> = Vec::with_capacity(termes.len());
    let mut it = termes.into_iter();

    while let Some(t) = it.next() {
        match t {
            Terme::Op(op) if retenir(op) => {
                let a = match out.pop() {
                    Some(Terme::Val(a)) => a,
                    _ => return Err(ErreurCalc::OperandeMalforme(op.symbole())),
                };
                let b = match it.next() {
                    Some(Terme::Val(b)) => b,
                    _ => return Err(ErreurCalc::OperandeMalforme(op.symbole())),
                };
                let v = Noeud::binaire(op, Noeud::Lit(a), Noeud::Lit(b)).reduire()?;
                out.push(Terme::Val(v));
            }
            autre => out.push(autre),
        }
    }

    Ok(out)
}
