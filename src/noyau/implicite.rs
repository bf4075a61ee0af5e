// src/noyau/implicite.rs
//
// Multiplication implicite : insère un '*' explicite aux juxtapositions
// que la grammaire lit comme un produit.
//
// Gauche (fin d’opérande)  : nombre, ans, ')', ², ³, !, %
// Droite (début d’opérande): nombre, ans, √, log, ln, ×10^, '(', appel trig
//
// Pas de réécriture :
// - "sin(" (l’appel est un seul jeton)
// - ")²" : postfixe appliqué au groupe
//
// Les classes de motifs sont disjointes : un seul parcours suffit (point fixe atteint).

use super::jetons::Tok;

fn finit_un_facteur(t: Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Ans | Tok::RPar | Tok::Carre | Tok::Cube | Tok::Factorielle | Tok::Pourcent
    )
}

fn commence_un_facteur(t: Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Ans | Tok::Racine | Tok::Log | Tok::Ln | Tok::Exp10 | Tok::LPar | Tok::Trig(_)
    )
}

pub fn expliciter_jetons(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() * 2);

    for t in tokens {
        if let Some(&prec) = out.last() {
            if finit_un_facteur(prec) && commence_un_facteur(t) {
                out.push(Tok::Fois);
            }
        }
        out.push(t);
    }

    out
}
