// src/noyau/cases.rs
//
// Résolveur de cases : quelle case □ / ⁿ reçoit la valeur saisie ?
// Priorité fixe sur TOUT le tampon (pas relative au curseur) :
// fraction → √ → ² → log → ×10ⁿ → sin/cos/tan → sin⁻¹/cos⁻¹/tan⁻¹ → ln → ³ → !
// Rien trouvé : l’appelant insère au curseur.

use super::jetons::{nb_unites, Gabarit, CASE};
use super::tampon::{EtatFraction, Moitie, Tampon};
use super::trig::TrigFn;

const ORDRE: [&[Gabarit]; 9] = [
    &[Gabarit::Racine],
    &[Gabarit::Carre],
    &[Gabarit::Log],
    &[Gabarit::Exp10],
    &[
        Gabarit::Trig(TrigFn::Sin),
        Gabarit::Trig(TrigFn::Cos),
        Gabarit::Trig(TrigFn::Tan),
    ],
    &[
        Gabarit::Trig(TrigFn::ArcSin),
        Gabarit::Trig(TrigFn::ArcCos),
        Gabarit::Trig(TrigFn::ArcTan),
    ],
    &[Gabarit::Ln],
    &[Gabarit::Cube],
    &[Gabarit::Factorielle],
];

/// Remplit la case prioritaire avec `valeur` ; `false` si aucune case ne convient.
pub fn remplir(tampon: &mut Tampon, valeur: &str) -> bool {
    remplir_fraction(tampon, valeur) || remplir_gabarit(tampon, valeur)
}

fn est_case(s: &str) -> bool {
    s.len() == CASE.len_utf8() && s.starts_with(CASE)
}

/// Moitié choisie par l’état d’édition ; une moitié déjà remplie est prolongée (12, 125…).
fn remplir_fraction(tampon: &mut Tampon, valeur: &str) -> bool {
    let Some(f) = tampon.localiser_fraction() else {
        return false;
    };
    let etat = tampon.fraction();
    let num_vide = est_case(tampon.extrait(f.numerateur.clone()));
    let den_vide = est_case(tampon.extrait(f.denominateur.clone()));

    if !(etat.actif || num_vide || den_vide) {
        return false;
    }

    let moitie = if etat.actif {
        etat.moitie
    } else if num_vide {
        Moitie::Numerateur
    } else {
        Moitie::Denominateur
    };
    let plage = match moitie {
        Moitie::Numerateur => f.numerateur,
        Moitie::Denominateur => f.denominateur,
    };

    let pos = if est_case(tampon.extrait(plage.clone())) {
        tampon.remplacer(plage.start, plage.end, valeur);
        plage.start
    } else {
        tampon.remplacer(plage.end, plage.end, valeur);
        plage.end
    };

    tampon.set_fraction(EtatFraction {
        actif: true,
        moitie,
    });
    tampon.placer_curseur(pos + nb_unites(valeur));
    true
}

fn remplir_gabarit(tampon: &mut Tampon, valeur: &str) -> bool {
    for groupe in ORDRE {
        // occurrence la plus à gauche dans le groupe
        let trouve = groupe
            .iter()
            .filter_map(|g| tampon.texte().find(g.vide()).map(|o| (o, *g)))
            .min_by_key(|(o, _)| *o);

        let Some((octet, g)) = trouve else {
            continue;
        };

        let debut = nb_unites(&tampon.texte()[..octet]);
        let (prefixe, suffixe) = g.cadre();
        let rempli = format!("{prefixe}{valeur}{suffixe}");

        tampon.remplacer(debut, debut + nb_unites(g.vide()), &rempli);
        tampon.placer_curseur(debut + nb_unites(prefixe) + nb_unites(valeur));
        return true;
    }
    false
}
