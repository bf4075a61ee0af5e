// src/noyau/erreur.rs
//
// Erreurs du noyau (saisie + évaluation).
// - Toutes récupérées à la frontière `Moteur::evaluer` (affichage "Error").
// - SaisieIncomplete n’est jamais affichée : l’évaluation est simplement refusée.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErreurCalc {
    /// Texte résiduel illisible (parenthèses non réduites, opérandes collés…).
    #[error("expression invalide")]
    ExpressionInvalide,

    /// Opérande absent ou illisible à côté d’un opérateur / marqueur de fonction.
    #[error("opérande manquant ou illisible pour {0}")]
    OperandeMalforme(&'static str),

    #[error("division par zéro")]
    DivisionParZero,

    /// Racine d’un négatif, log d’un non-positif, arc hors de [-1, 1]…
    #[error("argument hors domaine pour {0}")]
    HorsDomaine(&'static str),

    #[error("ans indisponible : aucun résultat calculé")]
    AnsIndisponible,

    /// Case non remplie, parenthèses déséquilibrées ou moitié de fraction vide.
    #[error("saisie incomplète")]
    SaisieIncomplete,

    #[error("dépassement de capacité pour {0}")]
    Depassement(&'static str),
}

pub type ResultatCalc<T> = Result<T, ErreurCalc>;
