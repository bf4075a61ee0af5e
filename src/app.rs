// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + clavier.rs)
// - Ré-exporter Moteur / EtatMoteur / Touche (pour l’hôte : use calculatrice_saisie::app::Moteur;)
//
// Important:
// - Aucune logique d’évaluation ici : tout passe par le noyau.
// - L’hôte (UI) sérialise les touches ; le moteur n’est jamais partagé entre threads.

pub mod clavier;
pub mod etat;

pub use clavier::{Fonction, Operateur, Special, Touche};
pub use etat::{EtatMoteur, Moteur, Reglages, CHIFFRES_DEFAUT, CHIFFRES_MAX};
