// src/lib.rs
//
// Calculatrice de poche — moteur de saisie + évaluation
// -----------------------------------------------------
// - noyau : tampon à cases, résolveur, multiplication implicite, réduction, évaluation, formats
// - app   : moteur (état + touches) exposé à l’interface

pub mod app;
pub mod noyau;

pub use app::{EtatMoteur, Moteur, Touche};
pub use noyau::erreur::ErreurCalc;
pub use noyau::format::FormatAffichage;
