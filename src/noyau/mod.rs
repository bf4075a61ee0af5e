//! Noyau de la calculatrice de poche
//!
//! Organisation interne :
//! - erreur.rs     : erreurs typées (thiserror)
//! - jetons.rs     : glyphes, gabarits à cases, unités d’affichage, tokenisation
//! - tampon.rs     : tampon d’expression + curseur + état fraction
//! - cases.rs      : résolveur de cases (priorité fixe)
//! - implicite.rs  : multiplication implicite
//! - expr.rs       : AST d’un niveau (Case / Lit / Unaire / Binaire / Fraction)
//! - trig.rs       : trigonométrie en degrés + angles remarquables
//! - reduction.rs  : réduction des notations spéciales
//! - eval.rs       : pipeline complet (deux passes gauche -> droite)
//! - registres.rs  : ANS + mémoire
//! - format.rs     : formats d’affichage

pub mod cases;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod implicite;
pub mod jetons;
pub mod reduction;
pub mod registres;
pub mod tampon;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use eval::evaluer;
