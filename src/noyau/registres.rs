// src/noyau/registres.rs
//
// ANS : dernier résultat réussi (jamais touché par un échec ni par AC).
// Mémoire M : accumulateur M+ / M- / MR / MC (survit aussi à AC).

use super::erreur::{ErreurCalc, ResultatCalc};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegistreAns {
    valeur: Option<f64>,
}

impl RegistreAns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valeur pour substitution ; AnsIndisponible tant que rien n’a été calculé.
    pub fn lire(&self) -> ResultatCalc<f64> {
        self.valeur.ok_or(ErreurCalc::AnsIndisponible)
    }

    pub fn valeur(&self) -> Option<f64> {
        self.valeur
    }

    pub fn ecrire(&mut self, x: f64) {
        self.valeur = Some(x);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    pub fn lire(&self) -> f64 {
        self.valeur
    }

    pub fn ajouter(&mut self, x: f64) {
        self.valeur += x;
    }

    pub fn soustraire(&mut self, x: f64) {
        self.valeur -= x;
    }

    pub fn effacer(&mut self) {
        self.valeur = 0.0;
    }
}
