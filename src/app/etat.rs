//! src/app/etat.rs
//!
//! État du moteur (sans vue).
//!
//! Rôle : posséder le tampon, les registres (ANS, mémoire), les réglages d’affichage
//! et le dernier résultat ; offrir evaluer / reset / réglages.
//!
//! Contrats :
//! - Un échec d’évaluation n’écrit JAMAIS dans ANS.
//! - Saisie incomplète : refus silencieux (rien ne change).
//! - AC remet tampon + réglages à zéro, jamais ANS ni la mémoire.
//! - Garde-fou : bornes sur les chiffres significatifs / décimales.

use tracing::debug;

use crate::noyau::erreur::ErreurCalc;
use crate::noyau::evaluer;
use crate::noyau::format::{formater, FormatAffichage, ERREUR_AFFICHAGE};
use crate::noyau::registres::{Memoire, RegistreAns};
use crate::noyau::tampon::{EtatFraction, Tampon};

/// Chiffres significatifs par défaut (affichage Standard, équivalent %.8g).
pub const CHIFFRES_DEFAUT: usize = 8;

/// Garde-fou : au-delà, le f64 n’a plus de chiffres fiables.
pub const CHIFFRES_MAX: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    format: FormatAffichage,
    chiffres: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            format: FormatAffichage::Standard,
            chiffres: CHIFFRES_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn format(&self) -> FormatAffichage {
        self.format
    }

    pub fn chiffres(&self) -> usize {
        self.chiffres
    }

    pub fn set_format(&mut self, format: FormatAffichage) {
        self.format = match format {
            FormatAffichage::Fixe(n) => FormatAffichage::Fixe(n.min(CHIFFRES_MAX)),
            autre => autre,
        };
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
    }
}

/// Instantané rendu à l’appelant après chaque touche.
#[derive(Clone, Debug, PartialEq)]
pub struct EtatMoteur {
    pub texte: String,
    pub curseur: usize,
    pub fraction: EtatFraction,
    pub shift: bool,
    pub resultat: String,
    pub resultat_valide: bool,
    pub erreur: Option<ErreurCalc>,
}

#[derive(Clone, Debug, Default)]
pub struct Moteur {
    // --- saisie ---
    pub(super) tampon: Tampon,
    pub(super) shift: bool,

    // --- registres ---
    pub(super) ans: RegistreAns,
    pub(super) memoire: Memoire,

    // --- paramètres ---
    reglages: Reglages,

    // --- sorties ---
    resultat: String,
    resultat_valide: bool,
    erreur: Option<ErreurCalc>,
}

impl Moteur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn etat(&self) -> EtatMoteur {
        EtatMoteur {
            texte: self.tampon.texte().to_string(),
            curseur: self.tampon.curseur(),
            fraction: self.tampon.fraction(),
            shift: self.shift,
            resultat: self.resultat.clone(),
            resultat_valide: self.resultat_valide,
            erreur: self.erreur,
        }
    }

    pub fn reglages(&self) -> Reglages {
        self.reglages
    }

    /// Dernier résultat réussi (None tant que rien n’a été calculé).
    pub fn ans(&self) -> Option<f64> {
        self.ans.valeur()
    }

    pub fn memoire(&self) -> f64 {
        self.memoire.lire()
    }

    /* ------------------------ Actions ------------------------ */

    /// “=” : le tampon reste tel quel, seuls résultat / ANS changent.
    pub fn evaluer(&mut self) -> EtatMoteur {
        match evaluer(self.tampon.texte(), &self.ans) {
            Ok(x) => {
                self.ans.ecrire(x);
                self.resultat = self.afficher(x);
                self.resultat_valide = true;
                self.erreur = None;
                self.tampon.quitter_fraction();
                debug!(resultat = %self.resultat, "résultat");
            }
            Err(ErreurCalc::SaisieIncomplete) => {
                debug!(texte = self.tampon.texte(), "saisie incomplète : évaluation refusée");
            }
            Err(e) => {
                debug!(erreur = %e, texte = self.tampon.texte(), "échec d’évaluation");
                self.resultat = ERREUR_AFFICHAGE.to_string();
                self.resultat_valide = false;
                self.erreur = Some(e);
            }
        }
        self.etat()
    }

    /// AC : tampon "0", shift, réglages et résultat effacés (ANS et mémoire conservés).
    pub fn reset(&mut self) {
        self.tampon.vider();
        self.shift = false;
        self.reglages = Reglages::default();
        self.resultat.clear();
        self.resultat_valide = false;
        self.erreur = None;
    }

    /// Change le format ; le résultat affiché est re-rendu depuis ANS.
    pub fn set_format(&mut self, format: FormatAffichage) {
        self.reglages.set_format(format);
        self.rafraichir();
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.reglages.set_chiffres(chiffres);
        self.rafraichir();
    }

    fn afficher(&self, x: f64) -> String {
        formater(x, self.reglages.format(), self.reglages.chiffres())
    }

    fn rafraichir(&mut self) {
        if !self.resultat_valide {
            return;
        }
        if let Some(x) = self.ans.valeur() {
            self.resultat = self.afficher(x);
        }
    }
}
