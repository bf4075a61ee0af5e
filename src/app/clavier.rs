// src/app/clavier.rs
//
// Clavier — une touche = une action sur le moteur
// ------------------------------------------------
// - Chiffres / point / ans / signe / MR : valeurs (remplissent une case si possible)
// - Fonctions : gabarits à cases, variante SHIFT (sin -> sin⁻¹, log -> ×10ⁿ, x² -> √, √ -> x³)
// - SHIFT retombe après toute touche de fonction
// - M+ / M- : évaluent le tampon ; la mémoire ne bouge que sur succès

use tracing::trace;

use super::etat::{EtatMoteur, Moteur};
use crate::noyau::evaluer;
use crate::noyau::jetons::{Gabarit, ANS};
use crate::noyau::tampon::{Direction, Saisie};
use crate::noyau::trig::TrigFn;

const CHIFFRES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn glyphe(self) -> &'static str {
        match self {
            Operateur::Plus => "+",
            Operateur::Moins => "-",
            Operateur::Fois => "×",
            Operateur::Divise => "÷",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Carre,
    Racine,
    Exp10,
    Factorielle,
    Pourcent,
}

impl Fonction {
    /// Ce que la touche insère, selon l’état SHIFT.
    pub fn saisie(self, shift: bool) -> Saisie<'static> {
        let trig = |f: TrigFn| {
            let f = if shift { f.reciproque() } else { f };
            Saisie::Gabarit(Gabarit::Trig(f))
        };

        match (self, shift) {
            (Fonction::Sin, _) => trig(TrigFn::Sin),
            (Fonction::Cos, _) => trig(TrigFn::Cos),
            (Fonction::Tan, _) => trig(TrigFn::Tan),
            (Fonction::Log, false) => Saisie::Gabarit(Gabarit::Log),
            (Fonction::Log, true) | (Fonction::Exp10, _) => Saisie::Gabarit(Gabarit::Exp10),
            (Fonction::Carre, false) => Saisie::Gabarit(Gabarit::Carre),
            (Fonction::Carre, true) | (Fonction::Racine, false) => Saisie::Gabarit(Gabarit::Racine),
            (Fonction::Racine, true) => Saisie::Gabarit(Gabarit::Cube),
            (Fonction::Ln, _) => Saisie::Gabarit(Gabarit::Ln),
            (Fonction::Factorielle, _) => Saisie::Gabarit(Gabarit::Factorielle),
            (Fonction::Pourcent, _) => Saisie::Texte("%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Special {
    Shift,
    Egal,
    Ac,
    Del,
    Ans,
    Fraction,
    Signe,
    ParOuvrante,
    ParFermante,
    MPlus,
    MMoins,
    Mr,
    Mc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(u8),
    Point,
    Operateur(Operateur),
    Fonction(Fonction),
    Navigation(Direction),
    Special(Special),
}

impl Moteur {
    /// Applique une touche et rend l’état résultant.
    pub fn touche(&mut self, touche: Touche) -> EtatMoteur {
        trace!(?touche, texte = self.tampon.texte(), curseur = self.tampon.curseur(), "touche");

        match touche {
            Touche::Chiffre(d) => {
                let c = CHIFFRES[usize::from(d.min(9))];
                self.tampon.inserer_au_curseur(Saisie::Valeur(c));
            }
            Touche::Point => self.tampon.inserer_au_curseur(Saisie::Valeur(".")),
            Touche::Operateur(op) => self.tampon.inserer_au_curseur(Saisie::Operateur(op.glyphe())),
            Touche::Fonction(f) => {
                let saisie = f.saisie(self.shift);
                self.shift = false;
                self.tampon.inserer_au_curseur(saisie);
            }
            Touche::Navigation(d) => self.tampon.deplacer_curseur(d),
            Touche::Special(s) => return self.special(s),
        }

        self.etat()
    }

    fn special(&mut self, s: Special) -> EtatMoteur {
        match s {
            Special::Shift => self.shift = !self.shift,
            Special::Egal => return self.evaluer(),
            Special::Ac => self.reset(),
            Special::Del => self.tampon.effacer_au_curseur(),
            Special::Ans => self.tampon.inserer_au_curseur(Saisie::Valeur(ANS)),
            Special::Fraction => self.tampon.inserer_au_curseur(Saisie::Gabarit(Gabarit::Fraction)),
            Special::Signe => self.tampon.inserer_au_curseur(Saisie::Valeur("-")),
            Special::ParOuvrante => self.tampon.inserer_au_curseur(Saisie::Texte("(")),
            Special::ParFermante => self.tampon.inserer_au_curseur(Saisie::Texte(")")),
            Special::MPlus | Special::MMoins => {
                if let Ok(x) = evaluer(self.tampon.texte(), &self.ans) {
                    if s == Special::MPlus {
                        self.memoire.ajouter(x);
                    } else {
                        self.memoire.soustraire(x);
                    }
                }
            }
            Special::Mr => {
                let m = self.memoire.lire();
                // négatif entre parenthèses : sinon "2" puis MR(-3) donnerait une soustraction
                let texte = if m < 0.0 { format!("({m})") } else { format!("{m}") };
                self.tampon.inserer_au_curseur(Saisie::Valeur(&texte));
            }
            Special::Mc => self.memoire.effacer(),
        }

        self.etat()
    }
}
