// src/noyau/tampon.rs
//
// Tampon d’expression + curseur
// -----------------------------
// - Texte toujours non vide : l’état “vide” canonique est "0"
// - Curseur en unités d’affichage ("⁻¹" = une unité), toujours borné dans [0, longueur]
// - Effacement “intelligent” : un gabarit rempli redevient sa forme vide (sin(5) -> sin())
// - Haut/Bas : focus numérateur/dénominateur de la fraction présente
//
// Les cases sont remplies par cases.rs (priorité fixe, sur tout le tampon).

use std::ops::Range;

use super::cases;
use super::jetons::{
    commence_litteral, commence_operande, debut_operande, fin_operande, finit_litteral,
    finit_operande, index_unite, nb_unites, unites, Gabarit, ANS, BARRE, CASE,
};

const TEXTE_INITIAL: &str = "0";

/// Mots retirés d’un bloc par l’effacement.
const MOTS: [&str; 10] = [
    ANS, "log", "ln", "×10^", "sin⁻¹(", "cos⁻¹(", "tan⁻¹(", "sin(", "cos(", "tan(",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Moitie {
    #[default]
    Numerateur,
    Denominateur,
}

impl Moitie {
    pub fn autre(self) -> Moitie {
        match self {
            Moitie::Numerateur => Moitie::Denominateur,
            Moitie::Denominateur => Moitie::Numerateur,
        }
    }
}

/// Mode “édition de fraction” + moitié ciblée.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EtatFraction {
    pub actif: bool,
    pub moitie: Moitie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Gauche,
    Droite,
    Haut,
    Bas,
}

/// Ce que l’on insère, selon sa nature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Saisie<'a> {
    /// Chiffre, point, "ans", signe, valeur mémoire : peut remplir une case.
    Valeur(&'a str),
    /// Gabarit à cases (√□, sin(), □/□…).
    Gabarit(Gabarit),
    /// + - × ÷ : quitte le mode fraction.
    Operateur(&'a str),
    /// Parenthèses, % : insertion brute.
    Texte(&'a str),
}

/// Fraction a/b repérée dans le tampon (indices d’unités).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlageFraction {
    pub numerateur: Range<usize>,
    pub barre: usize,
    pub denominateur: Range<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tampon {
    texte: String,
    curseur: usize,
    fraction: EtatFraction,
}

impl Default for Tampon {
    fn default() -> Self {
        Self::new()
    }
}

impl Tampon {
    pub fn new() -> Self {
        Self {
            texte: TEXTE_INITIAL.to_string(),
            curseur: nb_unites(TEXTE_INITIAL),
            fraction: EtatFraction::default(),
        }
    }

    /// Tampon pré-rempli, curseur en fin.
    pub fn depuis(texte: &str) -> Self {
        if texte.is_empty() {
            return Self::new();
        }
        Self {
            texte: texte.to_string(),
            curseur: nb_unites(texte),
            fraction: EtatFraction::default(),
        }
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn curseur(&self) -> usize {
        self.curseur
    }

    pub fn fraction(&self) -> EtatFraction {
        self.fraction
    }

    pub fn longueur(&self) -> usize {
        nb_unites(&self.texte)
    }

    pub fn est_initial(&self) -> bool {
        self.texte == TEXTE_INITIAL
    }

    pub fn vider(&mut self) {
        *self = Self::new();
    }

    pub fn quitter_fraction(&mut self) {
        self.fraction.actif = false;
    }

    /* ------------------------ Primitives ------------------------ */

    fn octet(&self, pos: usize) -> usize {
        unites(&self.texte).iter().take(pos).map(|u| u.len()).sum()
    }

    fn borner(&mut self) {
        self.curseur = self.curseur.min(self.longueur());
    }

    pub(crate) fn extrait(&self, plage: Range<usize>) -> &str {
        let (a, b) = (self.octet(plage.start), self.octet(plage.end.max(plage.start)));
        &self.texte[a..b]
    }

    /// Remplace les unités [debut, fin) par `par` (le curseur n’est pas touché).
    pub(crate) fn remplacer(&mut self, debut: usize, fin: usize, par: &str) {
        let (a, b) = (self.octet(debut), self.octet(fin.max(debut)));
        self.texte.replace_range(a..b, par);
    }

    pub(crate) fn placer_curseur(&mut self, pos: usize) {
        self.curseur = pos.min(self.longueur());
    }

    pub(crate) fn set_fraction(&mut self, etat: EtatFraction) {
        self.fraction = etat;
    }

    fn inserer_brut(&mut self, s: &str) {
        let o = self.octet(self.curseur);
        self.texte.insert_str(o, s);
        self.curseur += nb_unites(s);
    }

    /// □/□ collé à un littéral : un × explicite sépare les moitiés du nombre voisin
    /// (2 puis □/□ donne 2×□/□, jamais 21/4 une fois rempli).
    fn inserer_fraction(&mut self) {
        let o = self.octet(self.curseur);
        let (avant, apres) = self.texte.split_at(o);
        let gauche = if finit_litteral(avant) { "×" } else { "" };
        let droite = if commence_litteral(apres) { "×" } else { "" };

        self.inserer_brut(&format!("{gauche}{}{droite}", Gabarit::Fraction.vide()));
        self.curseur -= nb_unites(droite);
    }

    fn remplacer_initial(&mut self, s: &str) {
        self.texte = s.to_string();
        self.curseur = nb_unites(s);
    }

    /* ------------------------ Fractions ------------------------ */

    /// Moitiés de la fraction autour de la barre ; une case collée à la barre forme
    /// à elle seule la moitié (2□/□ : numérateur = □).
    fn plage_autour(&self, barre: usize) -> PlageFraction {
        let o = self.octet(barre);
        let (avant, apres) = (&self.texte[..o], &self.texte[o + BARRE.len_utf8()..]);
        let debut = if avant.ends_with(CASE) {
            barre - 1
        } else {
            index_unite(&self.texte, debut_operande(avant))
        };
        let fin = if apres.starts_with(CASE) {
            barre + 2
        } else {
            barre + 1 + nb_unites(&apres[..fin_operande(apres)])
        };
        PlageFraction {
            numerateur: debut..barre,
            barre,
            denominateur: barre + 1..fin,
        }
    }

    /// Fraction “active” : la première qui a encore une case, sinon celle qui contient
    /// le curseur, sinon la dernière.
    pub fn localiser_fraction(&self) -> Option<PlageFraction> {
        let plages: Vec<PlageFraction> = unites(&self.texte)
            .iter()
            .enumerate()
            .filter(|(_, u)| **u == "/")
            .map(|(b, _)| self.plage_autour(b))
            .collect();

        let a_une_case = |p: &PlageFraction| {
            self.extrait(p.numerateur.clone()).contains(CASE)
                || self.extrait(p.denominateur.clone()).contains(CASE)
        };

        plages
            .iter()
            .find(|p| a_une_case(*p))
            .or_else(|| {
                plages.iter().find(|p| {
                    p.numerateur.start <= self.curseur && self.curseur <= p.denominateur.end
                })
            })
            .or_else(|| plages.last())
            .cloned()
    }

    /* ------------------------ Insertion ------------------------ */

    /// Insère au curseur. Une Valeur passe d’abord par le résolveur de cases ;
    /// sur le tampon initial "0", valeur / gabarit / "(" remplacent le "0".
    pub fn inserer_au_curseur(&mut self, saisie: Saisie<'_>) {
        match saisie {
            Saisie::Valeur("") => {}
            Saisie::Valeur(v) => {
                if self.est_initial() {
                    self.remplacer_initial(v);
                } else if !cases::remplir(self, v) {
                    self.inserer_brut(v);
                }
            }
            Saisie::Gabarit(g) => {
                if self.est_initial() {
                    self.remplacer_initial(g.vide());
                } else if g == Gabarit::Fraction {
                    self.inserer_fraction();
                } else {
                    self.inserer_brut(g.vide());
                }
                if g == Gabarit::Fraction {
                    self.fraction = EtatFraction {
                        actif: true,
                        moitie: Moitie::Numerateur,
                    };
                }
            }
            Saisie::Operateur(op) => {
                // l’opérateur se place après la fraction en cours, pas au milieu
                if self.fraction.actif {
                    if let Some(f) = self.localiser_fraction() {
                        self.curseur = f.denominateur.end;
                    }
                    self.fraction.actif = false;
                }
                self.inserer_brut(op);
            }
            Saisie::Texte("(") if self.est_initial() => self.remplacer_initial("("),
            Saisie::Texte(t) => self.inserer_brut(t),
        }
        self.borner();
    }

    /* ------------------------ Effacement ------------------------ */

    /// Efface l’unité avant le curseur :
    /// 1) gabarit vide touché par le curseur -> retiré en entier
    /// 2) gabarit rempli finissant au curseur -> redevient vide (√9 -> √□)
    /// 3) mot connu (ans, log, sin(…) -> retiré en bloc
    /// 4) sinon un caractère (la case d’une fraction/fonction vidée est recréée)
    pub fn effacer_au_curseur(&mut self) {
        if self.curseur == 0 {
            return;
        }

        let fait = self.effacer_gabarit_vide() || self.restaurer_gabarit() || self.effacer_mot();
        if !fait {
            self.effacer_unite();
        }

        if self.texte.is_empty() {
            self.vider();
            return;
        }
        if !self.texte.contains(BARRE) {
            self.fraction = EtatFraction::default();
        }
        self.borner();
    }

    fn effacer_gabarit_vide(&mut self) -> bool {
        for g in Gabarit::TOUS {
            let vide = g.vide();
            let n = nb_unites(vide);
            let trouve = self
                .texte
                .match_indices(vide)
                .map(|(o, _)| index_unite(&self.texte, o))
                .find(|&debut| debut < self.curseur && self.curseur <= debut + n);

            if let Some(debut) = trouve {
                self.remplacer(debut, debut + n, "");
                self.curseur = debut;
                return true;
            }
        }
        false
    }

    fn restaurer_gabarit(&mut self) -> bool {
        let fin = self.octet(self.curseur);
        let Some((debut_octet, g)) = Gabarit::rempli_avant(&self.texte[..fin]) else {
            return false;
        };
        let debut = index_unite(&self.texte, debut_octet);
        self.remplacer(debut, self.curseur, g.vide());
        self.curseur = debut + nb_unites(g.vide());
        true
    }

    fn effacer_mot(&mut self) -> bool {
        let fin = self.octet(self.curseur);
        let Some(mot) = MOTS.iter().find(|m| self.texte[..fin].ends_with(**m)) else {
            return false;
        };
        let debut = self.curseur.saturating_sub(nb_unites(mot));
        self.remplacer(debut, self.curseur, "");
        self.curseur = debut;
        true
    }

    fn effacer_unite(&mut self) {
        let i = self.curseur - 1;
        let (est_case, barre_apres, barre_avant) = {
            let u = unites(&self.texte);
            (
                u.get(i) == Some(&"□"),
                u.get(i + 1) == Some(&"/"),
                i > 0 && u.get(i - 1) == Some(&"/"),
            )
        };

        // case d’une fraction à moitié remplie : partie avec sa barre
        if est_case && barre_apres {
            self.remplacer(i, i + 2, "");
            self.curseur = i;
            return;
        }
        if est_case && barre_avant {
            self.remplacer(i - 1, i + 1, "");
            self.curseur = i - 1;
            return;
        }

        self.remplacer(i, i + 1, "");
        self.curseur = i;
        self.recreer_case();
    }

    /// Après effacement d’un caractère : si un marqueur a perdu son opérande, sa case revient.
    fn recreer_case(&mut self) {
        let i = self.curseur;
        let (exposant_vide, case_manquante) = {
            let (avant, apres) = self.texte.split_at(self.octet(i));
            let operande_apres = commence_operande(apres);
            let prefixe = ["√", "log", "ln", "/"].iter().any(|p| avant.ends_with(p));
            let postfixe = ["²", "³", "!", "/"].iter().any(|s| apres.starts_with(s));
            (
                avant.ends_with("×10^") && !operande_apres,
                (prefixe && !operande_apres) || (postfixe && !finit_operande(avant)),
            )
        };

        if exposant_vide {
            self.remplacer(i - 1, i, "ⁿ");
        } else if case_manquante {
            self.remplacer(i, i, "□");
            self.curseur = i + 1;
        }
    }

    /* ------------------------ Navigation ------------------------ */

    /// Gauche/Droite : curseur borné. Haut/Bas : focus de la fraction (sinon sans effet).
    /// Ne modifie jamais le texte.
    pub fn deplacer_curseur(&mut self, direction: Direction) {
        match direction {
            Direction::Gauche => self.curseur = self.curseur.saturating_sub(1),
            Direction::Droite => self.curseur = (self.curseur + 1).min(self.longueur()),
            Direction::Haut | Direction::Bas => {
                let Some(f) = self.localiser_fraction() else {
                    return;
                };
                let moitie = if self.fraction.actif {
                    self.fraction.moitie.autre()
                } else if direction == Direction::Haut {
                    Moitie::Numerateur
                } else {
                    Moitie::Denominateur
                };
                self.fraction = EtatFraction {
                    actif: true,
                    moitie,
                };
                self.curseur = match moitie {
                    Moitie::Numerateur => f.numerateur.end,
                    Moitie::Denominateur => f.denominateur.end,
                };
            }
        }
        self.borner();
    }
}
