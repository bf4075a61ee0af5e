// src/noyau/reduction.rs
//
// Réduction des notations spéciales
// ---------------------------------
// Entrée : jetons (ans déjà substitué, multiplication implicite explicitée).
// Sortie : suite plate Val / Op, prête pour les deux passes arithmétiques (eval.rs).
//
// Règles :
// - √ log ln ×10^ : préfixes, appliqués à l’opérande qui suit (du plus proche au plus lointain)
// - ² ³ ! %       : postfixes, appliqués aussitôt à l’opérande courant (liaison plus forte que les préfixes)
// - '-' juste devant un nombre fait partie du littéral : "-3²" = 9, "√-4" hors domaine
// - sin( … ) et ( … ) : le contenu doit se réduire à UN littéral (pas de sous-expression)
//
// Pile explicite de segments : pas de récursion, la profondeur de parenthèses n’est pas bornée par la pile d’appels.

use tracing::trace;

use super::erreur::{ErreurCalc, ResultatCalc};
use super::expr::{FnUnaire, Noeud, Op};
use super::jetons::Tok;
use super::trig::TrigFn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Terme {
    Val(f64),
    Op(Op),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cadre {
    Sommet,
    Parenthese,
    Appel(TrigFn),
}

#[derive(Debug)]
struct Segment {
    cadre: Cadre,
    termes: Vec<Terme>,
    prefixes: Vec<FnUnaire>,
    courant: Option<Noeud>,
}

impl Segment {
    fn new(cadre: Cadre) -> Self {
        Self {
            cadre,
            termes: Vec::new(),
            prefixes: Vec::new(),
            courant: None,
        }
    }

    fn poser(&mut self, n: Noeud) -> ResultatCalc<()> {
        if self.courant.is_some() {
            // deux opérandes collés sans opérateur
            return Err(ErreurCalc::ExpressionInvalide);
        }
        self.courant = Some(n);
        Ok(())
    }

    fn attend_operande(&self) -> ResultatCalc<()> {
        if self.courant.is_some() {
            return Err(ErreurCalc::ExpressionInvalide);
        }
        Ok(())
    }

    /// Applique les préfixes en attente à l’opérande courant et le range dans les termes.
    fn clore_operande(&mut self) -> ResultatCalc<()> {
        let Some(n) = self.courant.take() else {
            return Ok(());
        };
        let mut x = n.reduire()?;
        while let Some(f) = self.prefixes.pop() {
            x = Noeud::unaire(f, Noeud::Lit(x)).reduire()?;
        }
        self.termes.push(Terme::Val(x));
        Ok(())
    }

    fn terminer(&mut self) -> ResultatCalc<Vec<Terme>> {
        self.clore_operande()?;
        if let Some(f) = self.prefixes.last() {
            return Err(ErreurCalc::OperandeMalforme(f.symbole()));
        }
        match self.termes.last() {
            None if self.cadre == Cadre::Sommet => Err(ErreurCalc::ExpressionInvalide),
            None => Err(ErreurCalc::SaisieIncomplete),
            Some(Terme::Op(op)) => Err(ErreurCalc::OperandeMalforme(op.symbole())),
            Some(Terme::Val(_)) => Ok(std::mem::take(&mut self.termes)),
        }
    }

    /// Ferme un groupe : son contenu doit être un seul littéral.
    fn fermer(mut self) -> ResultatCalc<f64> {
        let termes = self.terminer()?;
        match (self.cadre, termes.as_slice()) {
            (Cadre::Appel(f), [Terme::Val(x)]) => {
                Noeud::unaire(FnUnaire::Trig(f), Noeud::Lit(*x)).reduire()
            }
            (Cadre::Appel(f), _) => Err(ErreurCalc::OperandeMalforme(f.nom())),
            (Cadre::Parenthese, [Terme::Val(x)]) => Ok(*x),
            _ => Err(ErreurCalc::ExpressionInvalide),
        }
    }
}

fn dessus(pile: &mut [Segment]) -> ResultatCalc<&mut Segment> {
    pile.last_mut().ok_or(ErreurCalc::ExpressionInvalide)
}

fn operateur(t: Tok) -> Option<Op> {
    match t {
        Tok::Plus => Some(Op::Plus),
        Tok::Moins => Some(Op::Moins),
        Tok::Fois => Some(Op::Fois),
        Tok::Divise | Tok::Barre => Some(Op::Divise),
        _ => None,
    }
}

fn prefixe(t: Tok) -> Option<FnUnaire> {
    match t {
        Tok::Racine => Some(FnUnaire::Racine),
        Tok::Log => Some(FnUnaire::Log),
        Tok::Ln => Some(FnUnaire::Ln),
        Tok::Exp10 => Some(FnUnaire::Exp10),
        _ => None,
    }
}

fn postfixe(t: Tok) -> Option<FnUnaire> {
    match t {
        Tok::Carre => Some(FnUnaire::Carre),
        Tok::Cube => Some(FnUnaire::Cube),
        Tok::Factorielle => Some(FnUnaire::Factorielle),
        Tok::Pourcent => Some(FnUnaire::Pourcent),
        _ => None,
    }
}

/// Réduit toutes les notations spéciales ; renvoie la suite plate Val (Op Val)*.
pub fn reduire(tokens: &[Tok]) -> ResultatCalc<Vec<Terme>> {
    let mut pile = vec![Segment::new(Cadre::Sommet)];

    for &t in tokens {
        if let Some(op) = operateur(t) {
            let seg = dessus(&mut pile)?;
            if seg.courant.is_some() {
                seg.clore_operande()?;
                seg.termes.push(Terme::Op(op));
                continue;
            }
            match op {
                Op::Moins => seg.prefixes.push(FnUnaire::Oppose),
                Op::Plus if seg.termes.is_empty() && seg.prefixes.is_empty() => {}
                _ => return Err(ErreurCalc::OperandeMalforme(op.symbole())),
            }
            continue;
        }

        if let Some(f) = prefixe(t) {
            let seg = dessus(&mut pile)?;
            seg.attend_operande()?;
            seg.prefixes.push(f);
            continue;
        }

        if let Some(f) = postfixe(t) {
            let seg = dessus(&mut pile)?;
            let x = seg
                .courant
                .take()
                .ok_or(ErreurCalc::OperandeMalforme(f.symbole()))?;
            seg.courant = Some(Noeud::Lit(Noeud::unaire(f, x).reduire()?));
            continue;
        }

        match t {
            Tok::Num(x) => {
                let seg = dessus(&mut pile)?;
                seg.attend_operande()?;
                // signe collé au littéral
                let x = if seg.prefixes.last() == Some(&FnUnaire::Oppose) {
                    seg.prefixes.pop();
                    -x
                } else {
                    x
                };
                seg.poser(Noeud::Lit(x))?;
            }
            Tok::Case => dessus(&mut pile)?.poser(Noeud::Case)?,
            Tok::Ans => return Err(ErreurCalc::ExpressionInvalide),
            Tok::LPar | Tok::Trig(_) => {
                dessus(&mut pile)?.attend_operande()?;
                let cadre = match t {
                    Tok::Trig(f) => Cadre::Appel(f),
                    _ => Cadre::Parenthese,
                };
                pile.push(Segment::new(cadre));
            }
            Tok::RPar => {
                if pile.len() < 2 {
                    return Err(ErreurCalc::ExpressionInvalide);
                }
                let groupe = pile.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
                let x = groupe.fermer()?;
                dessus(&mut pile)?.poser(Noeud::Lit(x))?;
            }
            _ => return Err(ErreurCalc::ExpressionInvalide),
        }
    }

    if pile.len() > 1 {
        return Err(ErreurCalc::ExpressionInvalide);
    }
    let mut sommet = pile.pop().ok_or(ErreurCalc::ExpressionInvalide)?;
    let termes = sommet.terminer()?;

    trace!(termes = %texte_termes(&termes), "notations réduites");
    Ok(termes)
}

pub fn texte_termes(termes: &[Terme]) -> String {
    let mut out = String::new();
    for t in termes {
        match t {
            Terme::Val(x) => out.push_str(&format!("{x}")),
            Terme::Op(op) => out.push_str(op.symbole()),
        }
    }
    out
}
