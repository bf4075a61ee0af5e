// src/noyau/expr.rs
//
// AST de réduction (flottants double précision).
// - Case     : case non remplie (jamais évaluable)
// - Lit      : littéral
// - Unaire   : notation spéciale (√, ², log, ×10^, trig…) appliquée à un opérande
// - Binaire  : + - × ÷
// - Fraction : a/b (chemin direct)
//
// IMPORTANT:
// - Les noeuds sont construits puis réduits AUSSITÔT par la réduction (reduction.rs / eval.rs) :
//   un enfant est toujours un Lit (ou une Case). L’arbre ne dépasse jamais un niveau,
//   donc pas de récursion pilotée par la saisie.

use num_traits::ToPrimitive;

use super::erreur::{ErreurCalc, ResultatCalc};
use super::trig::TrigFn;

/// Au-delà, n! dépasse la plage des f64.
pub const FACTORIELLE_MAX: u32 = 170;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Op {
    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Moins => "-",
            Op::Fois => "*",
            Op::Divise => "/",
        }
    }

    pub fn est_multiplicatif(self) -> bool {
        matches!(self, Op::Fois | Op::Divise)
    }

    pub fn appliquer(self, a: f64, b: f64) -> ResultatCalc<f64> {
        match self {
            Op::Plus => Ok(a + b),
            Op::Moins => Ok(a - b),
            Op::Fois => Ok(a * b),
            Op::Divise => {
                if b == 0.0 {
                    return Err(ErreurCalc::DivisionParZero);
                }
                Ok(a / b)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnUnaire {
    // préfixes
    Racine,
    Log,
    Ln,
    Exp10,
    Oppose, // signe '-' devant un opérande non littéral

    // appel
    Trig(TrigFn),

    // postfixes
    Carre,
    Cube,
    Factorielle,
    Pourcent,
}

impl FnUnaire {
    pub fn symbole(self) -> &'static str {
        match self {
            FnUnaire::Racine => "√",
            FnUnaire::Log => "log",
            FnUnaire::Ln => "ln",
            FnUnaire::Exp10 => "×10^",
            FnUnaire::Oppose => "-",
            FnUnaire::Trig(f) => f.nom(),
            FnUnaire::Carre => "²",
            FnUnaire::Cube => "³",
            FnUnaire::Factorielle => "!",
            FnUnaire::Pourcent => "%",
        }
    }

    pub fn appliquer(self, x: f64) -> ResultatCalc<f64> {
        match self {
            FnUnaire::Racine => {
                if x < 0.0 {
                    return Err(ErreurCalc::HorsDomaine("√"));
                }
                Ok(x.sqrt())
            }
            FnUnaire::Log => {
                if x <= 0.0 {
                    return Err(ErreurCalc::HorsDomaine("log"));
                }
                Ok(x.log10())
            }
            FnUnaire::Ln => {
                if x <= 0.0 {
                    return Err(ErreurCalc::HorsDomaine("ln"));
                }
                Ok(x.ln())
            }
            FnUnaire::Exp10 => Ok(10f64.powf(x)),
            FnUnaire::Oppose => Ok(-x),
            FnUnaire::Trig(f) => f.appliquer(x),
            FnUnaire::Carre => Ok(x * x),
            FnUnaire::Cube => Ok(x * x * x),
            FnUnaire::Factorielle => factorielle(x),
            FnUnaire::Pourcent => Ok(x / 100.0),
        }
    }
}

/// n! itératif : entier naturel, borné à FACTORIELLE_MAX.
fn factorielle(x: f64) -> ResultatCalc<f64> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurCalc::HorsDomaine("!"));
    }
    let n = x.to_u32().ok_or(ErreurCalc::Depassement("!"))?;
    if n > FACTORIELLE_MAX {
        return Err(ErreurCalc::Depassement("!"));
    }

    let mut acc = 1.0f64;
    for k in 2..=n {
        acc *= f64::from(k);
    }
    Ok(acc)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Case,
    Lit(f64),
    Unaire(FnUnaire, Box<Noeud>),
    Binaire(Op, Box<Noeud>, Box<Noeud>),
    Fraction(Box<Noeud>, Box<Noeud>),
}

impl Noeud {
    pub fn unaire(f: FnUnaire, x: Noeud) -> Noeud {
        Noeud::Unaire(f, Box::new(x))
    }

    pub fn binaire(op: Op, a: Noeud, b: Noeud) -> Noeud {
        Noeud::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn fraction(n: Noeud, d: Noeud) -> Noeud {
        Noeud::Fraction(Box::new(n), Box::new(d))
    }

    /// Réduit le noeud en littéral (un seul niveau : les enfants sont déjà des Lit).
    pub fn reduire(self) -> ResultatCalc<f64> {
        match self {
            Noeud::Case => Err(ErreurCalc::SaisieIncomplete),
            Noeud::Lit(x) => Ok(x),
            Noeud::Unaire(f, x) => f.appliquer(x.litteral()?),
            Noeud::Binaire(op, a, b) => op.appliquer(a.litteral()?, b.litteral()?),
            Noeud::Fraction(n, d) => {
                let (n, d) = (n.litteral()?, d.litteral()?);
                if d == 0.0 {
                    return Err(ErreurCalc::DivisionParZero);
                }
                Ok(n / d)
            }
        }
    }

    fn litteral(&self) -> ResultatCalc<f64> {
        match self {
            Noeud::Lit(x) => Ok(*x),
            Noeud::Case => Err(ErreurCalc::SaisieIncomplete),
            _ => Err(ErreurCalc::ExpressionInvalide),
        }
    }
}
