// src/noyau/trig.rs
//
// Trigonométrie en degrés (directe + réciproque)
// ----------------------------------------------
// - sin/cos/tan : x·π/180, avec table d’angles remarquables (valeurs exactes)
// - sin⁻¹/cos⁻¹ : argument dans [-1, 1], sinon hors domaine
// - tan⁻¹       : aucun contrôle
// Résultats des réciproques en degrés (·180/π).

use std::f64::consts::PI;

use num_traits::ToPrimitive;

use super::erreur::{ErreurCalc, ResultatCalc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    ArcSin,
    ArcCos,
    ArcTan,
}

impl TrigFn {
    pub const TOUTES: [TrigFn; 6] = [
        TrigFn::ArcSin,
        TrigFn::ArcCos,
        TrigFn::ArcTan,
        TrigFn::Sin,
        TrigFn::Cos,
        TrigFn::Tan,
    ];

    /// Nom affiché (sans parenthèse).
    pub fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::ArcSin => "sin⁻¹",
            TrigFn::ArcCos => "cos⁻¹",
            TrigFn::ArcTan => "tan⁻¹",
        }
    }

    /// Appel ouvert, tel qu’il apparaît dans le tampon : "sin(", "sin⁻¹("…
    pub fn ouverture(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin(",
            TrigFn::Cos => "cos(",
            TrigFn::Tan => "tan(",
            TrigFn::ArcSin => "sin⁻¹(",
            TrigFn::ArcCos => "cos⁻¹(",
            TrigFn::ArcTan => "tan⁻¹(",
        }
    }

    /// Squelette à argument vide : "sin()", "sin⁻¹()"…
    pub fn squelette(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin()",
            TrigFn::Cos => "cos()",
            TrigFn::Tan => "tan()",
            TrigFn::ArcSin => "sin⁻¹()",
            TrigFn::ArcCos => "cos⁻¹()",
            TrigFn::ArcTan => "tan⁻¹()",
        }
    }

    /// Variante SHIFT (sin <-> sin⁻¹).
    pub fn reciproque(self) -> TrigFn {
        match self {
            TrigFn::Sin => TrigFn::ArcSin,
            TrigFn::Cos => TrigFn::ArcCos,
            TrigFn::Tan => TrigFn::ArcTan,
            TrigFn::ArcSin => TrigFn::Sin,
            TrigFn::ArcCos => TrigFn::Cos,
            TrigFn::ArcTan => TrigFn::Tan,
        }
    }

    pub fn appliquer(self, x: f64) -> ResultatCalc<f64> {
        match self {
            TrigFn::Sin => Ok(angle_remarquable(self, x).unwrap_or_else(|| (x * PI / 180.0).sin())),
            TrigFn::Cos => Ok(angle_remarquable(self, x).unwrap_or_else(|| (x * PI / 180.0).cos())),
            TrigFn::Tan => Ok(angle_remarquable(self, x).unwrap_or_else(|| (x * PI / 180.0).tan())),

            TrigFn::ArcSin => {
                verifier_unitaire(self, x)?;
                Ok(x.asin() * 180.0 / PI)
            }
            TrigFn::ArcCos => {
                verifier_unitaire(self, x)?;
                Ok(x.acos() * 180.0 / PI)
            }
            TrigFn::ArcTan => Ok(x.atan() * 180.0 / PI),
        }
    }
}

fn verifier_unitaire(f: TrigFn, x: f64) -> ResultatCalc<()> {
    if (-1.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(ErreurCalc::HorsDomaine(f.nom()))
    }
}

/// Angles entiers “remarquables” (modulo 360°) : valeur exacte au lieu du bruit flottant
/// (sin 180° = 0 et non 1.22e-16, sin 30° = 0.5 et non 0.49999999999999994).
///
/// Retour None si l’angle n’est pas dans la table (calcul flottant direct).
fn angle_remarquable(f: TrigFn, x: f64) -> Option<f64> {
    if x.fract() != 0.0 {
        return None;
    }
    let k = x.to_i64()?.rem_euclid(360);

    let v = match f {
        TrigFn::Sin => match k {
            0 | 180 => 0.0,
            30 | 150 => 0.5,
            90 => 1.0,
            210 | 330 => -0.5,
            270 => -1.0,
            _ => return None,
        },
        TrigFn::Cos => match k {
            0 => 1.0,
            60 | 300 => 0.5,
            90 | 270 => 0.0,
            120 | 240 => -0.5,
            180 => -1.0,
            _ => return None,
        },
        TrigFn::Tan => match k {
            0 | 180 => 0.0,
            45 | 225 => 1.0,
            135 | 315 => -1.0,
            _ => return None,
        },
        _ => return None,
    };

    Some(v)
}
