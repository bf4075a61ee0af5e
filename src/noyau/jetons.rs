// src/noyau/jetons.rs
//
// Modèle de saisie : glyphes réservés, gabarits à cases, unités d’affichage, jetons.
//
// Glyphes :
// - □ : case générique (argument, numérateur, dénominateur, base)
// - ⁿ : case d’exposant dans ×10ⁿ
// - "⁻¹" : deux scalaires Unicode, mais UNE seule unité d’affichage (curseur, effacement)

use super::erreur::{ErreurCalc, ResultatCalc};
use super::trig::TrigFn;

pub const CASE: char = '□';
pub const CASE_EXPOSANT: char = 'ⁿ';
pub const BARRE: char = '/';
pub const ANS: &str = "ans";

/// Marqueurs préfixes : un signe '-' juste après eux appartient à l’opérande.
const PREFIXES: [&str; 5] = ["√", "log", "ln", "×10^", "("];
const OPERATEURS: [char; 7] = ['+', '-', '×', '÷', '*', '/', '−'];

/* ------------------------ Unités d’affichage ------------------------ */

/// Découpe le texte en unités d’affichage (un caractère, sauf "⁻¹" qui est atomique).
pub fn unites(texte: &str) -> Vec<&str> {
    let mut out = Vec::with_capacity(texte.len());
    let mut it = texte.char_indices().peekable();

    while let Some((i, c)) = it.next() {
        let mut fin = i + c.len_utf8();
        if c == '⁻' {
            if let Some(&(j, '¹')) = it.peek() {
                fin = j + '¹'.len_utf8();
                it.next();
            }
        }
        out.push(&texte[i..fin]);
    }

    out
}

pub fn nb_unites(texte: &str) -> usize {
    unites(texte).len()
}

/// Octet -> indice d’unité (l’octet doit tomber sur une frontière de caractère).
pub fn index_unite(texte: &str, octet: usize) -> usize {
    nb_unites(&texte[..octet.min(texte.len())])
}

/* ------------------------ Opérandes littéraux ------------------------ */

fn est_chiffre_ou_case(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == CASE
}

/// Vrai si un '-' placé juste après `avant` est un signe (et non une soustraction).
pub fn est_position_de_signe(avant: &str) -> bool {
    avant.is_empty()
        || avant.ends_with(OPERATEURS)
        || PREFIXES.iter().any(|p| avant.ends_with(p))
}

/// Début (octet) de l’opérande littéral qui termine `avant` :
/// plus longue suite de chiffres / '.' / □ / "ans", plus un signe '-' en tête s’il est en position de signe.
/// Retourne `avant.len()` si aucun opérande.
pub fn debut_operande(avant: &str) -> usize {
    let mut debut = avant.len();

    loop {
        let reste = &avant[..debut];
        if reste.ends_with(ANS) {
            debut -= ANS.len();
            continue;
        }
        match reste.chars().next_back() {
            Some(c) if est_chiffre_ou_case(c) => debut -= c.len_utf8(),
            _ => break,
        }
    }

    if debut < avant.len() && avant[..debut].ends_with('-') {
        let sans_signe = debut - 1;
        if est_position_de_signe(&avant[..sans_signe]) {
            debut = sans_signe;
        }
    }

    debut
}

/// Longueur (octets) de l’opérande littéral qui commence `apres` (signe de tête compris).
pub fn fin_operande(apres: &str) -> usize {
    let mut fin = 0;
    if apres.starts_with('-') {
        fin = 1;
    }

    loop {
        let reste = &apres[fin..];
        if reste.starts_with(ANS) {
            fin += ANS.len();
            continue;
        }
        match reste.chars().next() {
            Some(c) if est_chiffre_ou_case(c) => fin += c.len_utf8(),
            _ => break,
        }
    }

    // un signe seul n’est pas un opérande
    if fin == 1 && apres.starts_with('-') {
        0
    } else {
        fin
    }
}

/// Vrai si `apres` commence par quelque chose qui peut servir d’opérande.
pub fn commence_operande(apres: &str) -> bool {
    match apres.chars().next() {
        Some(c) if est_chiffre_ou_case(c) || matches!(c, '-' | '(' | '√') => true,
        Some(_) => ["ans", "log", "ln", "sin", "cos", "tan"]
            .iter()
            .any(|m| apres.starts_with(m)),
        None => false,
    }
}

/// Vrai si `avant` se termine par un opérande complet (littéral, groupe fermé, postfixe).
pub fn finit_operande(avant: &str) -> bool {
    if avant.ends_with(ANS) {
        return true;
    }
    match avant.chars().next_back() {
        Some(c) => est_chiffre_ou_case(c) || matches!(c, ')' | '²' | '³' | '!' | '%'),
        None => false,
    }
}

/// Vrai si `avant` finit par un littéral (chiffre, '.', □, ans) qui se collerait au texte suivant.
pub fn finit_litteral(avant: &str) -> bool {
    avant.ends_with(ANS) || avant.chars().next_back().is_some_and(est_chiffre_ou_case)
}

/// Vrai si `apres` commence par un littéral qui se collerait au texte précédent.
pub fn commence_litteral(apres: &str) -> bool {
    apres.starts_with(ANS) || apres.chars().next().is_some_and(est_chiffre_ou_case)
}

/* ------------------------ Gabarits à cases ------------------------ */

/// Gabarits insérés par les touches de fonction, avec leur(s) case(s) vide(s).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gabarit {
    Fraction,
    Racine,
    Carre,
    Log,
    Exp10,
    Trig(TrigFn),
    Ln,
    Cube,
    Factorielle,
}

impl Gabarit {
    pub const TOUS: [Gabarit; 14] = [
        Gabarit::Fraction,
        Gabarit::Racine,
        Gabarit::Carre,
        Gabarit::Log,
        Gabarit::Exp10,
        Gabarit::Trig(TrigFn::Sin),
        Gabarit::Trig(TrigFn::Cos),
        Gabarit::Trig(TrigFn::Tan),
        Gabarit::Trig(TrigFn::ArcSin),
        Gabarit::Trig(TrigFn::ArcCos),
        Gabarit::Trig(TrigFn::ArcTan),
        Gabarit::Ln,
        Gabarit::Cube,
        Gabarit::Factorielle,
    ];

    /// Forme vide, telle qu’insérée dans le tampon.
    pub fn vide(self) -> &'static str {
        match self {
            Gabarit::Fraction => "□/□",
            Gabarit::Racine => "√□",
            Gabarit::Carre => "□²",
            Gabarit::Log => "log□",
            Gabarit::Exp10 => "×10ⁿ",
            Gabarit::Trig(f) => f.squelette(),
            Gabarit::Ln => "ln□",
            Gabarit::Cube => "□³",
            Gabarit::Factorielle => "□!",
        }
    }

    /// (préfixe, suffixe) autour de la valeur une fois la case remplie.
    /// NOTE: la fraction a deux cases, elle est traitée à part (cases.rs).
    pub fn cadre(self) -> (&'static str, &'static str) {
        match self {
            Gabarit::Fraction => ("", ""),
            Gabarit::Racine => ("√", ""),
            Gabarit::Carre => ("", "²"),
            Gabarit::Log => ("log", ""),
            Gabarit::Exp10 => ("×10^", ""),
            Gabarit::Trig(f) => (f.ouverture(), ")"),
            Gabarit::Ln => ("ln", ""),
            Gabarit::Cube => ("", "³"),
            Gabarit::Factorielle => ("", "!"),
        }
    }

    /// Reconnaît un gabarit REMPLI qui se termine exactement à la fin de `avant`.
    /// Retour: (octet de début, gabarit) — ex: "2+sin(30)" -> (2, Trig(Sin)).
    pub fn rempli_avant(avant: &str) -> Option<(usize, Gabarit)> {
        // appel : nom( argument )
        if let Some(corps) = avant.strip_suffix(')') {
            let ouvrant = parenthese_ouvrante(corps)?;
            if ouvrant + 1 == corps.len() {
                return None; // argument vide : pas rempli
            }
            let tete = &corps[..ouvrant];
            return TrigFn::TOUTES
                .iter()
                .find(|f| tete.ends_with(f.nom()))
                .map(|f| (ouvrant - f.nom().len(), Gabarit::Trig(*f)));
        }

        // postfixes : x² x³ x!
        for g in [Gabarit::Carre, Gabarit::Cube, Gabarit::Factorielle] {
            if let Some(corps) = avant.strip_suffix(g.cadre().1) {
                let d = debut_operande(corps);
                if d < corps.len() {
                    return Some((d, g));
                }
                return None;
            }
        }

        // préfixes : √x logx lnx ×10^x
        let d = debut_operande(avant);
        if d == avant.len() {
            return None;
        }
        let tete = &avant[..d];
        [Gabarit::Racine, Gabarit::Log, Gabarit::Exp10, Gabarit::Ln]
            .into_iter()
            .find(|g| tete.ends_with(g.cadre().0))
            .map(|g| (d - g.cadre().0.len(), g))
    }
}

/// Octet de la '(' qui ouvre le groupe fermé à la fin de `corps` (la ')' déjà retirée).
fn parenthese_ouvrante(corps: &str) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, c) in corps.char_indices().rev() {
        match c {
            ')' => profondeur += 1,
            '(' if profondeur == 0 => return Some(i),
            '(' => profondeur -= 1,
            _ => {}
        }
    }
    None
}

/* ------------------------ Jetons ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Ans,
    Case, // □ ou ⁿ : jamais évaluable

    // préfixes
    Racine,
    Log,
    Ln,
    Exp10, // ×10^

    // appel (la parenthèse ouvrante fait partie du jeton)
    Trig(TrigFn),

    // postfixes
    Carre,
    Cube,
    Factorielle,
    Pourcent,

    Plus,
    Moins,
    Fois,
    Divise, // ÷
    Barre,  // / (fraction)

    LPar,
    RPar,
}

fn commence_par(chars: &[char], i: usize, motif: &str) -> bool {
    let mut j = i;
    for m in motif.chars() {
        if j >= chars.len() || chars[j] != m {
            return false;
        }
        j += 1;
    }
    true
}

/// Tokenize le texte du tampon.
/// Supporte:
/// - littéraux décimaux (ex: 12, 0.5, .5)
/// - ans, □, ⁿ
/// - √, log, ln, ×10^ (ou ×10ⁿ vide)
/// - sin( cos( tan( sin⁻¹( cos⁻¹( tan⁻¹(
/// - ² ³ ! %
/// - opérateurs + - − × * ÷ /
/// - parenthèses ( )
pub fn tokenize(s: &str) -> ResultatCalc<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : suite de chiffres et de points
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            let x: f64 = txt.parse().map_err(|_| ErreurCalc::ExpressionInvalide)?;
            out.push(Tok::Num(x));
            continue;
        }

        // ×10^ avant × (sinon "3×10^2" serait lu 3 × 10 ^ 2)
        if commence_par(&chars, i, "×10^") {
            out.push(Tok::Exp10);
            i += 4;
            continue;
        }
        if commence_par(&chars, i, "×10ⁿ") {
            out.push(Tok::Exp10);
            i += 3; // ⁿ -> Case au tour suivant
            continue;
        }

        // Appels trig (réciproques d’abord : "sin⁻¹(" commence aussi par "sin")
        if let Some(f) = TrigFn::TOUTES
            .iter()
            .find(|f| commence_par(&chars, i, f.ouverture()))
        {
            out.push(Tok::Trig(*f));
            i += f.ouverture().chars().count();
            continue;
        }

        // Mots
        let mot = [(ANS, Tok::Ans), ("log", Tok::Log), ("ln", Tok::Ln)]
            .into_iter()
            .find(|(m, _)| commence_par(&chars, i, m));
        if let Some((m, tok)) = mot {
            out.push(tok);
            i += m.len();
            continue;
        }

        let tok = match c {
            CASE | CASE_EXPOSANT => Tok::Case,
            '√' => Tok::Racine,
            '²' => Tok::Carre,
            '³' => Tok::Cube,
            '!' => Tok::Factorielle,
            '%' => Tok::Pourcent,
            '+' => Tok::Plus,
            '-' | '−' => Tok::Moins,
            '×' | '*' => Tok::Fois,
            '÷' => Tok::Divise,
            BARRE => Tok::Barre,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => return Err(ErreurCalc::ExpressionInvalide),
        };
        out.push(tok);
        i += 1;
    }

    Ok(out)
}

/// Rendu texte des jetons (traces + tests) : multiplication explicite en '*'.
pub fn texte_jetons(tokens: &[Tok]) -> String {
    let mut out = String::new();
    for t in tokens {
        match t {
            Tok::Num(x) => out.push_str(&format!("{x}")),
            Tok::Ans => out.push_str(ANS),
            Tok::Case => out.push(CASE),
            Tok::Racine => out.push('√'),
            Tok::Log => out.push_str("log"),
            Tok::Ln => out.push_str("ln"),
            Tok::Exp10 => out.push_str("×10^"),
            Tok::Trig(f) => out.push_str(f.ouverture()),
            Tok::Carre => out.push('²'),
            Tok::Cube => out.push('³'),
            Tok::Factorielle => out.push('!'),
            Tok::Pourcent => out.push('%'),
            Tok::Plus => out.push('+'),
            Tok::Moins => out.push('-'),
            Tok::Fois => out.push('*'),
            Tok::Divise | Tok::Barre => out.push('/'),
            Tok::LPar => out.push('('),
            Tok::RPar => out.push(')'),
        }
    }
    out
}
