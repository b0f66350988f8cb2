// src/noyau/jetons.rs
//
// Modèle de jetons + tokenisation.
// - Jeton immuable : toute transformation produit un nouveau jeton.
// - Tok = union étiquetée (nombre / opérateur / parenthèses), pas de hiérarchie.

use std::fmt;
use std::str::FromStr;

use super::decimal::Decimal;
use super::erreur::CalcError;

/* ------------------------ Opérateurs ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }

    /// + - : 1 ; * / : 2 (tous associatifs à gauche)
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Star | Op::Slash => 2,
        }
    }
}

impl TryFrom<char> for Op {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Op::from_char(c).ok_or_else(|| CalcError::operateur_inconnu(&c.to_string()))
    }
}

impl FromStr for Op {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => Op::try_from(c),
            _ => Err(CalcError::operateur_inconnu(s)),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/* ------------------------ Nombres ------------------------ */

/// Littéral numérique : texte d’origine + valeur décodée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nombre {
    texte: String,
    valeur: Decimal,
}

impl Nombre {
    pub fn parse(texte: &str) -> Result<Self, CalcError> {
        let valeur = Decimal::parse(texte)?;
        Ok(Self {
            texte: texte.to_string(),
            valeur,
        })
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn valeur(&self) -> &Decimal {
        &self.valeur
    }

    /// Opposé exact ("5" -> "-5", "-5" -> "5").
    pub fn negatif(&self) -> Nombre {
        let texte = match self.texte.strip_prefix('-') {
            Some(reste) => reste.to_string(),
            None => format!("-{}", self.texte),
        };
        Nombre {
            texte,
            valeur: -&self.valeur,
        }
    }

    /// Un caractère de moins ; None si ce ne serait plus un nombre ("7", "-7").
    pub fn tronque(&self) -> Option<Nombre> {
        let mut texte = self.texte.clone();
        texte.pop();
        Nombre::parse(&texte).ok()
    }
}

impl From<Decimal> for Nombre {
    fn from(valeur: Decimal) -> Self {
        Self {
            texte: valeur.to_string(),
            valeur,
        }
    }
}

/* ------------------------ Jetons ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(Nombre),
    Op(Op),
    LPar,
    RPar,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub tok: Tok,
    /// Index (en caractères) dans l’entrée d’origine, si connu.
    pub position: Option<usize>,
}

impl Jeton {
    pub fn new(tok: Tok) -> Self {
        Self {
            tok,
            position: None,
        }
    }

    pub fn at(tok: Tok, position: usize) -> Self {
        Self {
            tok,
            position: Some(position),
        }
    }

    pub fn nombre(texte: &str) -> Result<Self, CalcError> {
        Ok(Self::new(Tok::Num(Nombre::parse(texte)?)))
    }

    pub fn op(op: Op) -> Self {
        Self::new(Tok::Op(op))
    }

    pub fn lpar() -> Self {
        Self::new(Tok::LPar)
    }

    pub fn rpar() -> Self {
        Self::new(Tok::RPar)
    }

    pub fn as_num(&self) -> Option<&Nombre> {
        match &self.tok {
            Tok::Num(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_op(&self) -> Option<Op> {
        match self.tok {
            Tok::Op(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_num(&self) -> bool {
        matches!(self.tok, Tok::Num(_))
    }

    pub fn is_op(&self) -> bool {
        matches!(self.tok, Tok::Op(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tok {
            Tok::Num(n) => f.write_str(n.texte()),
            Tok::Op(op) => write!(f, "{op}"),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/// Un '-' est unaire en début de flux, après un opérateur ou après '('.
pub fn position_unaire(precedent: Option<&Jeton>) -> bool {
    match precedent {
        None => true,
        Some(j) => matches!(j.tok, Tok::Op(_) | Tok::LPar),
    }
}

/* ------------------------ Tokenisation ------------------------ */

fn debut_nombre(chars: &[char], i: usize) -> bool {
    match chars.get(i) {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// chiffres* ['.' chiffres*] à partir de `start` ; renvoie (texte, fin).
fn lire_nombre(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    (chars[start..i].iter().collect(), i)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5)
/// - nombres négatifs (ex: -2 en début, après un opérateur ou après '(')
/// - opérateurs + - * /
/// - parenthèses ( )
/// - espaces (séparateurs)
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, CalcError> {
    let mut out: Vec<Jeton> = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Jeton::at(Tok::LPar, i));
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::at(Tok::RPar, i));
            i += 1;
            continue;
        }

        // Moins collé à un nombre, en position unaire => nombre négatif
        if c == '-' && debut_nombre(&chars, i + 1) && position_unaire(out.last()) {
            let (texte, fin) = lire_nombre(&chars, i + 1);
            let n = Nombre::parse(&format!("-{texte}"))?;
            out.push(Jeton::at(Tok::Num(n), i));
            i = fin;
            continue;
        }

        // Opérateurs
        if let Some(op) = Op::from_char(c) {
            out.push(Jeton::at(Tok::Op(op), i));
            i += 1;
            continue;
        }

        // Nombre
        if debut_nombre(&chars, i) {
            let (texte, fin) = lire_nombre(&chars, i);
            out.push(Jeton::at(Tok::Num(Nombre::parse(&texte)?), i));
            i = fin;
            continue;
        }

        return Err(CalcError::syntaxe(format!(
            "caractère inattendu: '{c}' (position {i})"
        )));
    }

    Ok(out)
}

/// Format utilitaire (affichage / démarche) : jetons séparés par un espace.
pub fn format_tokens(tokens: &[Jeton]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
