//! src/app/evenement.rs
//!
//! Événements d’entrée (ce que l’UI envoie à l’état).
//! Les charges utiles restent des `char` : la validation se fait à l’application
//! (un opérateur hors alphabet remonte une erreur UnknownOperator).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evenement {
    /// '0'..='9'
    Chiffre(char),
    /// Point décimal
    Point,
    /// '+', '-', '*', '/'
    Operateur(char),
    /// '(' ou ')'
    Parenthese(char),
    Calculer,
    /// Backspace
    Retour,
    /// Efface l’entrée, garde le dernier résultat
    EffacerExpression,
    /// Remise à zéro totale
    EffacerTout,
}

impl Evenement {
    /// Touche clavier -> événement (None : touche sans effet).
    ///
    /// `=` / Entrée calcule, `<` / Backspace efface un symbole,
    /// `C` / Échap efface l’entrée, `A` remet tout à zéro.
    pub fn depuis_touche(c: char) -> Option<Evenement> {
        match c {
            '0'..='9' => Some(Evenement::Chiffre(c)),
            '.' | ',' => Some(Evenement::Point),
            '+' | '-' | '*' | '/' => Some(Evenement::Operateur(c)),
            '(' | ')' => Some(Evenement::Parenthese(c)),
            '=' | '\n' | '\r' => Some(Evenement::Calculer),
            '<' | '\u{8}' | '\u{7f}' => Some(Evenement::Retour),
            'C' | 'c' | '\u{1b}' => Some(Evenement::EffacerExpression),
            'A' | 'a' => Some(Evenement::EffacerTout),
            _ => None,
        }
    }
}

/// Suite de touches -> événements (les touches inconnues sont ignorées).
pub fn depuis_touches(s: &str) -> Vec<Evenement> {
    s.chars().filter_map(Evenement::depuis_touche).collect()
}
