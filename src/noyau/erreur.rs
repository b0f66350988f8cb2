// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Une erreur = un genre (stable, testable) + un détail (texte d’origine, verbatim).
// La traduction “humaine” se fait seulement à l’affichage (app/vue.rs).

use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DivisionByZero,
    IncompleteExpression,
    SyntaxError,
    UnknownOperator,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DivisionByZero => "DIVISION_BY_ZERO",
            ErrorKind::IncompleteExpression => "INCOMPLETE_EXPRESSION",
            ErrorKind::SyntaxError => "SYNTAX_ERROR",
            ErrorKind::UnknownOperator => "UNKNOWN_OPERATOR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Erreur du noyau (tokenisation, évaluation, événement invalide).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct CalcError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl CalcError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn division_par_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "division par zéro")
    }

    pub fn incomplete(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompleteExpression, detail)
    }

    pub fn syntaxe(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::SyntaxError, detail)
    }

    pub fn operateur_inconnu(texte: &str) -> Self {
        Self::new(
            ErrorKind::UnknownOperator,
            format!("opérateur inconnu: '{texte}'"),
        )
    }
}
