// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes sont récupérées localement par le moteur qui les produit :
// `apply` ne propage jamais, il rend un RenderModel d’erreur.

use thiserror::Error;

/// Erreur récupérable d’un moteur.
///
/// Le texte `Display` est exactement ce que l’affichage principal montre
/// à la place d’un nombre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Error: Div by 0")]
    DivisionByZero,

    #[error("Error: Mod by 0")]
    ModuloByZero,

    /// Chiffres accumulés impossibles à relire (ex: "-" seul après ⌫).
    #[error("Error: Invalid Input")]
    InvalidNumericInput,

    /// Syntaxe invalide, dépassement, nom hors liste blanche.
    #[error("Error")]
    EvaluationError,

    /// Argument hors domaine (asin(2), sqrt(-1), factorial(2.5), ...).
    #[error("Error: Math domain")]
    DomainError,
}
