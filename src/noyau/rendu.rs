// src/noyau/rendu.rs

use super::erreur::ErrorKind;

/// Ce que la couche de présentation doit afficher après un jeton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderModel {
    pub primary_display: String,
    /// Aperçu d’expression, mode d’angle ou panneau de conversion.
    pub secondary_display: Option<String>,
    pub error: Option<ErrorKind>,
}

impl RenderModel {
    pub fn new(primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self {
            primary_display: primary.into(),
            secondary_display: secondary,
            error: None,
        }
    }

    /// Erreur : le texte de l’erreur remplace le résultat numérique.
    pub fn erreur(kind: ErrorKind, secondary: Option<String>) -> Self {
        Self {
            primary_display: kind.to_string(),
            secondary_display: secondary,
            error: Some(kind),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
