//! Noyau de calcul trois modes
//!
//! Organisation interne :
//! - touches.rs      : jetons abstraits émis par la présentation
//! - erreur.rs       : ErrorKind (texte affiché à la place du nombre)
//! - historique.rs   : HistoryLog (un par moteur)
//! - rendu.rs        : RenderModel (sortie de chaque moteur)
//! - format.rs       : `%.10g` + rendu/lecture en base 2/8/10/16
//! - jetons.rs       : tokenisation du tampon Scientifique
//! - rpn.rs          : shunting-yard + évaluation postfixe
//! - eval.rs         : pipeline Scientifique complet
//! - basique.rs      : moteur à deux registres
//! - scientifique.rs : moteur à tampon + mode d’angle
//! - programmeur.rs  : moteur entier multi-bases
//! - moteur.rs       : trait commun + session

pub mod basique;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod moteur;
pub mod programmeur;
pub mod rendu;
pub mod rpn;
pub mod scientifique;
pub mod touches;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use basique::BasicEngine;
pub use erreur::ErrorKind;
pub use eval::eval_expression;
pub use historique::HistoryLog;
pub use moteur::{CalculatorEngine, Engine, Mode, Session};
pub use programmeur::ProgrammerEngine;
pub use rendu::RenderModel;
pub use scientifique::{AngleMode, ScientificEngine};
pub use touches::{Base, Constant, Control, Function, Operator, Paren, Token};
