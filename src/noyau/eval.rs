//! Noyau : évaluation du tampon Scientifique (pipeline réel)
//!
//! tampon -> équilibrage des parenthèses -> réécriture racine cubique
//!        -> jetons -> RPN -> valeur
//!
//! Remarque : l’équilibrage est un comptage global (ouvrantes - fermantes),
//! pas un suivi par appel. Il ne fait qu’ajouter des ')' à la fin : correct
//! tant que chaque appel resté ouvert se ferme en fin d’expression
//! (cas `sin(radians(90` en degrés). Une ')' tapée trop tôt dans un
//! `radians(` imbriqué ferme la mauvaise paire, sans diagnostic.

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::ErrorKind;
use super::jetons::tokenize;
use super::rpn::{eval_rpn, to_rpn};

lazy_static! {
    /// `pow(<nombre>)` : racine cubique dont le second argument manque encore.
    static ref RACINE_CUBIQUE: Regex = Regex::new(r"pow\((\d+(?:\.\d*)?)\)").unwrap();
}

/// API publique : évalue le tampon tel qu’affiché.
pub fn eval_expression(tampon: &str) -> Result<f64, ErrorKind> {
    let s = tampon.trim();
    if s.is_empty() {
        return Err(ErrorKind::EvaluationError);
    }

    let pret = prepare(s);
    tracing::trace!(tampon = s, evalue = %pret, "réécriture");

    let jetons = tokenize(&pret)?;
    let rpn = to_rpn(&jetons)?;
    eval_rpn(&rpn)
}

/// Réécritures textuelles avant évaluation.
pub fn prepare(s: &str) -> String {
    let equilibre = equilibre_parentheses(s);
    RACINE_CUBIQUE
        .replace_all(&equilibre, "pow($1, 1/3)")
        .into_owned()
}

/// Ajoute le déficit de ')' en fin de tampon.
/// Un excédent de ')' n’est pas réparé (l’évaluation échouera).
pub fn equilibre_parentheses(s: &str) -> String {
    let ouvrantes = s.matches('(').count();
    let fermantes = s.matches(')').count();
    let mut out = s.to_string();
    for _ in fermantes..ouvrantes {
        out.push(')');
    }
    out
}
