// src/noyau/jetons.rs
//
// Lexème du tampon Scientifique (texte prêt à évaluer).
// Grammaire fermée : nombres, + - * / **, parenthèses, virgule,
// identifiants (fonctions / constantes de la liste blanche, vérifiés plus tard).

use super::erreur::ErrorKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonction ou constante : le passage RPN décide (selon '(' qui suit).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    LPar,
    RPar,
    Comma,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 1.5, .5, 3.)
/// - notation scientifique produite par `%.10g` (ex: 1e+20, 2.5e-07)
/// - opérateurs + - * / **
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErrorKind> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (v, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = suivant;
            continue;
        }

        tracing::trace!(%c, "caractère inattendu");
        return Err(ErrorKind::EvaluationError);
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `start`, retourne (valeur, index suivant).
///
/// `2e` sans chiffre d’exposant n’est PAS un exposant : on s’arrête avant
/// le `e` (qui redevient la constante, et l’évaluation échouera proprement).
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), ErrorKind> {
    let mut i = start;
    let mut point_vu = false;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            i += 1;
        } else if c == '.' && !point_vu {
            point_vu = true;
            i += 1;
        } else {
            break;
        }
    }

    // exposant optionnel : e[+-]?chiffres
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[start..i].iter().collect();
    if texte == "." {
        return Err(ErrorKind::EvaluationError);
    }
    let v = texte
        .parse::<f64>()
        .map_err(|_| ErrorKind::EvaluationError)?;
    Ok((v, i))
}
