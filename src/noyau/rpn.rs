// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), appels de fonction compris
// - Puis évaluer la RPN sur une pile, sans aucun effet de bord
//
// Règles (alignées sur l’arithmétique usuelle des calculatrices à texte) :
// - précédences : + - (1) < * / (2) < moins unaire (3) < ** (4)
// - ** associatif à droite : 2**3**2 = 2**9 ; -2**2 = -(2**2) ; 2**-1 = 0.5
// - Ident suivi de '(' => appel de fonction (liste blanche, arité vérifiée)
// - Ident seul => constante (pi, e), sinon erreur
//
// NOTE:
// - Aucune boucle non bornée : une passe sur les jetons, une passe sur la RPN.

use std::f64::consts;

use super::erreur::ErrorKind;
use super::jetons::Tok;

/// Factorielle la plus grande représentable en f64 (171! déborde).
const FACTORIELLE_MAX: f64 = 170.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Liste blanche des fonctions appelables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Sqrt,
    Pow,
    Abs,
    Radians,
    Degrees,
    Factorial,
}

impl Fonction {
    fn depuis_nom(nom: &str) -> Option<Self> {
        Some(match nom {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "log10" => Self::Log10,
            "ln" => Self::Ln,
            "sqrt" => Self::Sqrt,
            "pow" => Self::Pow,
            "abs" => Self::Abs,
            "radians" => Self::Radians,
            "degrees" => Self::Degrees,
            "factorial" => Self::Factorial,
            _ => return None,
        })
    }

    fn arite(self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }
}

fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        _ => None,
    }
}

/// Élément de la RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Bin(BinOp),
    Neg,
    Appel(Fonction, usize),
}

/// Pile d’opérateurs du shunting-yard.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Bin(BinOp),
    Neg,
    LPar,
    // fonction en attente de sa parenthèse fermante
    Fonction(Fonction),
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
        BinOp::Pow => 4,
    }
}

const PRECEDENCE_NEG: u8 = 3;

fn bin_op(t: &Tok) -> Option<BinOp> {
    match t {
        Tok::Plus => Some(BinOp::Add),
        Tok::Minus => Some(BinOp::Sub),
        Tok::Star => Some(BinOp::Mul),
        Tok::Slash => Some(BinOp::Div),
        Tok::StarStar => Some(BinOp::Pow),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN.
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [Num(π), Num(2), Bin(Div), Appel(Sin, 1)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErrorKind> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // Un compteur d’arguments par parenthèse ouverte ;
    // `None` pour une parenthèse de groupement (virgule interdite).
    let mut arites: Vec<Option<usize>> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions invalides.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErrorKind::EvaluationError);
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Ident(nom) => {
                if prev_was_value {
                    return Err(ErrorKind::EvaluationError);
                }
                if iter.peek() == Some(&&Tok::LPar) {
                    let f = Fonction::depuis_nom(nom).ok_or(ErrorKind::EvaluationError)?;
                    ops.push(Pile::Fonction(f));
                    prev_was_value = false;
                } else {
                    let v = constante(nom).ok_or(ErrorKind::EvaluationError)?;
                    out.push(Rpn::Num(v));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErrorKind::EvaluationError);
                }
                let est_appel = matches!(ops.last(), Some(Pile::Fonction(_)));
                arites.push(est_appel.then_some(0));
                ops.push(Pile::LPar);
                prev_was_value = false;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(ErrorKind::EvaluationError);
                }
                depile_jusqu_a_lpar(&mut ops, &mut out)?;
                match arites.last_mut() {
                    Some(Some(n)) => *n += 1,
                    _ => return Err(ErrorKind::EvaluationError),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                let arite = arites.pop().ok_or(ErrorKind::EvaluationError)?;
                let vide = !prev_was_value;

                depile_jusqu_a_lpar(&mut ops, &mut out)?;
                ops.pop(); // la '(' elle-même

                match arite {
                    Some(n) => {
                        // f() : zéro argument ; f(a,) : virgule pendante refusée
                        let nb_args = if vide {
                            if n > 0 {
                                return Err(ErrorKind::EvaluationError);
                            }
                            0
                        } else {
                            n + 1
                        };
                        let Some(Pile::Fonction(f)) = ops.pop() else {
                            return Err(ErrorKind::EvaluationError);
                        };
                        out.push(Rpn::Appel(f, nb_args));
                    }
                    None => {
                        if vide {
                            return Err(ErrorKind::EvaluationError);
                        }
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // signe unaire ; le '+' unaire est neutre
                if matches!(tok, Tok::Minus) {
                    ops.push(Pile::Neg);
                }
            }

            _ => {
                let op = bin_op(tok).ok_or(ErrorKind::EvaluationError)?;
                if !prev_was_value {
                    return Err(ErrorKind::EvaluationError);
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' (ni une fonction, collée à sa '(')
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                let p_tok = precedence(op);
                let droite = op == BinOp::Pow;
                while let Some(top) = ops.last().copied() {
                    let p_top = match top {
                        Pile::Bin(b) => precedence(b),
                        Pile::Neg => PRECEDENCE_NEG,
                        Pile::LPar | Pile::Fonction(_) => break,
                    };
                    let doit_pop = if droite { p_top > p_tok } else { p_top >= p_tok };
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(sortie(top)?);
                }

                ops.push(Pile::Bin(op));
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErrorKind::EvaluationError);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Pile::LPar | Pile::Fonction(_)) {
            // parenthèses non fermées : l’équilibrage doit avoir lieu avant
            return Err(ErrorKind::EvaluationError);
        }
        out.push(sortie(op)?);
    }

    Ok(out)
}

fn sortie(p: Pile) -> Result<Rpn, ErrorKind> {
    match p {
        Pile::Bin(b) => Ok(Rpn::Bin(b)),
        Pile::Neg => Ok(Rpn::Neg),
        Pile::LPar | Pile::Fonction(_) => Err(ErrorKind::EvaluationError),
    }
}

fn depile_jusqu_a_lpar(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) -> Result<(), ErrorKind> {
    while let Some(top) = ops.last().copied() {
        if matches!(top, Pile::LPar) {
            return Ok(());
        }
        ops.pop();
        out.push(sortie(top)?);
    }
    // ')' ou ',' sans '(' correspondante
    Err(ErrorKind::EvaluationError)
}

/* ------------------------ Évaluation ------------------------ */

/// Évalue une RPN. Toute valeur non finie produite est une erreur.
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, ErrorKind> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for item in rpn {
        let v = match item {
            Rpn::Num(v) => *v,
            Rpn::Neg => -st.pop().ok_or(ErrorKind::EvaluationError)?,
            Rpn::Bin(op) => {
                let b = st.pop().ok_or(ErrorKind::EvaluationError)?;
                let a = st.pop().ok_or(ErrorKind::EvaluationError)?;
                binaire(*op, a, b)?
            }
            Rpn::Appel(f, n) => {
                if *n != f.arite() || st.len() < *n {
                    return Err(ErrorKind::EvaluationError);
                }
                let args = st.split_off(st.len() - n);
                appel(*f, &args)?
            }
        };

        if !v.is_finite() {
            // dépassement (10**400, factorial trop grand...)
            return Err(ErrorKind::EvaluationError);
        }
        st.push(v);
    }

    if st.len() != 1 {
        return Err(ErrorKind::EvaluationError);
    }
    st.pop().ok_or(ErrorKind::EvaluationError)
}

fn binaire(op: BinOp, a: f64, b: f64) -> Result<f64, ErrorKind> {
    Ok(match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err(ErrorKind::DivisionByZero);
            }
            a / b
        }
        BinOp::Pow => puissance(a, b)?,
    })
}

fn puissance(a: f64, b: f64) -> Result<f64, ErrorKind> {
    if a == 0.0 && b < 0.0 {
        return Err(ErrorKind::DivisionByZero);
    }
    // base négative, exposant fractionnaire : résultat complexe
    if a < 0.0 && b.fract() != 0.0 {
        return Err(ErrorKind::DomainError);
    }
    Ok(a.powf(b))
}

fn appel(f: Fonction, args: &[f64]) -> Result<f64, ErrorKind> {
    let x = args[0];
    let dans = |ok: bool, v: f64| if ok { Ok(v) } else { Err(ErrorKind::DomainError) };

    match f {
        Fonction::Sin => Ok(x.sin()),
        Fonction::Cos => Ok(x.cos()),
        Fonction::Tan => Ok(x.tan()),
        Fonction::Asin => dans((-1.0..=1.0).contains(&x), x.asin()),
        Fonction::Acos => dans((-1.0..=1.0).contains(&x), x.acos()),
        Fonction::Atan => Ok(x.atan()),
        Fonction::Log10 => dans(x > 0.0, x.log10()),
        Fonction::Ln => dans(x > 0.0, x.ln()),
        Fonction::Sqrt => dans(x >= 0.0, x.sqrt()),
        Fonction::Pow => puissance(x, args[1]),
        Fonction::Abs => Ok(x.abs()),
        Fonction::Radians => Ok(x.to_radians()),
        Fonction::Degrees => Ok(x.to_degrees()),
        Fonction::Factorial => factorielle(x),
    }
}

fn factorielle(x: f64) -> Result<f64, ErrorKind> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ErrorKind::DomainError);
    }
    if x > FACTORIELLE_MAX {
        return Err(ErrorKind::EvaluationError);
    }
    // borné par FACTORIELLE_MAX
    Ok((2..=x as u32).fold(1.0, |acc, k| acc * f64::from(k)))
}
