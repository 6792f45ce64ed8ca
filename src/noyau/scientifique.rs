// src/noyau/scientifique.rs
//
// Moteur Scientifique : construit un tampon textuel (syntaxe d’appel de
// fonction comprise), puis l’évalue d’un seul coup sur "=".
// Le mode d’angle ne réécrit que les insertions FUTURES de sin/cos/tan.

use super::erreur::ErrorKind;
use super::eval::eval_expression;
use super::format::format_g10;
use super::historique::HistoryLog;
use super::moteur::CalculatorEngine;
use super::rendu::RenderModel;
use super::touches::{Constant, Control, Function, Paren, Token};

/// Marqueur placé dans le tampon après un échec d’évaluation.
pub const MARQUEUR_ERREUR: &str = "Error";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScientificEngine {
    expression: String,
    angle_mode: AngleMode,
    // le tampon contient le marqueur d’erreur : toute insertion repart de zéro
    error: Option<ErrorKind>,
    history: HistoryLog,
}

impl ScientificEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            angle_mode,
            ..Self::default()
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Ajout verbatim au tampon.
    fn push(&mut self, s: &str) {
        if self.error.take().is_some() {
            self.expression.clear();
        }
        self.expression.push_str(s);
    }

    fn function(&mut self, f: Function) {
        let appel = match f {
            Function::Sin => "sin(",
            Function::Cos => "cos(",
            Function::Tan => "tan(",
            Function::Asin => "asin(",
            Function::Acos => "acos(",
            Function::Atan => "atan(",
            Function::Log => "log10(",
            Function::Ln => "ln(",
            Function::Sqrt => "sqrt(",
            // second argument injecté à l’évaluation : pow(x) -> pow(x, 1/3)
            Function::Cbrt => "pow(",
            Function::Square => "**2",
            Function::Cube => "**3",
            Function::Pow => "**",
            Function::Abs => "abs(",
            Function::Factorial => "factorial(",
        };

        if f.is_direct_trig() && self.angle_mode == AngleMode::Degrees {
            // deux parenthèses ouvertes : fermées par l’équilibrage
            self.push(&format!("{appel}radians("));
        } else {
            self.push(appel);
        }
    }

    fn equals(&mut self) -> Result<(), ErrorKind> {
        if self.expression.is_empty() || self.error.is_some() {
            return Ok(());
        }

        let v = eval_expression(&self.expression)?;
        let resultat = format_g10(v);
        self.history
            .append(format!("{} = {resultat}", self.expression));
        self.expression = resultat;
        Ok(())
    }

    fn negate(&mut self) {
        if self.error.is_some() || self.expression.is_empty() {
            return;
        }

        if est_nombre_signe(&self.expression) {
            if let Some(rest) = self.expression.strip_prefix('-') {
                self.expression = rest.to_string();
            } else {
                self.expression.insert(0, '-');
            }
        } else if let Some(inner) = negation_englobante(&self.expression) {
            self.expression = inner.to_string();
        } else {
            self.expression = format!("-({})", self.expression);
        }
    }

    fn echec(&mut self, kind: ErrorKind) {
        tracing::warn!(%kind, expression = %self.expression, "erreur (mode scientifique)");
        self.expression = MARQUEUR_ERREUR.to_string();
        self.error = Some(kind);
    }
}

/// "12", "-3.5", "0." : nombre nu éventuellement signé.
fn est_nombre_signe(s: &str) -> bool {
    let corps = s.strip_prefix('-').unwrap_or(s);
    let mut points = 0;
    !corps.is_empty()
        && corps.chars().any(|c| c.is_ascii_digit())
        && corps.chars().all(|c| {
            if c == '.' {
                points += 1;
                points == 1
            } else {
                c.is_ascii_digit()
            }
        })
}

/// `-(X)` dont la ')' finale ferme bien la '(' d’ouverture : retourne X.
fn negation_englobante(s: &str) -> Option<&str> {
    let inner = s.strip_prefix("-(")?.strip_suffix(')')?;
    let mut profondeur: i32 = 0;
    for c in inner.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                if profondeur < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (profondeur == 0).then_some(inner)
}

impl CalculatorEngine for ScientificEngine {
    fn apply(&mut self, token: Token) -> RenderModel {
        tracing::debug!(?token, "jeton (mode scientifique)");

        let r = match token {
            Token::Digit(d) if d.is_ascii_digit() => {
                self.push(d.encode_utf8(&mut [0; 4]));
                Ok(())
            }
            Token::Decimal => {
                self.push(".");
                Ok(())
            }
            Token::Operator(op) if op.is_arithmetic() => {
                self.push(op.symbol());
                Ok(())
            }
            Token::Paren(Paren::Open) => {
                self.push("(");
                Ok(())
            }
            Token::Paren(Paren::Close) => {
                self.push(")");
                Ok(())
            }
            Token::Constant(Constant::Pi) => {
                self.push("pi");
                Ok(())
            }
            Token::Constant(Constant::E) => {
                self.push("e");
                Ok(())
            }
            Token::Function(f) => {
                self.function(f);
                Ok(())
            }
            Token::Control(Control::Equals) => self.equals(),
            // CE simplifié : même effet que C
            Token::Control(Control::Clear | Control::ClearEntry) => {
                self.expression.clear();
                self.error = None;
                Ok(())
            }
            Token::Control(Control::Backspace) => {
                if self.error.take().is_some() {
                    self.expression.clear();
                } else {
                    self.expression.pop();
                }
                Ok(())
            }
            Token::Control(Control::Negate) => {
                self.negate();
                Ok(())
            }
            Token::ToggleAngleMode => {
                self.angle_mode = self.angle_mode.toggled();
                Ok(())
            }
            other => {
                tracing::debug!(token = ?other, "jeton ignoré (mode scientifique)");
                Ok(())
            }
        };

        if let Err(kind) = r {
            self.echec(kind);
        }
        self.render()
    }

    fn render(&self) -> RenderModel {
        let secondary = Some(self.angle_mode.label().to_string());
        if let Some(kind) = self.error {
            return RenderModel::erreur(kind, secondary);
        }
        let primary = if self.expression.is_empty() {
            "0".to_string()
        } else {
            self.expression.clone()
        };
        RenderModel::new(primary, secondary)
    }

    fn history(&self) -> &HistoryLog {
        &self.history
    }

    fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }
}
