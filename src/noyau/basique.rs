// src/noyau/basique.rs
//
// Moteur Basique : calcul immédiat à deux registres
// (valeur stockée / opérateur en attente), sans précédence :
// chaque nouvel opérateur force l’évaluation du précédent.

use super::erreur::ErrorKind;
use super::format::format_g10;
use super::historique::HistoryLog;
use super::moteur::CalculatorEngine;
use super::rendu::RenderModel;
use super::touches::{Control, Operator, Token};

#[derive(Clone, Debug, Default)]
pub struct BasicEngine {
    /// Chiffres en cours de frappe ; vide = afficher la valeur stockée.
    current_input: String,
    stored_value: Option<f64>,
    pending_operator: Option<Operator>,
    reset_on_next_digit: bool,

    // aperçu affiché au-dessus du résultat ("12 + ", "12 + 3 =")
    preview: String,
    error: Option<ErrorKind>,
    history: HistoryLog,
}

impl BasicEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn stored_value(&self) -> Option<f64> {
        self.stored_value
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn reset_on_next_digit(&self) -> bool {
        self.reset_on_next_digit
    }

    /* ------------------------ Saisie ------------------------ */

    fn digit(&mut self, d: char) {
        if !d.is_ascii_digit() {
            tracing::debug!(%d, "chiffre ignoré (mode basique)");
            return;
        }
        if self.reset_on_next_digit {
            self.current_input.clear();
            self.reset_on_next_digit = false;
        }
        self.error = None;

        // "0" seul : remplacé (ou "00" ignoré)
        if self.current_input == "0" {
            if d != '0' {
                self.current_input = d.to_string();
            }
        } else {
            self.current_input.push(d);
        }
    }

    fn decimal(&mut self) {
        if self.reset_on_next_digit {
            self.current_input = "0".to_string();
            self.reset_on_next_digit = false;
        }
        self.error = None;

        if self.current_input.is_empty() {
            self.current_input.push('0');
        }
        if !self.current_input.contains('.') {
            self.current_input.push('.');
        }
    }

    fn lire_saisie(&self) -> Result<f64, ErrorKind> {
        self.current_input
            .parse::<f64>()
            .map_err(|_| ErrorKind::InvalidNumericInput)
    }

    /* ------------------------ Opérateurs ------------------------ */

    fn operator(&mut self, op: Operator) -> Result<(), ErrorKind> {
        if !op.is_arithmetic() {
            tracing::debug!(%op, "opérateur ignoré (mode basique)");
            return Ok(());
        }

        if !self.current_input.is_empty() {
            let val = self.lire_saisie()?;
            match (self.stored_value, self.pending_operator) {
                (Some(lhs), Some(pending)) => {
                    let r = perform(pending, lhs, val).map_err(|k| {
                        self.preview.clear();
                        k
                    })?;
                    self.history.append(format!(
                        "{} {pending} {} = {}",
                        format_g10(lhs),
                        format_g10(val),
                        format_g10(r)
                    ));
                    self.stored_value = Some(r);
                }
                _ => self.stored_value = Some(val),
            }
        } else if self.stored_value.is_none() {
            return Ok(());
        }

        // substitution d’opérateur si aucune saisie
        self.pending_operator = Some(op);
        if let Some(v) = self.stored_value {
            self.preview = format!("{} {op} ", format_g10(v));
        }
        self.current_input.clear();
        self.reset_on_next_digit = false;
        Ok(())
    }

    fn equals(&mut self) -> Result<(), ErrorKind> {
        match (self.stored_value, self.pending_operator) {
            (Some(lhs), Some(op)) if !self.current_input.is_empty() => {
                let rhs = self.lire_saisie()?;
                let expr = format!("{} {op} {}", format_g10(lhs), format_g10(rhs));
                self.preview = format!("{expr} =");
                let r = perform(op, lhs, rhs)?;

                self.history.append(format!("{expr} = {}", format_g10(r)));
                self.current_input = format_g10(r);
                self.stored_value = Some(r);
                self.pending_operator = None;
                self.reset_on_next_digit = true;
            }
            (_, None) if !self.current_input.is_empty() => {
                // "=" sans opération : la saisie est seulement reformatée
                let v = self.lire_saisie()?;
                self.current_input = format_g10(v);
                self.reset_on_next_digit = true;
            }
            _ => {}
        }
        Ok(())
    }

    /* ------------------------ Contrôles ------------------------ */

    fn clear(&mut self) {
        self.current_input.clear();
        self.stored_value = None;
        self.pending_operator = None;
        self.reset_on_next_digit = false;
        self.preview.clear();
        self.error = None;
    }

    fn clear_entry(&mut self) {
        // état terminal après "=" sans opération en attente : vaut C
        if self.reset_on_next_digit && self.pending_operator.is_none() {
            self.clear();
        } else {
            self.current_input.clear();
            self.reset_on_next_digit = false;
            self.error = None;
        }
    }

    fn backspace(&mut self) {
        if self.reset_on_next_digit {
            // remise à zéro complète : le résultat est jeté, pas édité
            self.clear();
        } else {
            self.current_input.pop();
        }
    }

    fn negate(&mut self) {
        if self.current_input.is_empty() || self.current_input == "0" {
            return;
        }
        if let Some(rest) = self.current_input.strip_prefix('-') {
            self.current_input = rest.to_string();
        } else {
            self.current_input.insert(0, '-');
        }
    }

    /// Erreur récupérée localement : registres vidés, saisie suivante neuve.
    fn echec(&mut self, kind: ErrorKind) {
        tracing::warn!(%kind, "erreur (mode basique)");
        self.current_input.clear();
        self.stored_value = None;
        self.pending_operator = None;
        self.reset_on_next_digit = true;
        self.error = Some(kind);
    }
}

/// Opération binaire pure.
pub fn perform(op: Operator, a: f64, b: f64) -> Result<f64, ErrorKind> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div if b == 0.0 => Err(ErrorKind::DivisionByZero),
        Operator::Div => Ok(a / b),
        _ => Err(ErrorKind::EvaluationError),
    }
}

impl CalculatorEngine for BasicEngine {
    fn apply(&mut self, token: Token) -> RenderModel {
        tracing::debug!(?token, "jeton (mode basique)");

        let r = match token {
            Token::Digit(d) => {
                self.digit(d);
                Ok(())
            }
            Token::Decimal => {
                self.decimal();
                Ok(())
            }
            Token::Operator(op) => self.operator(op),
            Token::Control(Control::Equals) => self.equals(),
            Token::Control(Control::Clear) => {
                self.clear();
                Ok(())
            }
            Token::Control(Control::ClearEntry) => {
                self.clear_entry();
                Ok(())
            }
            Token::Control(Control::Backspace) => {
                self.backspace();
                Ok(())
            }
            Token::Control(Control::Negate) => {
                self.negate();
                Ok(())
            }
            other => {
                tracing::debug!(token = ?other, "jeton ignoré (mode basique)");
                Ok(())
            }
        };

        if let Err(kind) = r {
            self.echec(kind);
        }
        self.render()
    }

    fn render(&self) -> RenderModel {
        let secondary = (!self.preview.is_empty()).then(|| self.preview.clone());

        if let Some(kind) = self.error {
            return RenderModel::erreur(kind, secondary);
        }

        let primary = if !self.current_input.is_empty() {
            self.current_input.clone()
        } else if let Some(v) = self.stored_value {
            format_g10(v)
        } else {
            "0".to_string()
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
