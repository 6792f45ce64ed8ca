// src/noyau/programmeur.rs
//
// Moteur Programmeur : accumulateur entier signé 64 bits, présenté dans
// une des quatre bases (DEC/HEX/OCT/BIN).
//
// Contrats :
// - `input_digits` ne contient que des chiffres valides pour `display_base`
//   (plus un '-' de tête en décimal) ;
// - changer de base re-rend `input_digits` depuis l’accumulateur, jamais
//   l’inverse ;
// - le panneau de conversion est une projection pure de l’accumulateur.

use super::erreur::ErrorKind;
use super::format::{format_radix, parse_radix};
use super::historique::HistoryLog;
use super::moteur::CalculatorEngine;
use super::rendu::RenderModel;
use super::touches::{Base, Control, Operator, Token};

#[derive(Clone, Debug)]
pub struct ProgrammerEngine {
    accumulator: i64,
    input_digits: String,
    display_base: Base,
    stored_value: Option<i64>,
    pending_operator: Option<Operator>,
    error: Option<ErrorKind>,
    history: HistoryLog,
}

impl Default for ProgrammerEngine {
    fn default() -> Self {
        Self::with_base(Base::Dec)
    }
}

impl ProgrammerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(display_base: Base) -> Self {
        Self {
            accumulator: 0,
            input_digits: "0".to_string(),
            display_base,
            stored_value: None,
            pending_operator: None,
            error: None,
            history: HistoryLog::new(),
        }
    }

    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    pub fn input_digits(&self) -> &str {
        &self.input_digits
    }

    pub fn display_base(&self) -> Base {
        self.display_base
    }

    pub fn stored_value(&self) -> Option<i64> {
        self.stored_value
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Chiffres dont les touches doivent rester actives.
    pub fn valid_digits(&self) -> &'static str {
        self.display_base.valid_digits()
    }

    pub fn accepts_digit(&self, c: char) -> bool {
        self.display_base.accepts(c)
    }

    /// Panneau de conversion : l’accumulateur dans les quatre bases,
    /// indépendamment de la base d’édition.
    pub fn conversions(&self) -> [(Base, String); 4] {
        conversions(self.accumulator)
    }

    /* ------------------------ Saisie ------------------------ */

    fn digit(&mut self, c: char) -> Result<(), ErrorKind> {
        let c = c.to_ascii_uppercase();
        if !self.accepts_digit(c) {
            tracing::debug!(%c, base = %self.display_base, "chiffre refusé");
            return Ok(());
        }
        if self.error.take().is_some() {
            self.input_digits = "0".to_string();
        }

        let mut candidat = self.input_digits.clone();
        if candidat == "0" {
            if c == '0' {
                return Ok(());
            }
            candidat.clear();
        }
        candidat.push(c);

        // chiffre qui ferait déborder 64 bits : refusé, la saisie reste intacte
        match parse_radix(&candidat, self.display_base) {
            Ok(v) => {
                self.input_digits = candidat;
                self.accumulator = v;
            }
            Err(_) => tracing::debug!(%candidat, "saisie hors 64 bits refusée"),
        }
        Ok(())
    }

    /// Opérande courant : la saisie, lue comme 0 tant que rien n’est tapé
    /// (l’accumulateur porte alors la valeur stockée, pas un opérande).
    fn operande(&self) -> Result<i64, ErrorKind> {
        if self.input_digits.is_empty() {
            Ok(0)
        } else {
            parse_radix(&self.input_digits, self.display_base)
        }
    }

    fn rerender(&mut self) {
        self.input_digits = format_radix(self.accumulator, self.display_base);
    }

    /* ------------------------ Opérateurs ------------------------ */

    fn operator(&mut self, op: Operator) -> Result<(), ErrorKind> {
        if self.input_digits.is_empty() {
            // substitution d’opérateur si aucun second opérande
            if self.stored_value.is_some() {
                self.pending_operator = Some(op);
            }
            return Ok(());
        }

        let val = self.operande()?;
        match (self.stored_value, self.pending_operator) {
            (Some(lhs), Some(pending)) => {
                let r = perform(pending, lhs, val)?;
                self.history
                    .append(format!("{lhs} {pending} {val} = {r} (DEC)"));
                self.stored_value = Some(r);
                self.accumulator = r;
            }
            _ => {
                self.stored_value = Some(val);
                self.accumulator = val;
            }
        }
        self.pending_operator = Some(op);
        self.input_digits.clear();
        Ok(())
    }

    fn equals(&mut self) -> Result<(), ErrorKind> {
        let (Some(lhs), Some(op)) = (self.stored_value, self.pending_operator) else {
            return Ok(());
        };

        let rhs = self.operande()?;
        let r = perform(op, lhs, rhs)?;
        self.history.append(format!("{lhs} {op} {rhs} = {r} (DEC)"));

        self.accumulator = r;
        self.rerender();
        self.stored_value = None;
        self.pending_operator = None;
        Ok(())
    }

    /// NOT : immédiat, enregistré, affichage forcé en décimal.
    fn not(&mut self) -> Result<(), ErrorKind> {
        let v = self.operande()?;
        let texte = if self.input_digits.is_empty() {
            "0".to_string()
        } else {
            self.input_digits.clone()
        };
        let r = !v;
        self.history.append(format!("NOT {texte} = {r} (DEC)"));

        self.accumulator = r;
        self.display_base = Base::Dec;
        self.rerender();
        Ok(())
    }

    fn negate(&mut self) -> Result<(), ErrorKind> {
        self.accumulator = self.operande()?.wrapping_neg();
        // le signe ne se lit qu’en décimal
        self.display_base = Base::Dec;
        self.rerender();
        Ok(())
    }

    fn change_base(&mut self, base: Base) {
        self.display_base = base;
        self.error = None;
        // en attente du second opérande : rien à re-rendre
        if !self.input_digits.is_empty() {
            self.rerender();
        }
    }

    /* ------------------------ Contrôles ------------------------ */

    fn clear(&mut self) {
        self.accumulator = 0;
        self.input_digits = "0".to_string();
        self.stored_value = None;
        self.pending_operator = None;
        self.error = None;
    }

    fn clear_entry(&mut self) {
        self.accumulator = 0;
        self.input_digits = "0".to_string();
        self.error = None;
    }

    fn backspace(&mut self) -> Result<(), ErrorKind> {
        if self.error.take().is_some() {
            self.clear_entry();
            return Ok(());
        }
        if self.input_digits.is_empty() {
            return Ok(());
        }

        self.input_digits.pop();
        if self.input_digits.is_empty() || self.input_digits == "-" {
            self.input_digits = "0".to_string();
        }
        self.accumulator = parse_radix(&self.input_digits, self.display_base)?;
        Ok(())
    }

    fn echec(&mut self, kind: ErrorKind) {
        tracing::warn!(%kind, "erreur (mode programmeur)");
        self.accumulator = 0;
        self.input_digits.clear();
        self.stored_value = None;
        self.pending_operator = None;
        self.error = Some(kind);
    }

    fn apercu(&self) -> Option<String> {
        let (lhs, op) = (self.stored_value?, self.pending_operator?);
        Some(format!("{} {op}", format_radix(lhs, self.display_base)))
    }
}

/// Projection pure : valeur -> texte dans chaque base (ordre HEX, DEC, OCT, BIN).
pub fn conversions(v: i64) -> [(Base, String); 4] {
    Base::PANNEAU.map(|b| (b, format_radix(v, b)))
}

/// Opération binaire entière, pure, totale hors diviseur nul.
///
/// - `/` : division entière arrondie vers -∞
/// - `MOD` : reste du signe du diviseur
/// - `+ - *` : arithmétique modulaire 64 bits
/// - décalages : un compte négatif décale dans l’autre sens ; au-delà de
///   63 bits, `Lsh` donne 0 et `Rsh` l’extension du signe
pub fn perform(op: Operator, a: i64, b: i64) -> Result<i64, ErrorKind> {
    Ok(match op {
        Operator::And => a & b,
        Operator::Or => a | b,
        Operator::Xor => a ^ b,
        Operator::Add => a.wrapping_add(b),
        Operator::Sub => a.wrapping_sub(b),
        Operator::Mul => a.wrapping_mul(b),
        Operator::Div => {
            if b == 0 {
                return Err(ErrorKind::DivisionByZero);
            }
            div_floor(a, b)
        }
        Operator::Mod => {
            if b == 0 {
                return Err(ErrorKind::ModuloByZero);
            }
            mod_floor(a, b)
        }
        Operator::Lsh => decale(a, b),
        Operator::Rsh => decale(a, b.saturating_neg()),
    })
}

fn div_floor(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn mod_floor(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        r + b
    } else {
        r
    }
}

/// Décalage signé : n > 0 vers la gauche, n < 0 vers la droite (arithmétique).
fn decale(a: i64, n: i64) -> i64 {
    if n >= 0 {
        if n >= 64 {
            0
        } else {
            a << n
        }
    } else {
        let n = n.unsigned_abs();
        if n >= 64 {
            a >> 63
        } else {
            a >> n
        }
    }
}

impl CalculatorEngine for ProgrammerEngine {
    fn apply(&mut self, token: Token) -> RenderModel {
        tracing::debug!(?token, "jeton (mode programmeur)");

        // après une erreur : chiffre, effacement ou base avant tout calcul
        if self.error.is_some()
            && matches!(
                token,
                Token::Operator(_)
                    | Token::Not
                    | Token::Control(Control::Equals | Control::Negate)
            )
        {
            tracing::debug!(?token, "jeton ignoré (erreur en cours)");
            return self.render();
        }

        let r = match token {
            Token::Digit(c) => self.digit(c),
            Token::Operator(op) => self.operator(op),
            Token::Not => self.not(),
            Token::Control(Control::Equals) => self.equals(),
            Token::Control(Control::Clear) => {
                self.clear();
                Ok(())
            }
            Token::Control(Control::ClearEntry) => {
                self.clear_entry();
                Ok(())
            }
            Token::Control(Control::Backspace) => self.backspace(),
            Token::Control(Control::Negate) => self.negate(),
            Token::BaseChange(b) => {
                self.change_base(b);
                Ok(())
            }
            other => {
                tracing::debug!(token = ?other, "jeton ignoré (mode programmeur)");
                Ok(())
            }
        };

        if let Err(kind) = r {
            self.echec(kind);
        }
        self.render()
    }

    fn render(&self) -> RenderModel {
        let panneau = self
            .conversions()
            .iter()
            .map(|(b, t)| format!("{b}: {t}"))
            .collect::<Vec<_>>()
            .join("\n");
        let secondary = match self.apercu() {
            Some(a) => format!("{a}\n{panneau}"),
            None => panneau,
        };

        if let Some(kind) = self.error {
            return RenderModel::erreur(kind, Some(secondary));
        }

        // saisie vide pendant une opération : on montre la valeur stockée
        let primary = match (self.input_digits.is_empty(), self.stored_value) {
            (false, _) => self.input_digits.clone(),
            (true, Some(v)) => format_radix(v, self.display_base),
            (true, None) => "0".to_string(),
        };
        RenderModel::new(primary, Some(secondary))
    }

    fn history(&self) -> &HistoryLog {
        &self.history
    }

    fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }
}
