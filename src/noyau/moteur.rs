// src/noyau/moteur.rs
//
// Contrat commun des trois moteurs + session multi-modes.
//
// Chaque moteur possède son état et son historique ; la session ne fait
// qu’aiguiller les jetons vers le moteur actif. Changer de mode ne
// transfère rien d’un moteur à l’autre.

use super::basique::BasicEngine;
use super::historique::HistoryLog;
use super::programmeur::ProgrammerEngine;
use super::rendu::RenderModel;
use super::scientifique::{AngleMode, ScientificEngine};
use super::touches::{Base, Token};

/// Machine à états pilotée par jetons.
///
/// `apply` ne panique jamais : toute erreur de calcul devient un
/// `RenderModel` en erreur, et le moteur reste utilisable.
pub trait CalculatorEngine {
    fn apply(&mut self, token: Token) -> RenderModel;
    fn render(&self) -> RenderModel;
    fn history(&self) -> &HistoryLog;
    fn history_mut(&mut self) -> &mut HistoryLog;

    fn clear_history(&mut self) {
        self.history_mut().clear();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
    Programmer,
}

impl Mode {
    pub const TOUS: [Mode; 3] = [Mode::Basic, Mode::Scientific, Mode::Programmer];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Basic => "Basic",
            Mode::Scientific => "Scientific",
            Mode::Programmer => "Programmer",
        }
    }
}

/// Un moteur, quel que soit son mode.
#[derive(Clone, Debug)]
pub enum Engine {
    Basic(BasicEngine),
    Scientific(ScientificEngine),
    Programmer(ProgrammerEngine),
}

impl Engine {
    pub fn mode(&self) -> Mode {
        match self {
            Engine::Basic(_) => Mode::Basic,
            Engine::Scientific(_) => Mode::Scientific,
            Engine::Programmer(_) => Mode::Programmer,
        }
    }

    fn inner(&self) -> &dyn CalculatorEngine {
        match self {
            Engine::Basic(e) => e,
            Engine::Scientific(e) => e,
            Engine::Programmer(e) => e,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn CalculatorEngine {
        match self {
            Engine::Basic(e) => e,
            Engine::Scientific(e) => e,
            Engine::Programmer(e) => e,
        }
    }
}

impl CalculatorEngine for Engine {
    fn apply(&mut self, token: Token) -> RenderModel {
        self.inner_mut().apply(token)
    }

    fn render(&self) -> RenderModel {
        self.inner().render()
    }

    fn history(&self) -> &HistoryLog {
        self.inner().history()
    }

    fn history_mut(&mut self) -> &mut HistoryLog {
        self.inner_mut().history_mut()
    }
}

/// Moteurs indépendants, un par mode (indexés dans l’ordre de `Mode::TOUS`).
#[derive(Clone, Debug)]
pub struct Session {
    engines: [Engine; 3],
    active: Mode,
    history_visible: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(Mode::Basic, AngleMode::Radians, Base::Dec)
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session préconfigurée (mode de départ, angle, base).
    pub fn with_config(mode: Mode, angle: AngleMode, base: Base) -> Self {
        Self {
            engines: [
                Engine::Basic(BasicEngine::new()),
                Engine::Scientific(ScientificEngine::with_angle_mode(angle)),
                Engine::Programmer(ProgrammerEngine::with_base(base)),
            ],
            active: mode,
            history_visible: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.active
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.active {
            tracing::debug!(de = self.active.label(), vers = mode.label(), "changement de mode");
        }
        self.active = mode;
    }

    fn index(mode: Mode) -> usize {
        match mode {
            Mode::Basic => 0,
            Mode::Scientific => 1,
            Mode::Programmer => 2,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engines[Self::index(self.active)]
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engines[Self::index(self.active)]
    }

    pub fn scientific(&self) -> Option<&ScientificEngine> {
        match &self.engines[Self::index(Mode::Scientific)] {
            Engine::Scientific(e) => Some(e),
            _ => None,
        }
    }

    pub fn programmer(&self) -> Option<&ProgrammerEngine> {
        match &self.engines[Self::index(Mode::Programmer)] {
            Engine::Programmer(e) => Some(e),
            _ => None,
        }
    }

    /// Jeton vers le moteur actif. `ShowHistory` est intercepté ici.
    pub fn apply(&mut self, token: Token) -> RenderModel {
        if token == Token::ShowHistory {
            self.history_visible = true;
            return self.render();
        }
        self.engine_mut().apply(token)
    }

    pub fn render(&self) -> RenderModel {
        self.engine().render()
    }

    pub fn history(&self) -> &HistoryLog {
        self.engine().history()
    }

    pub fn clear_history(&mut self) {
        self.engine_mut().clear_history();
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn set_history_visible(&mut self, visible: bool) {
        self.history_visible = visible;
    }
}
