// src/config.rs
//
// Configuration de lancement (natif) : ligne de commande + journalisation.
//
//   calculatrice_modes --mode programmer --base hex --log debug
//
// RUST_LOG, s’il est défini, l’emporte sur --log.

use clap::{Parser, ValueEnum};

use calculatrice_modes::noyau::{AngleMode, Base, Mode, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Basic,
    Scientific,
    Programmer,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Basic => Mode::Basic,
            ModeArg::Scientific => Mode::Scientific,
            ModeArg::Programmer => Mode::Programmer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BaseArg {
    Dec,
    Hex,
    Oct,
    Bin,
}

impl From<BaseArg> for Base {
    fn from(b: BaseArg) -> Self {
        match b {
            BaseArg::Dec => Base::Dec,
            BaseArg::Hex => Base::Hex,
            BaseArg::Oct => Base::Oct,
            BaseArg::Bin => Base::Bin,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "calculatrice_modes", version, about = "Calculatrice trois modes")]
pub struct Options {
    /// Onglet ouvert au démarrage.
    #[arg(long, value_enum, default_value_t = ModeArg::Basic)]
    pub mode: ModeArg,

    /// Mode Scientifique en degrés (radians sinon).
    #[arg(long)]
    pub degres: bool,

    /// Base d’édition du mode Programmeur.
    #[arg(long, value_enum, default_value_t = BaseArg::Dec)]
    pub base: BaseArg,

    /// Filtre de journalisation (syntaxe EnvFilter).
    #[arg(long, default_value = "warn")]
    pub log: String,
}

impl Options {
    pub fn session(&self) -> Session {
        let angle = if self.degres {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        };
        Session::with_config(self.mode.into(), angle, self.base.into())
    }
}

/// Abonné tracing : sortie formatée, filtre RUST_LOG sinon `--log`.
pub fn init_tracing(opts: &Options) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&opts.log))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}
