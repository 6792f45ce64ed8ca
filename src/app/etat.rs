//! src/app/etat.rs
//!
//! État UI : une session (trois moteurs) + le dernier rendu affiché.
//!
//! Contrats :
//! - Aucun calcul ici : tout passe par `Session::apply`.
//! - Le rendu affiché est toujours celui du moteur actif.

use calculatrice_modes::noyau::{Mode, RenderModel, Session, Token};

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,

    // --- sortie du moteur actif ---
    pub rendu: RenderModel,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl AppCalc {
    pub fn new(session: Session) -> Self {
        let rendu = session.render();
        Self { session, rendu }
    }

    /// Un bouton ou une touche : jeton vers le moteur actif.
    pub fn envoyer(&mut self, token: Token) {
        self.rendu = self.session.apply(token);
    }

    /// Changement d’onglet : on affiche l’état propre du nouveau moteur.
    pub fn changer_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
        self.rendu = self.session.render();
    }

    pub fn effacer_historique(&mut self) {
        self.session.clear_history();
    }

    pub fn fermer_historique(&mut self) {
        self.session.set_history_visible(false);
    }
}
