// src/app/vue.rs
//
// Vue (UI egui), natif + web
// ---------------------------
// - Trois onglets, un moteur chacun (état conservé entre onglets)
// - Afficheur : ligne secondaire (aperçu / panneau) + ligne principale,
//   en couleur d’erreur si le moteur signale une erreur
// - Chaque bouton émet un jeton ; la vue ne calcule rien
// - Programmeur : chiffres hors base désactivés
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use calculatrice_modes::noyau::{
    Base, Constant, Control, Function, Mode, Operator, Paren, Token,
};

use super::etat::AppCalc;

const TAILLE_BOUTON: [f32; 2] = [56.0, 34.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_onglets(ui);
                ui.add_space(6.0);

                self.ui_afficheur(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                match self.session.mode() {
                    Mode::Basic => self.ui_basique(ui),
                    Mode::Scientific => self.ui_scientifique(ui),
                    Mode::Programmer => self.ui_programmeur(ui),
                }
            });
    }

    fn ui_onglets(&mut self, ui: &mut egui::Ui) {
        let mut mode = self.session.mode();
        ui.horizontal(|ui| {
            for m in Mode::TOUS {
                ui.selectable_value(&mut mode, m, m.label());
            }
        });
        if mode != self.session.mode() {
            self.changer_mode(mode);
        }
    }

    fn ui_afficheur(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    if let Some(s) = &self.rendu.secondary_display {
                        ui.label(egui::RichText::new(s).monospace().weak());
                    }

                    let texte = egui::RichText::new(&self.rendu.primary_display)
                        .monospace()
                        .size(28.0);
                    if self.rendu.is_error() {
                        ui.colored_label(ui.visuals().error_fg_color, texte);
                    } else {
                        ui.label(texte);
                    }
                });
            });
    }

    /* ------------------------ Pavés ------------------------ */

    fn ui_basique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_basique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.ligne_controles(ui);
                self.pave_decimal(ui);
            });

        ui.add_space(6.0);
        self.bouton(ui, "Hist", Token::ShowHistory);
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        let angle = self
            .session
            .scientific()
            .map(|e| e.angle_mode().label())
            .unwrap_or("RAD");

        ui.horizontal(|ui| {
            self.bouton(ui, angle, Token::ToggleAngleMode);
            self.bouton(ui, "Hist", Token::ShowHistory);
        });
        ui.add_space(6.0);

        egui::Grid::new("pave_fonctions")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                let lignes: [[(&str, Token); 6]; 3] = [
                    [
                        ("sin", Token::Function(Function::Sin)),
                        ("cos", Token::Function(Function::Cos)),
                        ("tan", Token::Function(Function::Tan)),
                        ("asin", Token::Function(Function::Asin)),
                        ("acos", Token::Function(Function::Acos)),
                        ("atan", Token::Function(Function::Atan)),
                    ],
                    [
                        ("log", Token::Function(Function::Log)),
                        ("ln", Token::Function(Function::Ln)),
                        ("sqrt", Token::Function(Function::Sqrt)),
                        ("cbrt", Token::Function(Function::Cbrt)),
                        ("x^2", Token::Function(Function::Square)),
                        ("x^3", Token::Function(Function::Cube)),
                    ],
                    [
                        ("x^y", Token::Function(Function::Pow)),
                        ("|x|", Token::Function(Function::Abs)),
                        ("n!", Token::Function(Function::Factorial)),
                        ("pi", Token::Constant(Constant::Pi)),
                        ("(", Token::Paren(Paren::Open)),
                        (")", Token::Paren(Paren::Close)),
                    ],
                ];
                for ligne in lignes {
                    for (label, token) in ligne {
                        self.bouton(ui, label, token);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.ligne_controles(ui);
                self.pave_decimal(ui);
                self.bouton(ui, "e", Token::Constant(Constant::E));
                ui.end_row();
            });
    }

    fn ui_programmeur(&mut self, ui: &mut egui::Ui) {
        let (base, valides) = self
            .session
            .programmer()
            .map(|p| (p.display_base(), p.valid_digits()))
            .unwrap_or((Base::Dec, Base::Dec.valid_digits()));

        // sélecteur de base
        ui.horizontal(|ui| {
            for b in Base::PANNEAU {
                if ui.selectable_label(b == base, b.label()).clicked() && b != base {
                    self.envoyer(Token::BaseChange(b));
                }
            }
            ui.separator();
            self.bouton(ui, "Hist", Token::ShowHistory);
        });
        ui.add_space(6.0);

        egui::Grid::new("pave_programmeur")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                let lignes: [[(&str, Token); 5]; 6] = [
                    [
                        ("AND", Token::Operator(Operator::And)),
                        ("OR", Token::Operator(Operator::Or)),
                        ("XOR", Token::Operator(Operator::Xor)),
                        ("NOT", Token::Not),
                        ("MOD", Token::Operator(Operator::Mod)),
                    ],
                    [
                        ("A", Token::Digit('A')),
                        ("B", Token::Digit('B')),
                        ("Lsh", Token::Operator(Operator::Lsh)),
                        ("Rsh", Token::Operator(Operator::Rsh)),
                        ("DEL", Token::Control(Control::Backspace)),
                    ],
                    [
                        ("C", Token::Digit('C')),
                        ("D", Token::Digit('D')),
                        ("CE", Token::Control(Control::ClearEntry)),
                        ("Clr", Token::Control(Control::Clear)),
                        ("/", Token::Operator(Operator::Div)),
                    ],
                    [
                        ("E", Token::Digit('E')),
                        ("7", Token::Digit('7')),
                        ("8", Token::Digit('8')),
                        ("9", Token::Digit('9')),
                        ("*", Token::Operator(Operator::Mul)),
                    ],
                    [
                        ("F", Token::Digit('F')),
                        ("4", Token::Digit('4')),
                        ("5", Token::Digit('5')),
                        ("6", Token::Digit('6')),
                        ("-", Token::Operator(Operator::Sub)),
                    ],
                    [
                        ("+/-", Token::Control(Control::Negate)),
                        ("1", Token::Digit('1')),
                        ("2", Token::Digit('2')),
                        ("3", Token::Digit('3')),
                        ("+", Token::Operator(Operator::Add)),
                    ],
                ];
                for ligne in lignes {
                    for (label, token) in ligne {
                        let actif = match token {
                            Token::Digit(c) => valides.contains(c),
                            _ => true,
                        };
                        self.bouton_actif(ui, label, token, actif);
                    }
                    ui.end_row();
                }

                ui.label("");
                self.bouton(ui, "0", Token::Digit('0'));
                ui.label("");
                ui.label("");
                self.bouton(ui, "=", Token::Control(Control::Equals));
                ui.end_row();
            });
    }

    /// CE, C, DEL, / : première ligne commune Basique + Scientifique.
    fn ligne_controles(&mut self, ui: &mut egui::Ui) {
        self.bouton(ui, "CE", Token::Control(Control::ClearEntry));
        self.bouton(ui, "C", Token::Control(Control::Clear));
        self.bouton(ui, "DEL", Token::Control(Control::Backspace));
        self.bouton(ui, "/", Token::Operator(Operator::Div));
        ui.end_row();
    }

    fn pave_decimal(&mut self, ui: &mut egui::Ui) {
        let lignes: [[(&str, Token); 4]; 4] = [
            [
                ("7", Token::Digit('7')),
                ("8", Token::Digit('8')),
                ("9", Token::Digit('9')),
                ("*", Token::Operator(Operator::Mul)),
            ],
            [
                ("4", Token::Digit('4')),
                ("5", Token::Digit('5')),
                ("6", Token::Digit('6')),
                ("-", Token::Operator(Operator::Sub)),
            ],
            [
                ("1", Token::Digit('1')),
                ("2", Token::Digit('2')),
                ("3", Token::Digit('3')),
                ("+", Token::Operator(Operator::Add)),
            ],
            [
                ("+/-", Token::Control(Control::Negate)),
                ("0", Token::Digit('0')),
                (".", Token::Decimal),
                ("=", Token::Control(Control::Equals)),
            ],
        ];
        for ligne in lignes {
            for (label, token) in ligne {
                self.bouton(ui, label, token);
            }
            ui.end_row();
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, token: Token) {
        self.bouton_actif(ui, label, token, true);
    }

    fn bouton_actif(&mut self, ui: &mut egui::Ui, label: &str, token: Token, actif: bool) {
        let resp = ui.add_enabled(actif, egui::Button::new(label).min_size(TAILLE_BOUTON.into()));
        if resp.clicked() {
            self.envoyer(token);
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Fenêtre d’historique du moteur actif, plus récent en tête.
    pub fn ui_historique(&mut self, ctx: &egui::Context) {
        let mut ouvert = self.session.history_visible();
        if !ouvert {
            return;
        }

        let titre = format!("History ({})", self.session.mode().label());
        let lignes: Vec<String> = self
            .session
            .history()
            .newest_first()
            .map(str::to_string)
            .collect();

        let mut effacer = false;
        let mut fermer = false;

        egui::Window::new(titre)
            .id(egui::Id::new("fenetre_historique"))
            .open(&mut ouvert)
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        if lignes.is_empty() {
                            ui.weak("No history yet.");
                        }
                        for l in &lignes {
                            ui.monospace(l);
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    effacer = ui.button("Clear history").clicked();
                    fermer = ui.button("Close").clicked();
                });
            });

        if effacer {
            self.effacer_historique();
        }
        if fermer || !ouvert {
            self.fermer_historique();
        }
    }
}
