// src/app/clavier.rs
//
// Clavier -> jetons, par mode.
// - texte saisi (Event::Text) : chiffres, opérateurs, lettres de fonctions
// - touches nommées : Enter/Return "=", Backspace, Escape "C"
//
// Aucune logique de calcul : un caractère inconnu donne None.

use eframe::egui;

use calculatrice_modes::noyau::{
    Constant, Control, Function, Mode, Operator, Paren, Token,
};

/// Caractère tapé -> jeton pour le mode actif.
pub fn jeton_texte(mode: Mode, c: char) -> Option<Token> {
    // communs aux trois modes
    match c {
        '0'..='9' => return Some(Token::Digit(c)),
        '+' => return Some(Token::Operator(Operator::Add)),
        '-' => return Some(Token::Operator(Operator::Sub)),
        '*' => return Some(Token::Operator(Operator::Mul)),
        '/' => return Some(Token::Operator(Operator::Div)),
        '=' => return Some(Token::Control(Control::Equals)),
        'h' | 'H' => return Some(Token::ShowHistory),
        _ => {}
    }

    match mode {
        Mode::Basic => match c {
            '.' | ',' => Some(Token::Decimal),
            _ => None,
        },
        Mode::Scientific => match c {
            '.' | ',' => Some(Token::Decimal),
            '(' => Some(Token::Paren(Paren::Open)),
            ')' => Some(Token::Paren(Paren::Close)),
            '^' => Some(Token::Function(Function::Pow)),
            's' => Some(Token::Function(Function::Sin)),
            'c' => Some(Token::Function(Function::Cos)),
            't' => Some(Token::Function(Function::Tan)),
            'l' => Some(Token::Function(Function::Log)),
            'n' => Some(Token::Function(Function::Ln)),
            'p' => Some(Token::Constant(Constant::Pi)),
            'e' => Some(Token::Constant(Constant::E)),
            _ => None,
        },
        // 'c' est le chiffre hexadécimal C, jamais "effacer"
        Mode::Programmer => match c {
            'a'..='f' | 'A'..='F' => Token::digit(c),
            '&' => Some(Token::Operator(Operator::And)),
            '|' => Some(Token::Operator(Operator::Or)),
            '^' => Some(Token::Operator(Operator::Xor)),
            '<' => Some(Token::Operator(Operator::Lsh)),
            '>' => Some(Token::Operator(Operator::Rsh)),
            'm' | 'M' | '%' => Some(Token::Operator(Operator::Mod)),
            '~' => Some(Token::Not),
            _ => None,
        },
    }
}

/// Touche nommée (pressée) -> jeton.
pub fn jeton_touche(key: egui::Key) -> Option<Token> {
    match key {
        egui::Key::Enter => Some(Token::Control(Control::Equals)),
        egui::Key::Backspace => Some(Token::Control(Control::Backspace)),
        egui::Key::Escape => Some(Token::Control(Control::Clear)),
        egui::Key::Delete => Some(Token::Control(Control::ClearEntry)),
        _ => None,
    }
}

/// Jetons de la frame courante, dans l’ordre des événements.
pub fn jetons_frame(ctx: &egui::Context, mode: Mode) -> Vec<Token> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|ev| match ev {
                egui::Event::Text(t) => {
                    let mut it = t.chars();
                    match (it.next(), it.next()) {
                        (Some(c), None) => jeton_texte(mode, c),
                        _ => None,
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => jeton_touche(*key),
                _ => None,
            })
            .collect()
    })
}
