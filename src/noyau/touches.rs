// src/noyau/touches.rs
//
// Vocabulaire des intentions utilisateur (Token).
// Produit par la couche de présentation (boutons / clavier) ; le noyau ne
// regarde jamais le glyphe affiché, seulement la nature du jeton.

use std::fmt;

/// Unité abstraite d’intention utilisateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Chiffre `0-9` ou `A-F` (majuscule).
    Digit(char),
    /// Point décimal (Basique / Scientifique).
    Decimal,
    Operator(Operator),
    Function(Function),
    Control(Control),
    Constant(Constant),
    Paren(Paren),
    BaseChange(Base),
    /// Complément bit à bit (Programmeur), appliqué immédiatement.
    Not,
    ToggleAngleMode,
    ShowHistory,
}

impl Token {
    /// Raccourci : chiffre décimal ou hexadécimal, normalisé en majuscule.
    /// `None` si le caractère n’est pas un chiffre hexadécimal.
    pub fn digit(c: char) -> Option<Self> {
        c.is_ascii_hexdigit()
            .then(|| Token::Digit(c.to_ascii_uppercase()))
    }
}

/// Opérateurs binaires (l’ensemble admis dépend du moteur).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Mod,
    Lsh,
    Rsh,
}

impl Operator {
    /// Les quatre opérations arithmétiques (Basique, Scientifique).
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Mod => "MOD",
            Self::Lsh => "Lsh",
            Self::Rsh => "Rsh",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Fonctions du mode Scientifique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// Logarithme décimal.
    Log,
    /// Logarithme naturel.
    Ln,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Pow,
    Abs,
    Factorial,
}

impl Function {
    /// sin/cos/tan directs : seuls concernés par l’enveloppe `radians(`.
    pub fn is_direct_trig(self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Clear,
    ClearEntry,
    Backspace,
    Negate,
    Equals,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paren {
    Open,
    Close,
}

/// Base d’affichage du mode Programmeur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Base {
    #[default]
    Dec,
    Hex,
    Oct,
    Bin,
}

impl Base {
    /// Ordre du panneau de conversion.
    pub const PANNEAU: [Base; 4] = [Base::Hex, Base::Dec, Base::Oct, Base::Bin];

    pub fn radix(self) -> u32 {
        match self {
            Self::Dec => 10,
            Self::Hex => 16,
            Self::Oct => 8,
            Self::Bin => 2,
        }
    }

    /// Chiffres admis en saisie dans cette base.
    pub fn valid_digits(self) -> &'static str {
        match self {
            Self::Dec => "0123456789",
            Self::Hex => "0123456789ABCDEF",
            Self::Oct => "01234567",
            Self::Bin => "01",
        }
    }

    pub fn accepts(self, c: char) -> bool {
        self.valid_digits().contains(c.to_ascii_uppercase())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dec => "DEC",
            Self::Hex => "HEX",
            Self::Oct => "OCT",
            Self::Bin => "BIN",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
