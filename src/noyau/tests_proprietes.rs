//! Tests de propriétés (campagne) : les contrats des trois moteurs,
//! vérifiés sur des entrées générées par proptest.
//!
//! Les cas concrets (chaînage "1 + 2", "5 / 0" puis "7", HEX FF -> BIN…)
//! sont en tête ; les propriétés générales suivent.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::basique::BasicEngine;
use super::erreur::ErrorKind;
use super::format::{format_g10, format_radix, parse_radix};
use super::moteur::CalculatorEngine;
use super::programmeur::{perform, ProgrammerEngine};
use super::rendu::RenderModel;
use super::scientifique::{AngleMode, ScientificEngine};
use super::touches::{Base, Constant, Control, Function, Operator, Paren, Token};

/* ------------------------ Helpers ------------------------ */

fn tape<E: CalculatorEngine>(e: &mut E, jetons: &[Token]) -> RenderModel {
    let mut r = e.render();
    for t in jetons {
        r = e.apply(*t);
    }
    r
}

fn chiffres(s: &str) -> Vec<Token> {
    s.chars().filter_map(Token::digit).collect()
}

const EGAL: Token = Token::Control(Control::Equals);
const EFFACE: Token = Token::Control(Control::Clear);

fn op(o: Operator) -> Token {
    Token::Operator(o)
}

fn proche(r: &RenderModel, attendu: f64) {
    let v: f64 = r
        .primary_display
        .parse()
        .unwrap_or_else(|e| panic!("affichage non numérique {:?}: {e}", r.primary_display));
    if (v - attendu).abs() > 1e-9 {
        panic!("{} != {attendu}", r.primary_display);
    }
}

/* ------------------------ Cas de référence ------------------------ */

#[test]
fn basique_chainage_1_plus_2_plus_3() {
    let mut e = BasicEngine::new();
    let r = tape(
        &mut e,
        &[
            Token::Digit('1'),
            op(Operator::Add),
            Token::Digit('2'),
            op(Operator::Add),
            Token::Digit('3'),
            EGAL,
        ],
    );
    assert_eq!(r.primary_display, "6");
    assert_eq!(e.history().all(), &["1 + 2 = 3", "3 + 3 = 6"]);
}

#[test]
fn basique_division_par_zero_puis_7() {
    let mut e = BasicEngine::new();
    let r = tape(
        &mut e,
        &[Token::Digit('5'), op(Operator::Div), Token::Digit('0'), EGAL],
    );
    assert_eq!(r.error, Some(ErrorKind::DivisionByZero));
    assert_eq!(r.primary_display, "Error: Div by 0");

    let r = e.apply(Token::Digit('7'));
    assert_eq!(r.primary_display, "7");
    assert_eq!(r.error, None);
}

#[test]
fn scientifique_sin_pi_sur_2() {
    let mut e = ScientificEngine::new();
    let r = tape(
        &mut e,
        &[
            Token::Function(Function::Sin),
            Token::Constant(Constant::Pi),
            op(Operator::Div),
            Token::Digit('2'),
            Token::Paren(Paren::Close),
            EGAL,
        ],
    );
    proche(&r, 1.0);
}

#[test]
fn scientifique_sin_90_en_degres() {
    let mut e = ScientificEngine::with_angle_mode(AngleMode::Degrees);
    let mut j = vec![Token::Function(Function::Sin)];
    j.extend(chiffres("90"));
    j.push(EGAL);
    let r = tape(&mut e, &j);
    proche(&r, 1.0);
    assert_eq!(e.angle_mode(), AngleMode::Degrees);
}

#[test]
fn programmeur_ff_and_0f() {
    let mut e = ProgrammerEngine::with_base(Base::Hex);
    tape(&mut e, &chiffres("FF"));
    let r = e.apply(Token::BaseChange(Base::Bin));
    assert_eq!(r.primary_display, "11111111");

    let mut j = vec![op(Operator::And), Token::BaseChange(Base::Hex)];
    j.extend(chiffres("0F"));
    j.push(EGAL);
    j.push(Token::BaseChange(Base::Bin));
    let r = tape(&mut e, &j);
    assert_eq!(e.accumulator(), 15);
    assert_eq!(r.primary_display, "1111");
}

#[test]
fn programmeur_7_mod_0() {
    let mut e = ProgrammerEngine::new();
    let mut j = chiffres("7");
    j.push(op(Operator::Mod));
    j.extend(chiffres("0"));
    j.push(EGAL);
    let r = tape(&mut e, &j);
    assert_eq!(r.error, Some(ErrorKind::ModuloByZero));
    assert_eq!(e.accumulator(), 0);
}

/* ------------------------ Stratégies ------------------------ */

fn digits_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{1,12}").expect("regex valide")
}

fn token_strategy() -> impl Strategy<Value = Token> {
    prop_oneof![
        4 => prop::sample::select("0123456789ABCDEF".chars().collect::<Vec<_>>())
            .prop_map(Token::Digit),
        1 => Just(Token::Decimal),
        2 => prop::sample::select(vec![
            Operator::Add,
            Operator::Sub,
            Operator::Mul,
            Operator::Div,
            Operator::And,
            Operator::Or,
            Operator::Xor,
            Operator::Mod,
            Operator::Lsh,
            Operator::Rsh,
        ])
        .prop_map(Token::Operator),
        1 => prop::sample::select(vec![
            Function::Sin,
            Function::Sqrt,
            Function::Log,
            Function::Square,
            Function::Cbrt,
        ])
        .prop_map(Token::Function),
        2 => prop::sample::select(vec![
            Control::ClearEntry,
            Control::Backspace,
            Control::Negate,
            Control::Equals,
        ])
        .prop_map(Token::Control),
        1 => prop::sample::select(Base::PANNEAU.to_vec()).prop_map(Token::BaseChange),
        1 => prop::sample::select(vec![
            Token::Paren(Paren::Open),
            Token::Paren(Paren::Close),
            Token::Constant(Constant::Pi),
            Token::Not,
            Token::ToggleAngleMode,
        ]),
    ]
}

/* ------------------------ Propriétés ------------------------ */

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// "=" sans opération : la saisie, reformatée à 10 chiffres significatifs.
    #[test]
    fn basique_egal_sans_operation(d in digits_strategy()) {
        let mut e = BasicEngine::new();
        let mut j = chiffres(&d);
        j.push(EGAL);
        let r = tape(&mut e, &j);

        let attendu: f64 = d.parse().expect("chiffres décimaux");
        prop_assert_eq!(r.primary_display, format_g10(attendu));
        prop_assert!(e.history().is_empty());
    }

    #[test]
    fn basique_addition_enregistree(a in 0u32..100_000, b in 0u32..100_000) {
        let mut e = BasicEngine::new();
        let mut j = chiffres(&a.to_string());
        j.push(op(Operator::Add));
        j.extend(chiffres(&b.to_string()));
        j.push(EGAL);
        let r = tape(&mut e, &j);

        let somme = format_g10(f64::from(a) + f64::from(b));
        prop_assert_eq!(&r.primary_display, &somme);
        prop_assert_eq!(e.history().all(), &[format!("{a} + {b} = {somme}")]);
    }

    /// N calculs terminés -> N enregistrements ; clear -> 0.
    #[test]
    fn historique_compte_les_calculs(n in 0usize..20) {
        let mut e = BasicEngine::new();
        for i in 0..n {
            let mut j = chiffres(&i.to_string());
            j.push(op(Operator::Mul));
            j.push(Token::Digit('2'));
            j.push(EGAL);
            tape(&mut e, &j);
        }
        prop_assert_eq!(e.history().len(), n);
        e.clear_history();
        prop_assert!(e.history().is_empty());
    }

    /// Clear : état neuf (mode d’angle et base conservés), et idempotent.
    #[test]
    fn clear_idempotent(jetons in prop::collection::vec(token_strategy(), 0..40)) {
        let mut b = BasicEngine::new();
        tape(&mut b, &jetons);
        let une = b.apply(EFFACE);
        prop_assert_eq!(&une, &BasicEngine::new().render());
        prop_assert_eq!(b.apply(EFFACE), une);

        let mut s = ScientificEngine::new();
        tape(&mut s, &jetons);
        let une = s.apply(EFFACE);
        prop_assert_eq!(&une, &ScientificEngine::with_angle_mode(s.angle_mode()).render());
        prop_assert_eq!(s.apply(EFFACE), une);

        let mut p = ProgrammerEngine::new();
        tape(&mut p, &jetons);
        let une = p.apply(EFFACE);
        prop_assert_eq!(&une, &ProgrammerEngine::with_base(p.display_base()).render());
        prop_assert_eq!(p.apply(EFFACE), une);
        prop_assert_eq!(p.accumulator(), 0);
    }

    /// Changer de base ne touche que la présentation.
    #[test]
    fn changement_de_base_conserve_l_accumulateur(
        v in 0u64..=u64::from(u32::MAX),
        bases in prop::collection::vec(prop::sample::select(Base::PANNEAU.to_vec()), 1..6),
    ) {
        let mut e = ProgrammerEngine::new();
        tape(&mut e, &chiffres(&v.to_string()));
        let acc = e.accumulator();
        prop_assert_eq!(acc, v as i64);

        for b in bases {
            let r = e.apply(Token::BaseChange(b));
            prop_assert_eq!(e.accumulator(), acc);
            prop_assert_eq!(r.primary_display, format_radix(acc, b));
        }
    }

    /// Le panneau de conversion relit toujours l’accumulateur.
    #[test]
    fn panneau_coherent(jetons in prop::collection::vec(token_strategy(), 0..40)) {
        let mut e = ProgrammerEngine::new();
        tape(&mut e, &jetons);
        for (b, texte) in e.conversions() {
            prop_assert_eq!(parse_radix(&texte, b), Ok(e.accumulator()));
        }
    }

    /// Division entière et reste : a == b*q + r, r du signe de b.
    #[test]
    fn division_et_modulo_plancher(a in -1_000_000i64..1_000_000, b in -1000i64..1000) {
        prop_assume!(b != 0);
        let q = perform(Operator::Div, a, b).expect("diviseur non nul");
        let r = perform(Operator::Mod, a, b).expect("diviseur non nul");
        prop_assert_eq!(b * q + r, a);
        prop_assert!(r.abs() < b.abs());
        prop_assert!(r == 0 || (r < 0) == (b < 0));
    }

    #[test]
    fn decalages(a in any::<i64>(), n in 0i64..64) {
        prop_assert_eq!(perform(Operator::Lsh, a, n), Ok(a << n));
        prop_assert_eq!(perform(Operator::Rsh, a, n), Ok(a >> n));
        prop_assert_eq!(perform(Operator::Lsh, a, -n), Ok(a >> n));
    }

    /// En degrés, sin/cos/tan reçoivent l’argument converti.
    #[test]
    fn sinus_en_degres(x in 0u32..360) {
        let mut e = ScientificEngine::with_angle_mode(AngleMode::Degrees);
        let mut j = vec![Token::Function(Function::Sin)];
        j.extend(chiffres(&x.to_string()));
        j.push(EGAL);
        let r = tape(&mut e, &j);
        proche(&r, f64::from(x).to_radians().sin());
    }
}
