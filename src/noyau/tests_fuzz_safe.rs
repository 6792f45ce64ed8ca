//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler les trois moteurs sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - flux de jetons bornés
//! - budget temps global
//! - invariants : jamais de panique, affichage principal jamais vide,
//!   erreur => texte d’erreur à la place du nombre

use std::time::{Duration, Instant};

use super::basique::BasicEngine;
use super::erreur::ErrorKind;
use super::eval_expression;
use super::moteur::{CalculatorEngine, Mode, Session};
use super::programmeur::ProgrammerEngine;
use super::rendu::RenderModel;
use super::scientifique::ScientificEngine;
use super::touches::{Base, Constant, Control, Function, Operator, Paren, Token};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de jetons ------------------------ */

const OPERATEURS: [Operator; 10] = [
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
];

const FONCTIONS: [Function; 15] = [
    Function::Sin,
    Function::Cos,
    Function::Tan,
    Function::Asin,
    Function::Acos,
    Function::Atan,
    Function::Log,
    Function::Ln,
    Function::Sqrt,
    Function::Cbrt,
    Function::Square,
    Function::Cube,
    Function::Pow,
    Function::Abs,
    Function::Factorial,
];

const CONTROLES: [Control; 5] = [
    Control::Clear,
    Control::ClearEntry,
    Control::Backspace,
    Control::Negate,
    Control::Equals,
];

const CHIFFRES: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// N’importe quel jeton, y compris ceux qu’un moteur doit ignorer.
fn gen_token(rng: &mut Rng) -> Token {
    match rng.pick(12) {
        0..=3 => Token::Digit(rng.choose(CHIFFRES)),
        4 => Token::Decimal,
        5 => Token::Operator(rng.choose(&OPERATEURS)),
        6 => Token::Function(rng.choose(&FONCTIONS)),
        7 => Token::Control(rng.choose(&CONTROLES)),
        8 => Token::Constant(rng.choose(&[Constant::Pi, Constant::E])),
        9 => Token::Paren(rng.choose(&[Paren::Open, Paren::Close])),
        10 => Token::BaseChange(rng.choose(&Base::PANNEAU)),
        _ => rng.choose(&[Token::Not, Token::ToggleAngleMode, Token::ShowHistory]),
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_rendu(r: &RenderModel, contexte: &str) {
    assert!(
        !r.primary_display.is_empty(),
        "affichage principal vide ({contexte})"
    );
    if let Some(kind) = r.error {
        assert_eq!(
            r.primary_display,
            kind.to_string(),
            "erreur sans son texte ({contexte})"
        );
    }
}

fn check_programmeur(e: &ProgrammerEngine) {
    let saisie = e.input_digits();
    let corps = saisie.strip_prefix('-').unwrap_or(saisie);
    if saisie.starts_with('-') {
        assert_eq!(e.display_base(), Base::Dec, "signe hors DEC: {saisie:?}");
    }
    assert!(
        corps.chars().all(|c| e.accepts_digit(c)),
        "chiffre invalide pour {}: {saisie:?}",
        e.display_base()
    );
}

fn flux<E: CalculatorEngine>(e: &mut E, rng: &mut Rng, n: usize, contexte: &str) {
    for _ in 0..n {
        let t = gen_token(rng);
        let r = e.apply(t);
        check_rendu(&r, &format!("{contexte} après {t:?}"));
        assert_eq!(r, e.render(), "render() diverge de apply() ({contexte})");
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_basique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..200 {
        budget(t0, max);
        let mut e = BasicEngine::new();
        flux(&mut e, &mut rng, 40, "basique");
    }
}

#[test]
fn fuzz_safe_scientifique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut vu_ok = 0usize;
    let mut vu_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);
        let mut e = ScientificEngine::new();
        flux(&mut e, &mut rng, 30, "scientifique");

        // on force une évaluation pour balayer les deux issues
        let r = e.apply(Token::Control(Control::Equals));
        check_rendu(&r, "scientifique, = final");
        match r.error {
            Some(_) => vu_err += 1,
            None => vu_ok += 1,
        }
    }

    assert!(vu_ok > 0, "aucune évaluation réussie");
    assert!(vu_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_programmeur() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..200 {
        budget(t0, max);
        let mut e = ProgrammerEngine::new();
        for _ in 0..40 {
            let t = gen_token(&mut rng);
            let r = e.apply(t);
            check_rendu(&r, &format!("programmeur après {t:?}"));
            check_programmeur(&e);
            if r.error.is_some() {
                assert_eq!(e.accumulator(), 0, "accumulateur non remis à zéro");
            }
        }
    }
}

#[test]
fn fuzz_safe_session_changements_de_mode() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xFEED_u64);
    let mut s = Session::new();

    for _ in 0..2000 {
        budget(t0, max);
        if rng.pick(10) == 0 {
            s.set_mode(rng.choose(&Mode::TOUS));
        }
        let t = gen_token(&mut rng);
        let r = s.apply(t);
        check_rendu(&r, &format!("session {:?} après {t:?}", s.mode()));
    }
}

/* ------------------------ Évaluateur seul ------------------------ */

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return match rng.pick(4) {
            0 => "pi".to_string(),
            1 => "e".to_string(),
            _ => format!("{}", rng.pick(10)),
        };
    }
    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => format!("({a}+{b})"),
        1 => format!("({a}-{b})"),
        2 => format!("({a}*{b})"),
        3 => format!("({a}/{b})"),
        4 => format!("({a}**{b})"),
        5 => format!("-{a}"),
        6 => format!(
            "{}({a})",
            rng.choose(&["sin", "cos", "tan", "asin", "acos", "atan", "log10", "ln", "sqrt"])
        ),
        _ => format!("factorial({a})"),
    }
}

#[test]
fn fuzz_safe_evaluateur_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let mut rng = Rng::new(0xABCDEF_u64);

    for _ in 0..300 {
        budget(t0, max);
        let expr = gen_expr(&mut rng, 4);
        let a = eval_expression(&expr);
        let b = eval_expression(&expr);
        assert_eq!(a, b, "non déterministe: {expr:?}");
        match a {
            Ok(v) => assert!(v.is_finite(), "valeur non finie: {expr:?} -> {v}"),
            Err(kind) => assert!(
                matches!(
                    kind,
                    ErrorKind::DivisionByZero | ErrorKind::DomainError | ErrorKind::EvaluationError
                ),
                "erreur inattendue: {expr:?} -> {kind:?}"
            ),
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert!((v - 400.0).abs() < 1e-9, "800*(1/2) != {v}");
}
