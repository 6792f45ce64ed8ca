// src/noyau/format.rs
//
// Affichage des nombres :
// - flottants : 10 chiffres significatifs, zéros non significatifs retirés
//   (équivalent de `%.10g`)
// - entiers : rendu/lecture dans une des quatre bases du mode Programmeur
//   (complément à deux sur 64 bits hors décimal)

use super::erreur::ErrorKind;
use super::touches::Base;

/// Nombre de chiffres significatifs des résultats.
pub const CHIFFRES_SIGNIFICATIFS: usize = 10;

/* ------------------------ Flottants ------------------------ */

/// `%.10g`
pub fn format_g10(v: f64) -> String {
    format_sig(v, CHIFFRES_SIGNIFICATIFS)
}

/// `%.{p}g` : notation fixe si -4 <= exposant < p, sinon scientifique
/// (`1.5e+20`, `2e-07`), zéros finaux retirés dans les deux cas.
pub fn format_sig(v: f64, p: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let p = p.max(1);

    // L’exposant se lit APRÈS arrondi à p chiffres (9.9999999999 -> 1e+01).
    let sci = format!("{:.*e}", p - 1, v);
    let (mantisse, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= p as i32 {
        let signe = if exp < 0 { '-' } else { '+' };
        format!("{}e{signe}{:02}", sans_zeros_finaux(mantisse), exp.unsigned_abs())
    } else {
        let decimales = (p as i32 - 1 - exp) as usize;
        sans_zeros_finaux(&format!("{v:.decimales$}")).to_string()
    }
}

fn sans_zeros_finaux(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/* ------------------------ Entiers multi-bases ------------------------ */

/// Rendu d’un entier dans `base`, sans préfixe (`0x`, `0b`, `0o`).
/// Hors décimal, les négatifs s’affichent en complément à deux (64 bits).
pub fn format_radix(v: i64, base: Base) -> String {
    match base {
        Base::Dec => v.to_string(),
        Base::Hex => format!("{v:X}"),
        Base::Oct => format!("{v:o}"),
        Base::Bin => format!("{v:b}"),
    }
}

/// Lecture inverse de `format_radix`.
pub fn parse_radix(s: &str, base: Base) -> Result<i64, ErrorKind> {
    let r = match base {
        Base::Dec => s.parse::<i64>().ok(),
        // motif binaire sur 64 bits, réinterprété en signé
        _ => u64::from_str_radix(s, base.radix()).ok().map(|u| u as i64),
    };
    r.ok_or(ErrorKind::InvalidNumericInput)
}
