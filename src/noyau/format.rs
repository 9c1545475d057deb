// src/noyau/format.rs

use super::rpn::Postfixe;

/* ------------------------ Nombres ------------------------ */

/// Texte décimal invariant ('.' comme séparateur, jamais d’exposant),
/// plus courte forme qui relit le même f64.
pub fn format_nombre(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    // -0 => 0
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Affichage du résultat final (zone résultat + historique).
pub fn format_resultat(v: f64) -> String {
    format_nombre(v)
}

/* ------------------------ Démarche ------------------------ */

/// RPN en texte : `1 2 3 * +`, appels sous la forme `max/3`.
pub fn format_postfixe(rpn: &[Postfixe]) -> String {
    rpn.iter()
        .map(|p| match p {
            Postfixe::Nombre(v) => format_nombre(*v),
            Postfixe::Op(op) => op.symbole().to_string(),
            Postfixe::Appel { nom, argc } => format!("{nom}/{argc}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
