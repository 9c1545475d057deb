//! Noyau d’évaluation (f64)
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie des erreurs (entrée, lexique, syntaxe, évaluation, arithmétique)
//! - arith.rs     : fournisseur arithmétique injecté (+ - * /)
//! - jetons.rs    : tokenisation (unaires, constantes, marqueurs de fonction)
//! - rpn.rs       : shunting-yard -> RPN (cadres d’appel)
//! - eval.rs      : pile numérique + pipeline complet
//! - fonctions.rs : registre statique des fonctions
//! - finance.rs   : pmt / fv / pv / nper
//! - format.rs    : affichage des nombres et de la démarche

pub mod arith;
pub mod erreurs;
pub mod eval;
pub mod finance;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use arith::{Arithmetique, Calculatrice};
pub use erreurs::{Categorie, ErreurArithmetique, ErreurCalcul, ErreurFournisseur};
pub use eval::{eval_expression, Demarche, Evaluateur};
pub use format::format_resultat;
