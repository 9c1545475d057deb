//! Calculatrice : noyau d’évaluation f64 (bibliothèque).
//!
//! Le binaire (src/main.rs) ne contient que l’interface eframe ; tout le
//! calcul passe par `noyau::Evaluateur`.

pub mod noyau;
