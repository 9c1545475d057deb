// src/noyau/arith.rs
//
// Fournisseur arithmétique injecté dans l’évaluateur.
// Les quatre opérations de base passent par ici : la politique de division
// par zéro appartient au fournisseur, pas au noyau.
// Chaque fournisseur choisit son type d’erreur ; le noyau le transmet tel quel.

use super::erreurs::ErreurArithmetique;

pub trait Arithmetique {
    type Erreur: std::error::Error + Send + Sync + 'static;

    fn add(&self, a: f64, b: f64) -> Result<f64, Self::Erreur>;
    fn sub(&self, a: f64, b: f64) -> Result<f64, Self::Erreur>;
    fn mul(&self, a: f64, b: f64) -> Result<f64, Self::Erreur>;
    fn div(&self, a: f64, b: f64) -> Result<f64, Self::Erreur>;
}

/// Fournisseur par défaut : IEEE 754, sauf division par zéro refusée.
#[derive(Clone, Copy, Debug, Default)]
pub struct Calculatrice;

impl Arithmetique for Calculatrice {
    type Erreur = ErreurArithmetique;

    fn add(&self, a: f64, b: f64) -> Result<f64, ErreurArithmetique> {
        Ok(a + b)
    }

    fn sub(&self, a: f64, b: f64) -> Result<f64, ErreurArithmetique> {
        Ok(a - b)
    }

    fn mul(&self, a: f64, b: f64) -> Result<f64, ErreurArithmetique> {
        Ok(a * b)
    }

    fn div(&self, a: f64, b: f64) -> Result<f64, ErreurArithmetique> {
        if b == 0.0 {
            return Err(ErreurArithmetique::DivisionParZero);
        }
        Ok(a / b)
    }
}
