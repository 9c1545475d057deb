//! src/app/reglages.rs
//!
//! Réglages persistants (JSON plat) : mode du pavé, thème, taille de l’historique.
//!
//! Contrats :
//! - Fichier absent => réglages par défaut (premier lancement).
//! - Fichier illisible / JSON invalide => erreur typée ; l’appelant journalise et
//!   retombe sur les défauts.
//! - Champs manquants => valeurs par défaut champ par champ (`#[serde(default)]`).

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nom du fichier de réglages (répertoire courant, natif seulement).
pub const FICHIER_REGLAGES: &str = "reglages.json";

/// Taille d’historique par défaut.
pub const HISTORIQUE_MAX_DEFAUT: usize = 100;

/// Garde-fou : on borne l’historique (anti-abus / anti-gel de la liste).
pub const HISTORIQUE_MAX_BORNE: usize = 1000;

#[derive(Error, Debug)]
pub enum ErreurReglages {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON invalide: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    General,
    Scientifique,
    Financier,
}

impl Mode {
    pub fn libelle(self) -> &'static str {
        match self {
            Mode::General => "Général",
            Mode::Scientifique => "Scientifique",
            Mode::Financier => "Financier",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub mode: Mode,
    pub theme: Theme,
    pub historique_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode: Mode::General,
            theme: Theme::Clair,
            historique_max: HISTORIQUE_MAX_DEFAUT,
        }
    }
}

impl Reglages {
    /// Lit les réglages ; fichier absent => défauts.
    pub fn charger(chemin: &Path) -> Result<Self, ErreurReglages> {
        let texte = match std::fs::read_to_string(chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("pas de réglages dans {}, défauts utilisés", chemin.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let mut r: Self = serde_json::from_str(&texte)?;
        r.set_historique_max(r.historique_max);
        Ok(r)
    }

    /// Comme `charger`, mais ne peut pas échouer (erreur journalisée).
    pub fn charger_ou_defaut(chemin: &Path) -> Self {
        Self::charger(chemin).unwrap_or_else(|e| {
            log::warn!("réglages illisibles ({}): {e}", chemin.display());
            Self::default()
        })
    }

    pub fn sauver(&self, chemin: &Path) -> Result<(), ErreurReglages> {
        let texte = serde_json::to_string_pretty(self)?;
        std::fs::write(chemin, texte)?;
        log::debug!("réglages sauvés dans {}", chemin.display());
        Ok(())
    }

    /// Garde-fou : au moins 1 entrée, au plus HISTORIQUE_MAX_BORNE.
    pub fn set_historique_max(&mut self, n: usize) {
        self.historique_max = n.clamp(1, HISTORIQUE_MAX_BORNE);
    }
}
