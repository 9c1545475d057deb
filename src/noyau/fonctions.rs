// src/noyau/fonctions.rs
//
// Registre des fonctions intégrées.
// Table statique, immuable, partagée entre tous les appels.
// Recherche insensible à la casse (ASCII).

use super::finance;

/// Nombre d’arguments accepté : `min..=max` (max = None => illimité).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arite {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arite {
    const fn exacte(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    const fn entre(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    const fn au_moins(min: usize) -> Self {
        Self { min, max: None }
    }
}

pub struct Fonction {
    pub nom: &'static str,
    pub arite: Arite,
    /// Reçoit exactement `arite` arguments (vérifié par eval.rs avant l’appel).
    pub f: fn(&[f64]) -> f64,
}

impl std::fmt::Debug for Fonction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fonction")
            .field("nom", &self.nom)
            .field("arite", &self.arite)
            .finish()
    }
}

/// Argument optionnel en fin de liste (0 par défaut).
fn opt(a: &[f64], i: usize) -> f64 {
    a.get(i).copied().unwrap_or(0.0)
}

fn min(a: &[f64]) -> f64 {
    a.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(a: &[f64]) -> f64 {
    a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

static REGISTRE: &[Fonction] = &[
    // --- trig ---
    Fonction { nom: "sin", arite: Arite::exacte(1), f: |a| a[0].sin() },
    Fonction { nom: "cos", arite: Arite::exacte(1), f: |a| a[0].cos() },
    Fonction { nom: "tan", arite: Arite::exacte(1), f: |a| a[0].tan() },
    Fonction { nom: "asin", arite: Arite::exacte(1), f: |a| a[0].asin() },
    Fonction { nom: "acos", arite: Arite::exacte(1), f: |a| a[0].acos() },
    Fonction { nom: "atan", arite: Arite::exacte(1), f: |a| a[0].atan() },
    // --- algébriques ---
    Fonction { nom: "sqrt", arite: Arite::exacte(1), f: |a| a[0].sqrt() },
    Fonction { nom: "abs", arite: Arite::exacte(1), f: |a| a[0].abs() },
    Fonction { nom: "ln", arite: Arite::exacte(1), f: |a| a[0].ln() },
    Fonction { nom: "log", arite: Arite::exacte(1), f: |a| a[0].log10() },
    Fonction { nom: "pct", arite: Arite::exacte(1), f: |a| a[0] / 100.0 },
    Fonction { nom: "pow", arite: Arite::exacte(2), f: |a| a[0].powf(a[1]) },
    Fonction { nom: "min", arite: Arite::au_moins(1), f: min },
    Fonction { nom: "max", arite: Arite::au_moins(1), f: max },
    // --- finance : (taux, nper|pmt, ..., optionnels = 0) ---
    Fonction {
        nom: "pmt",
        arite: Arite::entre(3, 5),
        f: |a| finance::pmt(a[0], a[1], a[2], opt(a, 3), opt(a, 4)),
    },
    Fonction {
        nom: "fv",
        arite: Arite::entre(3, 5),
        f: |a| finance::fv(a[0], a[1], a[2], opt(a, 3), opt(a, 4)),
    },
    Fonction {
        nom: "pv",
        arite: Arite::entre(3, 5),
        f: |a| finance::pv(a[0], a[1], a[2], opt(a, 3), opt(a, 4)),
    },
    Fonction {
        nom: "nper",
        arite: Arite::entre(3, 5),
        f: |a| finance::nper(a[0], a[1], a[2], opt(a, 3), opt(a, 4)),
    },
];

/// Cherche une fonction par nom (insensible à la casse).
pub fn trouver(nom: &str) -> Option<&'static Fonction> {
    REGISTRE.iter().find(|f| f.nom.eq_ignore_ascii_case(nom))
}

pub fn existe(nom: &str) -> bool {
    trouver(nom).is_some()
}

/// Noms enregistrés, dans l’ordre de la table.
pub fn noms() -> impl Iterator<Item = &'static str> {
    REGISTRE.iter().map(|f| f.nom)
}
