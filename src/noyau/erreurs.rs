//! Erreurs du noyau.
//!
//! Une variante par cas d’échec, regroupées par étape du pipeline
//! (voir `Categorie`). Aucune erreur n’est rattrapée dans le noyau :
//! tout remonte à l’appelant tel quel.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Erreur du fournisseur par défaut (`Calculatrice`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurArithmetique {
    #[error("division par zéro")]
    DivisionParZero,
}

/// Erreur d’un fournisseur arithmétique quelconque, gardée intacte.
///
/// `Display` est celui du fournisseur ; `source()` rend l’erreur d’origine,
/// qu’on peut retrouver par `downcast_ref`.
#[derive(Clone)]
pub struct ErreurFournisseur(Arc<dyn StdError + Send + Sync>);

impl ErreurFournisseur {
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self(Arc::new(e))
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for ErreurFournisseur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ErreurFournisseur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl StdError for ErreurFournisseur {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.0)
    }
}

/// Deux erreurs de fournisseur sont égales si elles s’affichent pareil
/// (même `Debug`, donc même type et même contenu pour un `derive`).
impl PartialEq for ErreurFournisseur {
    fn eq(&self, autre: &Self) -> bool {
        format!("{:?}", self.0) == format!("{:?}", autre.0)
    }
}

impl From<ErreurArithmetique> for ErreurFournisseur {
    fn from(e: ErreurArithmetique) -> Self {
        Self::new(e)
    }
}

/// Étape du pipeline qui a rejeté l’entrée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Categorie {
    Entree,
    Lexicale,
    Syntaxe,
    Evaluation,
    Arithmetique,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalcul {
    // --- entrée ---
    #[error("Entrée vide")]
    EntreeVide,

    // --- lexique ---
    #[error("caractère inattendu '{car}' en position {position}")]
    CaractereInattendu { car: char, position: usize },
    #[error("identifiant inconnu '{0}'")]
    IdentifiantInconnu(String),

    // --- syntaxe ---
    #[error("parenthèses non appariées")]
    ParenthesesDesequilibrees,
    #[error("virgule mal placée")]
    VirguleMalPlacee,
    #[error("appel de fonction '{0}' sans parenthèses")]
    AppelSansParentheses(String),
    #[error("fonction inconnue '{0}'")]
    FonctionInconnue(String),
    #[error("nombre mal formé '{0}'")]
    NombreMalforme(String),

    // --- évaluation ---
    #[error("expression invalide")]
    ExpressionInvalide,
    #[error("{nom}: au moins {attendus} argument(s) attendu(s), {fournis} fourni(s)")]
    ArgumentsInsuffisants {
        nom: String,
        attendus: usize,
        fournis: usize,
    },
    #[error("{nom}: au plus {max} argument(s) accepté(s), {fournis} fourni(s)")]
    ArgumentsEnTrop {
        nom: String,
        max: usize,
        fournis: usize,
    },

    // --- fournisseur arithmétique (transmis sans modification) ---
    #[error(transparent)]
    Arithmetique(ErreurFournisseur),
}

impl From<ErreurArithmetique> for ErreurCalcul {
    fn from(e: ErreurArithmetique) -> Self {
        ErreurCalcul::Arithmetique(e.into())
    }
}

impl ErreurCalcul {
    pub fn categorie(&self) -> Categorie {
        use ErreurCalcul::*;
        match self {
            EntreeVide => Categorie::Entree,
            CaractereInattendu { .. } | IdentifiantInconnu(_) => Categorie::Lexicale,
            ParenthesesDesequilibrees
            | VirguleMalPlacee
            | AppelSansParentheses(_)
            | FonctionInconnue(_)
            | NombreMalforme(_) => Categorie::Syntaxe,
            ExpressionInvalide | ArgumentsInsuffisants { .. } | ArgumentsEnTrop { .. } => {
                Categorie::Evaluation
            }
            Arithmetique(_) => Categorie::Arithmetique,
        }
    }
}
