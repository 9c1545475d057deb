//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, démarche,
//! réglages, historique) et offrir les actions des touches sans logique d’affichage.
//!
//! Contrats :
//! - L’évaluation passe uniquement par `noyau::Evaluateur` (aucun parsing ici).
//! - Une erreur n’efface pas le dernier résultat ; elle coupe la démarche.
//! - Seuls les succès vont dans l’historique, tronqué à `reglages.historique_max`.

use std::path::PathBuf;

use super::historique::Historique;
use super::reglages::{Mode, Reglages, Theme};
use calculatrice_tvm::noyau::{format_resultat, Calculatrice, Demarche, Evaluateur};

/// Nature d’une touche du pavé (règles d’espacement et de `*` implicite).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre,
    Mot,
    Fonction,
    Op,
    Virgule,
    ParG,
    ParD,
}

/// Dernier caractère d’un opérande : nombre, identifiant ou ')'.
fn fin_operande(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == ')'
}

pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- réglages + historique ---
    pub reglages: Reglages,
    pub historique: Historique,
    pub recherche: String,
    pub historique_ouvert: bool,

    // None : pas de persistance (wasm, tests)
    chemin_reglages: Option<PathBuf>,

    evaluateur: Evaluateur<Calculatrice>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_reglages(Reglages::default(), None)
    }
}

impl AppCalc {
    pub fn avec_reglages(reglages: Reglages, chemin_reglages: Option<PathBuf>) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            reglages,
            historique: Historique::new(),
            recherche: String::new(),
            historique_ouvert: false,
            chemin_reglages,
            evaluateur: Evaluateur::new(Calculatrice),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /// Natif : réglages lus depuis `reglages.json` (défauts si absent / illisible).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn depuis_fichier() -> Self {
        let chemin = PathBuf::from(super::reglages::FICHIER_REGLAGES);
        let reglages = Reglages::charger_ou_defaut(&chemin);
        log::info!(
            "réglages: mode={:?} thème={:?} historique_max={}",
            reglages.mode,
            reglages.theme,
            reglages.historique_max
        );
        Self::avec_reglages(reglages, Some(chemin))
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// C : efface l’entrée et le résultat.
    pub fn clear(&mut self) {
        self.entree.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Échap : efface seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// ⌫ : retire le dernier caractère.
    pub fn backspace(&mut self) {
        self.entree.pop();
        self.focus_entree = true;
    }

    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.focus_entree = true;
    }

    fn retirer_espaces_finaux(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /// Insère le texte d’une touche du pavé.
    /// Pas de multiplication implicite dans le noyau : quand deux opérandes
    /// se touchent ("pi" puis "e", "pi" puis "2", ")" puis "("), on écrit " * ".
    pub fn inserer_touche(&mut self, touche: Touche, texte: &str) {
        let dernier = self.entree.chars().rev().find(|c| !c.is_whitespace());

        match touche {
            Touche::ParD | Touche::Virgule => {
                self.retirer_espaces_finaux();
                self.inserer(texte);
                if touche == Touche::Virgule {
                    self.inserer(" ");
                }
            }
            Touche::ParG | Touche::Fonction | Touche::Mot => {
                if dernier.is_some_and(fin_operande) {
                    self.retirer_espaces_finaux();
                    self.inserer(" * ");
                }
                self.inserer(texte);
            }
            Touche::Op => {
                self.retirer_espaces_finaux();
                if !self.entree.is_empty() {
                    self.inserer(" ");
                }
                self.inserer(texte);
                self.inserer(" ");
            }
            Touche::Chiffre => {
                // chiffre collé à un nombre : pas d’espace ; après un identifiant ou ')' : " * "
                if dernier.is_some_and(|c| c.is_alphabetic() || c == '_' || c == ')') {
                    self.retirer_espaces_finaux();
                    self.inserer(" * ");
                }
                self.inserer(texte);
            }
        }
        self.focus_entree = true;
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat / erreur / démarche.
    pub fn evaluer(&mut self) {
        let expr = self.entree.trim().to_string();
        if expr.is_empty() {
            // rien à évaluer : écran résultat vidé, pas d’erreur
            self.resultat.clear();
            self.erreur.clear();
            self.focus_entree = true;
            return;
        }

        match self.evaluateur.evaluer_avec_demarche(&expr) {
            Ok((v, demarche)) => {
                let texte = format_resultat(v);
                self.historique.ajouter(&expr, &texte);
                self.historique.tronquer(self.reglages.historique_max);
                self.resultat = texte;
                self.erreur.clear();
                self.demarche = demarche;
            }
            Err(e) => {
                log::debug!("évaluation refusée ({:?}): {e}", e.categorie());
                self.erreur = e.to_string();
                self.demarche = Demarche::default();
            }
        }
        self.focus_entree = true;
    }

    /// Reprend une expression de l’historique dans l’entrée.
    pub fn reprendre(&mut self, expression: &str) {
        self.entree = expression.to_string();
        self.focus_entree = true;
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn set_mode(&mut self, mode: Mode) {
        if self.reglages.mode != mode {
            self.reglages.mode = mode;
            self.sauver_reglages();
        }
        self.focus_entree = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.reglages.theme != theme {
            self.reglages.theme = theme;
            self.sauver_reglages();
        }
    }

    pub fn set_historique_max(&mut self, n: usize) {
        let avant = self.reglages.historique_max;
        self.reglages.set_historique_max(n);
        if self.reglages.historique_max != avant {
            self.historique.tronquer(self.reglages.historique_max);
            self.sauver_reglages();
        }
    }

    fn sauver_reglages(&self) {
        let Some(chemin) = &self.chemin_reglages else {
            return;
        };
        match self.reglages.sauver(chemin) {
            Ok(()) => log::info!("réglages sauvés"),
            Err(e) => log::warn!("réglages non sauvés ({}): {e}", chemin.display()),
        }
    }
}
