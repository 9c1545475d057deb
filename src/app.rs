// src/app.rs
//
// Calculatrice : module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, historique, réglages)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - Le thème est appliqué ici, une fois par frame, depuis les réglages.

pub mod etat;
pub mod historique;
pub mod reglages;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;
use reglages::Theme;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let sombre = self.reglages.theme == Theme::Sombre;
        if ctx.style().visuals.dark_mode != sombre {
            ctx.set_visuals(if sombre {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        // ESC = effacer seulement l’entrée (le résultat reste affiché).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        if self.historique_ouvert {
            egui::SidePanel::right("panneau_historique")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
