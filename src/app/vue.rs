// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), Échap géré dans app.rs
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Pavé selon le mode : Général / Scientifique / Financier
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Backspace clavier : laissé au TextEdit (sinon double effacement)

use eframe::egui;

use super::etat::{AppCalc, Touche};
use super::historique::Entree;
use super::reglages::{Mode, Theme, HISTORIQUE_MAX_BORNE};
use calculatrice_tvm::noyau::fonctions;

/// Fonctions du pavé financier (le reste du registre va au pavé scientifique).
const FONCTIONS_FINANCE: [&str; 4] = ["pmt", "fv", "pv", "nper"];

/// Lignes visibles dans le panneau historique.
const HISTORIQUE_AFFICHE: usize = 50;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .id_salt("principal")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.ui_theme(ui);
                        ui.toggle_value(&mut self.historique_ouvert, "Historique");
                    });
                });
                ui.add_space(6.0);

                self.ui_modes(ui);

                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_modes(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut mode = self.reglages.mode;
            for m in [Mode::General, Mode::Scientifique, Mode::Financier] {
                ui.selectable_value(&mut mode, m, m.libelle());
            }
            if mode != self.reglages.mode {
                self.set_mode(mode);
            }
        });
    }

    fn ui_theme(&mut self, ui: &mut egui::Ui) {
        let (libelle, autre) = match self.reglages.theme {
            Theme::Clair => ("🌙", Theme::Sombre),
            Theme::Sombre => ("☀", Theme::Clair),
        };
        if ui.button(libelle).on_hover_text("Thème clair / sombre").clicked() {
            self.set_theme(autre);
        }
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let hint = match self.reglages.mode {
            Mode::General => "Ex: (1+2)*3, 2^10, -5+2",
            Mode::Scientifique => "Ex: sin(pi/4), sqrt(2), max(1, 5, 3)",
            Mode::Financier => "Ex: pmt(0.05/12, 360, 200000)",
        };

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text(hint)
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / C / ⌫ / historique), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : singleline perd le focus en validant, d’où lost_focus()
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.evaluer();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface l’entrée et le résultat", Action::Clear);
            self.bouton_action(ui, "⌫", "Efface le dernier caractère", Action::Backspace);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.evaluer();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_general(ui);

        match self.reglages.mode {
            Mode::General => {}
            Mode::Scientifique => {
                ui.add_space(6.0);
                self.ui_pave_scientifique(ui);
            }
            Mode::Financier => {
                ui.add_space(6.0);
                self.ui_pave_financier(ui);
            }
        }

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_general(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_general")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [
                    ["7", "8", "9", "/", "("],
                    ["4", "5", "6", "*", ")"],
                    ["1", "2", "3", "-", "^"],
                    ["0", ".", "", "+", ""],
                ] {
                    for touche in ligne {
                        if touche.is_empty() {
                            ui.label("");
                            continue;
                        }
                        let kind = match touche {
                            "+" | "-" | "*" | "/" | "^" => Touche::Op,
                            "(" => Touche::ParG,
                            ")" => Touche::ParD,
                            _ => Touche::Chiffre,
                        };
                        self.bouton_insert(ui, touche, touche, kind);
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_pave_scientifique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "π", "pi", Touche::Mot);
            self.bouton_insert(ui, "e", "e", Touche::Mot);
            self.bouton_insert(ui, ",", ",", Touche::Virgule);

            ui.separator();

            for nom in fonctions::noms().filter(|n| !FONCTIONS_FINANCE.contains(n)) {
                self.bouton_insert(ui, nom, &format!("{nom}("), Touche::Fonction);
            }
        });
    }

    fn ui_pave_financier(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            for nom in FONCTIONS_FINANCE {
                self.bouton_insert(ui, nom, &format!("{nom}("), Touche::Fonction)
                    .on_hover_text(aide_finance(nom));
            }
            ui.separator();
            self.bouton_insert(ui, ",", ",", Touche::Virgule);
        });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    /// Panneau latéral : recherche + liste classée, clic = reprise dans l’entrée.
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("Historique ({})", self.historique.len()));
        ui.add_space(4.0);

        ui.add(
            egui::TextEdit::singleline(&mut self.recherche)
                .desired_width(ui.available_width())
                .hint_text("Rechercher…"),
        );

        ui.horizontal(|ui| {
            ui.label("Garder :");
            let mut n = self.reglages.historique_max;
            let resp = ui.add(
                egui::DragValue::new(&mut n)
                    .speed(1)
                    .range(1..=HISTORIQUE_MAX_BORNE)
                    .suffix(" calculs"),
            );
            if resp.changed() {
                self.set_historique_max(n);
            }
        });

        let vide = self.historique.is_empty();
        if ui.add_enabled(!vide, egui::Button::new("Vider")).clicked() {
            self.historique.vider();
        }

        ui.separator();

        let entrees: Vec<Entree> = if self.recherche.trim().is_empty() {
            self.historique.liste(HISTORIQUE_AFFICHE)
        } else {
            self.historique
                .chercher(self.recherche.trim(), HISTORIQUE_AFFICHE)
        };

        if entrees.is_empty() {
            ui.weak(if self.historique.is_empty() { "(vide)" } else { "aucun calcul trouvé" });
            return;
        }

        let mut choisie: Option<String> = None;
        egui::ScrollArea::vertical()
            .id_salt("historique")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for e in &entrees {
                    let texte = format!("{} = {}", e.expression, e.resultat);
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()))
                        .on_hover_text(format!(
                            "utilisé {} fois (calcul n°{}, dernier n°{})",
                            e.usages, e.creee, e.derniere
                        ));
                    if resp.clicked() {
                        choisie = Some(e.expression.clone());
                    }
                }
            });

        if let Some(expr) = choisie {
            self.reprendre(&expr);
        }
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Clear => self.clear(),
                Action::Backspace => self.backspace(),
            }
        }
    }

    fn bouton_insert(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        to_insert: &str,
        touche: Touche,
    ) -> egui::Response {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer_touche(touche, to_insert);
        }
        resp
    }
}

fn aide_finance(nom: &str) -> &'static str {
    match nom {
        "pmt" => "pmt(taux, n, va [, vc [, type]]) : versement périodique",
        "fv" => "fv(taux, n, vpm [, va [, type]]) : valeur future",
        "pv" => "pv(taux, n, vpm [, vc [, type]]) : valeur actuelle",
        "nper" => "nper(taux, vpm, va [, vc [, type]]) : nombre de périodes",
        _ => "",
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Clear,
    Backspace,
}
