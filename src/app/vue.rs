// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), Backspace natif du TextEdit
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique repliable sous le pavé
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::format::format_resultat;

/// Pavé 9×4 (case vide = "").
const PAVE: [[&str; 4]; 9] = [
    ["C", "⌫", "(", ")"],
    ["sin", "cos", "tan", "^"],
    ["ln", "log", "sqrt", "root"],
    ["fact", "nPr", "nCr", "exp"],
    ["pi", "e", "%", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "=", ""],
];

/// Boutons qui insèrent `nom(`.
const FONCTIONS: [&str; 11] = [
    "sin", "cos", "tan", "ln", "log", "sqrt", "root", "fact", "nPr", "nCr", "exp",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_affichage(ui);

                ui.add_space(6.0);

                let mode = ui.add_sized(
                    [ui.available_width(), 30.0],
                    egui::Button::new(self.libelle_mode()),
                );
                if mode.clicked() {
                    self.bascule_mode();
                }

                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3*5, sin(30), log(8,2), nCr(5,2)")
                .id_source("entree_edit")
                .font(egui::TextStyle::Heading)
                .horizontal_align(egui::Align::Max),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue ---
        // Un TextEdit singleline rend le focus sur Enter : on accepte les deux cas.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp.lost_focus()) {
            self.calculer();
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let largeur = ((ui.available_width() - 3.0 * 6.0) / 4.0).max(46.0);

        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for touche in rangee {
                        if touche.is_empty() {
                            ui.label("");
                        } else {
                            self.bouton(ui, touche, largeur);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, largeur: f32) {
        let resp = ui.add_sized([largeur, 36.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }

        match label {
            "C" => self.clear_entree(),
            "⌫" => self.backspace_entree(),
            "=" => self.calculer(),
            f if FONCTIONS.contains(&f) => self.inserer(&format!("{f}(")),
            autre => self.inserer(autre),
        }
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let historique = self.evaluateur.historique();

        let resp = egui::CollapsingHeader::new(format!("Historique ({})", historique.len()))
            .open(Some(self.afficher_historique))
            .show(ui, |ui| {
                if historique.is_empty() {
                    ui.monospace("vide");
                } else {
                    let lignes: Vec<String> = historique
                        .iter()
                        .rev()
                        .map(|h| format!("{} = {}", h.expression.trim(), format_resultat(&h.resultat)))
                        .collect();
                    Self::champ_monospace(ui, "historique_out", &lignes.join("\n"), 2);
                }

                ui.add_space(4.0);
                let effacer = ui
                    .button("Effacer l’historique")
                    .on_hover_text("Vide l’historique (le mode est conservé)");
                if effacer.clicked() {
                    self.clear_historique();
                }
            });

        if resp.header_response.clicked() {
            self.afficher_historique = !self.afficher_historique;
        }
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
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
}
