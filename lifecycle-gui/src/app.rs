use eframe::egui;
use egui_extras::{Column, TableBuilder};

use lifecycle_core::{
    BrowserState, BrowserTab, ElementHandle, Methodology, MethodologyKind, OverlayPositioner,
    Phase, ReferenceData, Settings, Side, ThemePreference, ViewController, ViewEvent, ViewState,
    ViewportEvent, ViewportListeners, PHASE_SUMMARY_CHARS,
};

use crate::icons::glyph;
use crate::layout::FrameLayout;

const HEADER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x43, 0x38, 0xca);
const NEUTRAL_COLOR: egui::Color32 = egui::Color32::from_rgb(0x6b, 0x72, 0x80);
const SELECTOR_SIZE: f32 = 120.0;
/// Below this width the cards are stacked instead of side by side
const MIN_WIDTH_FOR_ROW: f32 = 900.0;

pub struct OrganizerApp {
    controller: ViewController,
    settings: Settings,
    layout: FrameLayout,
    last_screen: Option<egui::Rect>,
    last_scroll_offset: Option<egui::Vec2>,
    /// Message shown when the configured data file could not be used
    load_error: Option<String>,

    // Pending operations (to avoid borrow checker issues)
    pending_events: Vec<ViewEvent>,
    pending_theme_toggle: bool,
}

/// Borrowed view of the app while the page is drawn
struct Page<'a> {
    data: &'a ReferenceData,
    state: &'a ViewState,
    layout: &'a mut FrameLayout,
    events: &'a mut Vec<ViewEvent>,
    load_error: Option<&'a str>,
    theme_toggle: &'a mut bool,
}

impl OrganizerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load();

        let (data, load_error) = match settings.load_data(None) {
            Ok(data) => (data, None),
            Err(e) => {
                log::error!("Falling back to built-in data: {}", e);
                (ReferenceData::builtin(), Some(e.to_string()))
            }
        };

        let controller = ViewController::new(
            data,
            OverlayPositioner::new(settings.placement),
            ViewportListeners::new(),
        );

        apply_style(&cc.egui_ctx, &settings);

        Self {
            controller,
            settings,
            layout: FrameLayout::default(),
            last_screen: None,
            last_scroll_offset: None,
            load_error,
            pending_events: Vec::new(),
            pending_theme_toggle: false,
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = match self.settings.theme {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        };
        apply_style(ctx, &self.settings);
        if let Err(e) = self.settings.save() {
            log::warn!("Could not save settings: {}", e);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return;
        }
        let state = self.controller.state();
        if state.browser.is_some() {
            self.pending_events.push(ViewEvent::CloseBrowser);
        } else if state.selected_phase.is_some() {
            self.pending_events.push(ViewEvent::CloseOverlay);
        }
    }

    /// Draws the popover for the selected phase; returns its rendered height
    fn show_overlay(&mut self, ctx: &egui::Context) -> Option<f32> {
        let state = self.controller.state();
        let (kind, index) = state.selection()?;
        let position = state.overlay?;
        let origin = self.layout.container_origin()?;

        let data = self.controller.data();
        let methodology = data.methodology(kind);
        let counterpart = data.methodology(kind.counterpart());
        let phase = methodology.phase(index)?;
        let related = data.related_phase(kind, index).map(|(_, p)| p);
        let width = self.controller.positioner().config().overlay_width;

        let accent = hex_color(&methodology.color);
        let counterpart_accent = hex_color(&counterpart.color);
        let mut close_clicked = false;

        let response = egui::Area::new(egui::Id::new("phase_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(origin + egui::vec2(position.left, position.top))
            .constrain(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(14.0)
                    .rounding(12.0)
                    .show(ui, |ui| {
                        ui.set_width(width - 28.0);

                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} Relación {}-{}",
                                    glyph("bi bi-link-45deg"),
                                    methodology.name,
                                    counterpart.name
                                ))
                                .strong()
                                .color(accent),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✖").on_hover_text("Cerrar").clicked() {
                                    close_clicked = true;
                                }
                            });
                        });
                        ui.add_space(6.0);

                        ui.label(
                            egui::RichText::new(format!("{} {}", glyph(&phase.icon), phase.title))
                                .strong()
                                .color(accent),
                        );
                        ui.label(egui::RichText::new(&phase.description).small().weak());

                        ui.add_space(4.0);
                        ui.vertical_centered(|ui| {
                            ui.label(egui::RichText::new("⬇").weak().size(18.0));
                        });

                        let related_title = related
                            .map(|p| p.title.as_str())
                            .or(phase.related_phase.as_deref());
                        if let Some(title) = related_title {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} {}",
                                    glyph("bi bi-shield-check"),
                                    title
                                ))
                                .strong()
                                .color(counterpart_accent),
                            );
                        }

                        if let Some(use_case) = &phase.use_case {
                            ui.add_space(8.0);
                            egui::Frame::none()
                                .fill(ui.visuals().faint_bg_color)
                                .rounding(8.0)
                                .inner_margin(10.0)
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} Caso de Uso",
                                            glyph("bi bi-lightbulb-fill")
                                        ))
                                        .strong(),
                                    );
                                    ui.label(egui::RichText::new(use_case).small());
                                });
                        }
                    });
            })
            .response;

        paint_overlay_arrow(ctx, response.rect, position.side, position.arrow_offset());

        if close_clicked {
            self.pending_events.push(ViewEvent::CloseOverlay);
        }
        Some(response.rect.height())
    }

    fn show_browser(&mut self, ctx: &egui::Context) {
        let Some(browser) = self.controller.state().browser.clone() else {
            return;
        };
        let data = self.controller.data();
        let events = &mut self.pending_events;
        let mut open = true;

        egui::Window::new("📚 Roles y requisitos")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([780.0, 520.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for tab in BrowserTab::all() {
                        if ui.selectable_label(browser.tab == *tab, tab.label()).clicked() {
                            events.push(ViewEvent::SwitchTab(*tab));
                        }
                    }
                });
                ui.separator();

                match browser.tab {
                    BrowserTab::Roles => show_roles_tab(ui, data, &browser, events),
                    BrowserTab::NonFunctional => show_non_functional_tab(ui, data, &browser, events),
                }
            });

        if !open {
            self.pending_events.push(ViewEvent::CloseBrowser);
        }
    }
}

impl eframe::App for OrganizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let screen = ctx.screen_rect();
        self.layout.begin_frame(screen);

        let mut scroll_offset = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut page = Page {
                data: self.controller.data(),
                state: self.controller.state(),
                layout: &mut self.layout,
                events: &mut self.pending_events,
                load_error: self.load_error.as_deref(),
                theme_toggle: &mut self.pending_theme_toggle,
            };
            let output = egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| show_page(ui, &mut page));
            scroll_offset = Some(output.state.offset);
        });

        self.show_browser(ctx);

        let mut changed = false;

        // Resize and scroll anywhere, including nested scroll areas
        if self.last_screen.is_some_and(|last| last != screen) {
            changed |= self
                .controller
                .on_viewport_event(ViewportEvent::Resize, &self.layout);
        }
        let wheel = ctx.input(|i| i.raw_scroll_delta != egui::Vec2::ZERO);
        let page_scrolled = self.last_scroll_offset.is_some() && scroll_offset != self.last_scroll_offset;
        if wheel || page_scrolled {
            changed |= self
                .controller
                .on_viewport_event(ViewportEvent::Scroll, &self.layout);
        }
        self.last_screen = Some(screen);
        self.last_scroll_offset = scroll_offset;

        // Selections from the previous pass are now laid out
        changed |= self.controller.settle(&self.layout);

        if let Some(height) = self.show_overlay(ctx) {
            changed |= self.controller.correct(height, &self.layout);
        }

        if std::mem::take(&mut self.pending_theme_toggle) {
            self.toggle_theme(ctx);
            changed = true;
        }

        let events: Vec<ViewEvent> = self.pending_events.drain(..).collect();
        if !events.is_empty() {
            changed = true;
        }
        for event in events {
            log::debug!("View event: {:?}", event);
            self.controller.dispatch(event);
        }

        if changed {
            ctx.request_repaint();
        }
    }
}

fn apply_style(ctx: &egui::Context, settings: &Settings) {
    ctx.set_visuals(match settings.theme {
        ThemePreference::Light => egui::Visuals::light(),
        ThemePreference::Dark => egui::Visuals::dark(),
    });

    let base = settings.base_font_size;
    let mut style = (*ctx.style()).clone();
    for (text_style, font_id) in style.text_styles.iter_mut() {
        font_id.size = match text_style {
            egui::TextStyle::Heading => base * 1.6,
            egui::TextStyle::Small => base * 0.85,
            _ => base,
        };
    }
    // Labels must not swallow clicks meant for the phase cards
    style.interaction.selectable_labels = false;
    ctx.set_style(style);
}

fn show_page(ui: &mut egui::Ui, page: &mut Page<'_>) {
    show_header(ui, page);
    ui.add_space(16.0);

    let origin = ui.cursor().min;
    let width = ui.available_width();

    if width >= MIN_WIDTH_FOR_ROW {
        let spacing = ui.spacing().item_spacing.x;
        let card_width = (width * 0.4 - spacing).max(200.0);
        let selector_width = (width - 2.0 * card_width - 2.0 * spacing).max(SELECTOR_SIZE);
        ui.horizontal_top(|ui| {
            ui.allocate_ui(egui::vec2(card_width, 0.0), |ui| {
                show_methodology_card(ui, page, MethodologyKind::Development);
            });
            ui.allocate_ui(egui::vec2(selector_width, 0.0), |ui| {
                ui.set_width(selector_width);
                ui.add_space(60.0);
                show_selector(ui, page);
            });
            ui.allocate_ui(egui::vec2(card_width, 0.0), |ui| {
                show_methodology_card(ui, page, MethodologyKind::Testing);
            });
        });
    } else {
        show_methodology_card(ui, page, MethodologyKind::Development);
        ui.add_space(12.0);
        show_selector(ui, page);
        ui.add_space(12.0);
        show_methodology_card(ui, page, MethodologyKind::Testing);
    }

    ui.add_space(32.0);
    show_comparison_table(ui, page.data);

    let bottom = ui.min_rect().bottom();
    page.layout.record(
        ElementHandle::Container,
        egui::Rect::from_min_max(origin, egui::pos2(origin.x + width, bottom.max(origin.y))),
    );

    ui.add_space(32.0);
    show_footer(ui);
}

fn show_header(ui: &mut egui::Ui, page: &mut Page<'_>) {
    egui::Frame::none()
        .fill(HEADER_COLOR)
        .rounding(16.0)
        .inner_margin(egui::Margin::symmetric(24.0, 28.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} {}", glyph("bi bi-diagram-3-fill"), page.data.title))
                        .heading()
                        .strong()
                        .size(30.0)
                        .color(egui::Color32::WHITE),
                );
                if !page.data.subtitle.is_empty() {
                    ui.label(
                        egui::RichText::new(&page.data.subtitle)
                            .color(egui::Color32::from_white_alpha(220)),
                    );
                }
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("📚 Roles y requisitos").clicked() {
                        page.events.push(ViewEvent::OpenBrowser(BrowserTab::Roles));
                    }
                    if ui.button("📏 Requisitos no funcionales").clicked() {
                        page.events.push(ViewEvent::OpenBrowser(BrowserTab::NonFunctional));
                    }
                    let theme_label = if ui.visuals().dark_mode { "☀" } else { "🌙" };
                    if ui
                        .button(theme_label)
                        .on_hover_text("Cambiar tema")
                        .clicked()
                    {
                        *page.theme_toggle = true;
                    }
                });
                if let Some(error) = page.load_error {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(format!("⚠ {}", error))
                            .small()
                            .color(egui::Color32::from_rgb(0xfe, 0xca, 0xca)),
                    );
                }
            });
        });
}

fn show_methodology_card(ui: &mut egui::Ui, page: &mut Page<'_>, kind: MethodologyKind) {
    let methodology = page.data.methodology(kind);
    let accent = hex_color(&methodology.color);
    let active = page.state.methodology == Some(kind);
    let dark = ui.visuals().dark_mode;

    let fill = if active {
        tint(methodology, dark)
    } else {
        ui.visuals().extreme_bg_color
    };
    let stroke = if active {
        egui::Stroke::new(2.0, accent)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(14.0)
        .inner_margin(18.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(44.0, 44.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                let icon = match kind {
                    MethodologyKind::Development => "bi bi-code-slash",
                    MethodologyKind::Testing => "bi bi-shield-check",
                };
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    glyph(icon),
                    egui::FontId::proportional(20.0),
                    egui::Color32::WHITE,
                );
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&methodology.name).heading().strong().color(accent));
                    ui.label(egui::RichText::new(&methodology.subtitle).small().weak());
                });
            });
            ui.add_space(12.0);

            if active {
                show_phase_list(ui, page, methodology, accent);
            } else {
                ui.label(egui::RichText::new(&methodology.definition).weak());
                ui.add_space(8.0);
                let fill = ui.visuals().faint_bg_color;
                let text = ui.visuals().text_color();
                ui.horizontal_wrapped(|ui| {
                    for highlight in &methodology.highlights {
                        badge(ui, &format!("✔ {}", highlight), fill, text);
                    }
                });
            }
        });
}

fn show_phase_list(ui: &mut egui::Ui, page: &mut Page<'_>, methodology: &Methodology, accent: egui::Color32) {
    ui.label(
        egui::RichText::new(format!("☰ Fases del {} para Sistema de Reservas", methodology.name))
            .strong(),
    );
    ui.separator();
    ui.add_space(4.0);

    for (index, phase) in methodology.phases.iter().enumerate() {
        show_phase_item(ui, page, methodology.kind, index, phase, accent);
        ui.add_space(8.0);
    }
}

fn show_phase_item(
    ui: &mut egui::Ui,
    page: &mut Page<'_>,
    kind: MethodologyKind,
    index: usize,
    phase: &Phase,
    accent: egui::Color32,
) {
    let selected = page.state.is_selected(kind, index);
    let fill = if selected {
        accent.gamma_multiply(0.18)
    } else {
        ui.visuals().faint_bg_color
    };
    let stroke = if selected {
        egui::Stroke::new(1.5, accent)
    } else {
        egui::Stroke::NONE
    };

    let response = egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(10.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(egui::RichText::new(glyph(&phase.icon)).size(18.0).color(accent));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&phase.title).strong().color(accent));
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(phase.summary(PHASE_SUMMARY_CHARS))
                                .small()
                                .weak(),
                        )
                        .wrap(),
                    );
                });
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    page.layout.record(
        ElementHandle::Phase {
            methodology: kind,
            index,
        },
        response.rect,
    );
    if response.clicked() {
        page.events.push(ViewEvent::ClickPhase(index));
    }
}

fn show_selector(ui: &mut egui::Ui, page: &mut Page<'_>) {
    ui.vertical_centered(|ui| {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(SELECTOR_SIZE, SELECTOR_SIZE),
            egui::Sense::click(),
        );
        let response = response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Cambiar vista");

        let arrow_color = page
            .state
            .methodology
            .map(|kind| hex_color(&page.data.methodology(kind).color))
            .unwrap_or(NEUTRAL_COLOR);
        let weak = ui.visuals().weak_text_color();
        let center = rect.center();
        let radius = SELECTOR_SIZE / 2.0 - 4.0;

        let painter = ui.painter();
        painter.circle_filled(center, radius, ui.visuals().extreme_bg_color);
        painter.circle_stroke(center, radius, egui::Stroke::new(2.0, arrow_color.gamma_multiply(0.6)));
        painter.circle_stroke(center, radius * 0.72, egui::Stroke::new(1.0, weak));

        // 0° points at the SDLC card (left), rotating clockwise
        let angle = page.state.selector_angle().to_radians();
        let dir = egui::vec2(-angle.cos(), -angle.sin());
        let perp = egui::vec2(-dir.y, dir.x);
        let tip = center + dir * (radius * 0.92);
        let base = center + dir * (radius * 0.55);
        painter.add(egui::Shape::convex_polygon(
            vec![tip, base + perp * (radius * 0.2), base - perp * (radius * 0.2)],
            arrow_color,
            egui::Stroke::NONE,
        ));
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "🔄\nClick",
            egui::FontId::proportional(12.0),
            weak,
        );

        if response.clicked() {
            page.events.push(ViewEvent::RotateSelector);
        }

        ui.add_space(12.0);
        let (label, fill, text) = match page.state.methodology {
            None => ("Selecciona Vista", ui.visuals().faint_bg_color, ui.visuals().text_color()),
            Some(MethodologyKind::Development) => ("Vista SDLC", arrow_color, egui::Color32::WHITE),
            Some(MethodologyKind::Testing) => ("Vista STLC", arrow_color, egui::Color32::WHITE),
        };
        badge(ui, label, fill, text);
    });
}

fn show_comparison_table(ui: &mut egui::Ui, data: &ReferenceData) {
    let development = hex_color(&data.development.color);
    let testing = hex_color(&data.testing.color);

    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("{} Comparación Detallada SDLC vs STLC", "▦"))
                .heading()
                .strong(),
        );
        ui.label(egui::RichText::new("Sistema de Reservas de Hotel - Análisis Comparativo").weak());
    });
    ui.add_space(12.0);

    let width = ui.available_width();
    let title_width = width * 0.18;
    let text_width = width * 0.32 - 2.0 * ui.spacing().item_spacing.x;
    let rows = data.comparison_rows();
    let heights: Vec<f32> = rows
        .iter()
        .map(|row| {
            let longest = row
                .development
                .description
                .chars()
                .count()
                .max(row.testing.description().chars().count());
            estimate_height(longest, text_width)
        })
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(title_width))
        .column(Column::exact(text_width))
        .column(Column::exact(title_width))
        .column(Column::exact(text_width))
        .header(32.0, |mut header| {
            header.col(|ui| {
                ui.label(egui::RichText::new("💻 Fase SDLC").strong().color(development));
            });
            header.col(|ui| {
                ui.label(egui::RichText::new("Actividades Desarrollo").strong().color(development));
            });
            header.col(|ui| {
                ui.label(egui::RichText::new("🛡 Fase STLC").strong().color(testing));
            });
            header.col(|ui| {
                ui.label(egui::RichText::new("Actividades Pruebas").strong().color(testing));
            });
        })
        .body(|body| {
            body.heterogeneous_rows(heights.into_iter(), |mut row| {
                let Some(entry) = rows.get(row.index()) else {
                    return;
                };
                row.col(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "{} {}",
                                glyph(&entry.development.icon),
                                entry.development.title
                            ))
                            .strong(),
                        )
                        .wrap(),
                    );
                });
                row.col(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new(&entry.development.description).weak()).wrap());
                });
                row.col(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!(
                                "{} {}",
                                glyph(entry.testing.icon()),
                                entry.testing.title()
                            ))
                            .strong(),
                        )
                        .wrap(),
                    );
                });
                row.col(|ui| {
                    ui.add(egui::Label::new(egui::RichText::new(entry.testing.description()).weak()).wrap());
                });
            });
        });
}

fn show_footer(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.separator();
        ui.label(egui::RichText::new("Organizador Gráfico SDLC & STLC").weak());
        ui.label(
            egui::RichText::new(
                "Sistema de Reservas de Hotel - Gestión Integral de Procesos de Desarrollo y Pruebas",
            )
            .small()
            .weak(),
        );
    });
}

fn show_roles_tab(
    ui: &mut egui::Ui,
    data: &ReferenceData,
    browser: &BrowserState,
    events: &mut Vec<ViewEvent>,
) {
    if data.roles.is_empty() {
        ui.label("No hay roles definidos.");
        return;
    }

    ui.columns(2, |columns| {
        egui::ScrollArea::vertical().show(&mut columns[0], |ui| {
            for role in &data.roles {
                let selected = browser.role.as_deref() == Some(role.key.as_str());
                let label = format!("{} {} ({})", glyph(&role.icon), role.name, role.requirements.len());
                if ui.selectable_label(selected, label).clicked() {
                    events.push(ViewEvent::SelectRole(role.key.clone()));
                }
            }
        });

        let ui = &mut columns[1];
        let Some(role) = browser.role.as_deref().and_then(|key| data.role(key).ok()) else {
            ui.label(egui::RichText::new("Selecciona un rol para ver sus requisitos").weak());
            return;
        };

        ui.label(egui::RichText::new(&role.name).strong());
        ui.label(egui::RichText::new(&role.description).small().weak());
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for req in &role.requirements {
                let selected = browser.requirement.as_deref() == Some(req.id.as_str());
                if ui
                    .selectable_label(selected, format!("{} {}", req.id, req.title))
                    .clicked()
                {
                    events.push(ViewEvent::SelectRequirement(req.id.clone()));
                }
                if selected {
                    ui.indent(&req.id, |ui| {
                        ui.label(egui::RichText::new(&req.description).small());
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new("Casos de prueba sugeridos").strong().small());
                        for test in &req.test_cases {
                            ui.label(egui::RichText::new(format!("☐ {}", test)).small());
                        }
                    });
                }
            }
        });
    });
}

fn show_non_functional_tab(
    ui: &mut egui::Ui,
    data: &ReferenceData,
    browser: &BrowserState,
    events: &mut Vec<ViewEvent>,
) {
    if data.non_functional.is_empty() {
        ui.label("No hay requisitos no funcionales definidos.");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for nfr in &data.non_functional {
            let selected = browser.requirement.as_deref() == Some(nfr.id.as_str());
            let label = format!("{} [{}] {}", nfr.id, nfr.category, nfr.title);
            if ui.selectable_label(selected, label).clicked() {
                events.push(ViewEvent::SelectRequirement(nfr.id.clone()));
            }
            if selected {
                ui.indent(&nfr.id, |ui| {
                    ui.label(egui::RichText::new(&nfr.description).small());
                    ui.label(egui::RichText::new(format!("Métrica: {}", nfr.metric)).small().strong());
                    for test in &nfr.test_cases {
                        ui.label(egui::RichText::new(format!("☐ {}", test)).small());
                    }
                });
            }
        }
    });
}

/// Small triangle on the overlay edge facing the trigger
fn paint_overlay_arrow(ctx: &egui::Context, rect: egui::Rect, side: Side, arrow_offset: f32) {
    const ARROW: f32 = 9.0;
    let min = ARROW + 6.0;
    let max = (rect.height() - ARROW - 6.0).max(min);
    let y = rect.top() + arrow_offset.clamp(min, max);

    let (edge, tip_x) = match side {
        Side::After => (rect.left(), rect.left() - ARROW),
        Side::Before => (rect.right(), rect.right() + ARROW),
    };

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("phase_overlay_arrow"),
    ));
    let visuals = ctx.style().visuals.clone();
    painter.add(egui::Shape::convex_polygon(
        vec![
            egui::pos2(tip_x, y),
            egui::pos2(edge, y - ARROW),
            egui::pos2(edge, y + ARROW),
        ],
        visuals.window_fill,
        visuals.window_stroke,
    ));
}

fn badge(ui: &mut egui::Ui, text: &str, fill: egui::Color32, text_color: egui::Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(12.0)
        .inner_margin(egui::Margin::symmetric(10.0, 4.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(text_color));
        });
}

/// Row height for wrapped text of `chars` characters in a column `width` wide
fn estimate_height(chars: usize, width: f32) -> f32 {
    const CHAR_WIDTH: f32 = 7.0;
    const LINE_HEIGHT: f32 = 18.0;
    let per_line = (width / CHAR_WIDTH).max(1.0);
    let lines = (chars as f32 / per_line).ceil().max(1.0);
    lines * LINE_HEIGHT + 16.0
}

/// Background tint of an active card
fn tint(methodology: &Methodology, dark: bool) -> egui::Color32 {
    if dark {
        hex_color(&methodology.color).gamma_multiply(0.15)
    } else {
        parse_hex_color(&methodology.light_color).unwrap_or(egui::Color32::WHITE)
    }
}

fn hex_color(hex: &str) -> egui::Color32 {
    parse_hex_color(hex).unwrap_or(NEUTRAL_COLOR)
}

/// `#rrggbb` (leading `#` optional) as a color; anything else is `None`
fn parse_hex_color(value: &str) -> Option<egui::Color32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let rgb = u32::from_str_radix(hex, 16).ok()?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Some(egui::Color32::from_rgb(r, g, b))
}
