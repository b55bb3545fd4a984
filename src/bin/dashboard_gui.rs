//! Options Dashboard GUI
//!
//! Interactive dashboard: ticker and expiry selectors, summary cards, and
//! sortable calls and puts tables.

use chrono::NaiveDate;
use eframe::egui;

use options_dashboard::prelude::*;

const CALLS_ACCENT: egui::Color32 = egui::Color32::from_rgb(21, 128, 61);
const CALLS_FILL: egui::Color32 = egui::Color32::from_rgb(220, 252, 231);
const PUTS_ACCENT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);
const PUTS_FILL: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);

struct DashboardApp {
    session: DashboardSession<YahooClient>,

    // Selection
    ticker: &'static str,
    expiries: Vec<NaiveDate>,
    expiry: Option<NaiveDate>,
    calls_sort: TableSort,
    puts_sort: TableSort,

    // Computed
    view: Option<DashboardView>,
    error: Option<String>,
}

impl DashboardApp {
    fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let client = YahooClient::with_config(&config.provider)?;
        let mut app = Self {
            session: DashboardSession::new(client, config),
            ticker: TICKERS[0],
            expiries: Vec::new(),
            expiry: None,
            calls_sort: TableSort::default(),
            puts_sort: TableSort::default(),
            view: None,
            error: None,
        };
        app.load_expiries();
        Ok(app)
    }

    fn load_expiries(&mut self) {
        self.view = None;
        self.error = None;
        match self.session.expirations(self.ticker) {
            Ok(expiries) => {
                self.expiry = expiries.first().copied();
                self.expiries = expiries;
                self.load_view();
            }
            Err(e) => {
                self.expiries.clear();
                self.expiry = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn load_view(&mut self) {
        let Some(expiry) = self.expiry else {
            return;
        };

        // a new selection starts sorted by strike
        self.calls_sort = TableSort::default();
        self.puts_sort = TableSort::default();

        let request = ViewRequest::new(self.ticker, expiry)
            .with_calls_sort(self.calls_sort)
            .with_puts_sort(self.puts_sort);

        match self.session.view_with_offered(&request, &self.expiries) {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                self.view = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn resort(&mut self, side: OptionSide) {
        let sort = match side {
            OptionSide::Call => self.calls_sort,
            OptionSide::Put => self.puts_sort,
        };
        if let Some(view) = self.view.as_mut() {
            if let Err(e) = view.resort(side, sort) {
                self.error = Some(e.to_string());
            }
        }
    }
}

fn summary_card(
    ui: &mut egui::Ui,
    title: &str,
    oi: String,
    volume: String,
    accent: egui::Color32,
    fill: egui::Color32,
) {
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(2.0, accent))
        .rounding(12.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new(title).strong().size(22.0).color(accent));
            ui.add_space(8.0);
            egui::Grid::new(format!("{}_card", title))
                .num_columns(2)
                .spacing([40.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Open Interest:");
                    ui.label(egui::RichText::new(oi).strong().size(18.0).color(accent));
                    ui.end_row();
                    ui.label("Volume:");
                    ui.label(egui::RichText::new(volume).strong().size(18.0).color(accent));
                    ui.end_row();
                });
        });
}

/// Sort selectors plus the table. Returns true when the sort changed.
fn chain_table(
    ui: &mut egui::Ui,
    side: OptionSide,
    table: &DisplayTable,
    options: &[Column],
    sort: &mut TableSort,
) -> bool {
    let before = *sort;
    let id = side.label();

    ui.horizontal(|ui| {
        egui::ComboBox::from_label(format!("Sort {} by:", id))
            .selected_text(sort.column.display_name())
            .show_ui(ui, |ui| {
                for column in options {
                    ui.selectable_value(&mut sort.column, *column, column.display_name());
                }
            });
        egui::ComboBox::from_id_source(format!("{}_order", id))
            .selected_text(sort.order.label())
            .show_ui(ui, |ui| {
                for order in SortOrder::ALL {
                    ui.selectable_value(&mut sort.order, order, order.label());
                }
            });
    });

    egui::ScrollArea::vertical()
        .id_source(format!("{}_scroll", id))
        .max_height(500.0)
        .show(ui, |ui| {
            egui::Grid::new(format!("{}_grid", id))
                .striped(true)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    for header in table.headers() {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for row in &table.rows {
                        for cell in row {
                            ui.label(cell.as_str());
                        }
                        ui.end_row();
                    }
                });
        });

    *sort != before
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("selection").show(ctx, |ui| {
            ui.heading("MAG7 + SPY Options Dashboard");
            ui.separator();

            let mut ticker = self.ticker;
            let mut expiry = self.expiry;

            ui.horizontal(|ui| {
                egui::ComboBox::from_label("Select Stock")
                    .selected_text(ticker)
                    .show_ui(ui, |ui| {
                        for t in TICKERS {
                            ui.selectable_value(&mut ticker, t, t);
                        }
                    });

                egui::ComboBox::from_label("Select Expiry Date")
                    .selected_text(expiry.map(|e| e.to_string()).unwrap_or_default())
                    .show_ui(ui, |ui| {
                        for e in &self.expiries {
                            ui.selectable_value(&mut expiry, Some(*e), e.to_string());
                        }
                    });
            });

            if ticker != self.ticker {
                self.ticker = ticker;
                self.load_expiries();
            } else if expiry != self.expiry {
                self.expiry = expiry;
                self.load_view();
            }

            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error.as_str());
            }
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.small("Data provided by Yahoo Finance");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = self.view.as_ref() else {
                ui.label("Select a stock and expiry to load options data");
                return;
            };

            let mut calls_changed = false;
            let mut puts_changed = false;

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(format!("Summary for {} - Expiry: {}", view.ticker(), view.expiry()));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(format!("Last pulled: {}", view.last_pulled()));
                    });
                });

                ui.columns(2, |cols| {
                    summary_card(
                        &mut cols[0],
                        "Calls",
                        view.summary.calls_oi_display(),
                        view.summary.calls_volume_display(),
                        CALLS_ACCENT,
                        CALLS_FILL,
                    );
                    summary_card(
                        &mut cols[1],
                        "Puts",
                        view.summary.puts_oi_display(),
                        view.summary.puts_volume_display(),
                        PUTS_ACCENT,
                        PUTS_FILL,
                    );
                });

                ui.separator();
                ui.heading("Calls Options Chain");
                calls_changed = chain_table(
                    ui,
                    OptionSide::Call,
                    &view.calls,
                    &view.sort_options(OptionSide::Call),
                    &mut self.calls_sort,
                );

                ui.separator();
                ui.heading("Puts Options Chain");
                puts_changed = chain_table(
                    ui,
                    OptionSide::Put,
                    &view.puts,
                    &view.sort_options(OptionSide::Put),
                    &mut self.puts_sort,
                );
            });

            if calls_changed {
                self.resort(OptionSide::Call);
            }
            if puts_changed {
                self.resort(OptionSide::Put);
            }
        });
    }
}

fn main() {
    options_dashboard::init_tracing();

    let app = match DashboardConfig::load().and_then(|config| DashboardApp::new(&config)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title("MAG7 + SPY Options Dashboard"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Options Dashboard",
        options,
        Box::new(|_cc| Box::new(app)),
    ) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
