//! StadtKompass.
//!
//! Interaktiver Kartenbegleiter auf Basis von egui: Wetter, POIs,
//! Verkehrslage, OePNV-Abfahrten und Routenplanung ueber externe
//! Web-Dienste.

use eframe::egui;
use stadt_kompass::{
    app::JobRunner, providers::build_http_client, ui, AppController, AppIntent, AppOptions,
    AppState, MapLayers, Providers,
};
use std::sync::mpsc::Receiver;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("StadtKompass v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 800.0])
                .with_title("StadtKompass"),
            ..Default::default()
        };

        eframe::run_native(
            "StadtKompass",
            options,
            Box::new(|cc| {
                let app = CompanionApp::new(&cc.egui_ctx).map_err(|e| {
                    anyhow::anyhow!("Initialisierung fehlgeschlagen: {e:#}")
                })?;
                Ok(Box::new(app))
            }),
        )
    }
}

/// Haupt-Anwendungsstruktur.
struct CompanionApp {
    state: AppState,
    controller: AppController,
    jobs: JobRunner,
    job_rx: Receiver<AppIntent>,
    layers: MapLayers,
}

impl CompanionApp {
    fn new(ctx: &egui::Context) -> anyhow::Result<Self> {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = AppOptions::config_path();
        let app_options = AppOptions::load_from_file(&config_path);

        let providers = Providers::live(&app_options)?;
        let (jobs, job_rx) = JobRunner::new(providers, ctx.clone());
        let layers = MapLayers::new(&app_options, build_http_client()?, ctx.clone());

        let state = AppState::new(app_options);

        let mut app = Self {
            state,
            controller: AppController::new(),
            jobs,
            job_rx,
            layers,
        };

        // Wetter und POIs fuer die Startposition sofort laden.
        app.process_events(vec![
            AppIntent::RefreshWeatherRequested,
            AppIntent::RefreshPoisRequested,
        ]);

        Ok(app)
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self
                .controller
                .handle_intent(&mut self.state, &self.jobs, event)
            {
                log::error!("Event handling failed: {e:#}");
            }
        }
    }

    /// Uebernimmt abgeschlossene Hintergrund-Jobs als Intents.
    fn drain_job_completions(&mut self) {
        let mut completions = Vec::new();
        while let Ok(intent) = self.job_rx.try_recv() {
            completions.push(intent);
        }
        self.process_events(completions);
    }

    /// Haelt den Radar-Layer synchron zum Frame-Template im State.
    fn sync_radar_layer(&mut self) {
        self.layers.sync_radar(
            self.state.view.radar_tile_template.as_deref(),
            self.state.options.radar_overlay_opacity,
        );
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events
            || self.jobs.has_pending()
            || self.layers.has_pending()
            || ctx.input(|i| i.pointer.is_moving())
        {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for CompanionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.drain_job_completions();

        let mut events = Vec::new();
        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_toolbar(ctx, &self.state));
        events.extend(ui::render_sidebar(ctx, &mut self.state));
        events.extend(ui::render_route_panel(ctx, &mut self.state));
        events.extend(ui::render_map_view(ctx, &self.state, &mut self.layers));

        let has_meaningful_events = events
            .iter()
            .any(|e| !matches!(e, AppIntent::ViewportResized { .. }));

        self.process_events(events);

        self.sync_radar_layer();

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}
