use anyhow::Context;
use clap::Parser;
use client_logging::{client_debug, client_info};
use converter_core::{update, AppState, AppViewModel, Msg};

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::ui::constants::{BUSY_REPAINT_INTERVAL, WINDOW_MIN_SIZE, WINDOW_SIZE, WINDOW_TITLE};
use super::{intake, logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file_config = config::load_config(cli.config.as_deref())?;
    let resolved = config::resolve(&cli, file_config)?;
    logging::initialize(resolved.log_level, resolved.log_file.as_deref());
    if let Some(source) = &resolved.source {
        client_info!("Loaded configuration from {:?}", source);
    }
    client_info!("Conversion server: {}", resolved.settings.base_url);

    let runner = EffectRunner::new(resolved.settings).context("failed to start request engine")?;
    let mut app = ConverterApp::new(runner);
    if !cli.files.is_empty() {
        app.dispatch(Msg::FilesAdded(intake::from_paths(cli.files)));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc: &eframe::CreationContext| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}

struct ConverterApp {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
}

impl ConverterApp {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            runner,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.runner.run(effects);
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for msg in self.runner.drain_events() {
            self.dispatch(msg);
        }

        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        if !dropped.is_empty() {
            if self.view.show_upload {
                self.dispatch(Msg::FilesAdded(intake::from_dropped(&dropped)));
            } else {
                client_debug!("Ignoring {} dropped file(s) outside the upload view", dropped.len());
            }
        }

        let files_hovering = ctx.input(|input| !input.raw.hovered_files.is_empty());
        for msg in ui::render::render(ctx, &self.view, files_hovering) {
            self.dispatch(msg);
        }

        if self.state.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
