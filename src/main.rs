// Mail Insight - Email analysis dashboard
// Copyright (C) 2026  Asa V. Schaeffer
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use mimalloc::MiMalloc;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod analysis;
mod api;
mod app;
mod bridge;
mod config;
mod controller;
mod error;
mod model;
mod state;
#[cfg(test)]
mod test_support;
mod ui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mail_insight=info".into()),
        )
        .init();

    let config = config::load().unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        config::DashboardConfig::default()
    });
    info!("Using analysis service at {}", config.base_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mail Insight",
        options,
        Box::new(move |cc| {
            let service = api::HttpEmailService::new(&config.base_url)?;
            let app = app::MailInsightApp::new(cc, &config, Arc::new(service))?;
            Ok(Box::new(app))
        }),
    )
}
