// Copyright 2026 Drivegate Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drivegate server - Main entry point.

mod app;
mod config;

use anyhow::Result;
use app::App;
use config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "drivegate_core=info,drivegate_api=info,drivegate_server=info".to_string());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Drivegate server starting...");

    let config = Config::load()?;

    let app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
