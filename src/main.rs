// Copyright 2025 Kirky.X
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

use kitespotrs::application::use_cases::crawl_use_case::CrawlUseCase;
use kitespotrs::config::settings::Settings;
use kitespotrs::engines::reqwest_engine::ReqwestEngine;
use kitespotrs::infrastructure::export;
use kitespotrs::infrastructure::geocoding::NominatimGeocoder;
use kitespotrs::utils::robots::RobotsChecker;
use kitespotrs::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行爬取
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting kitespotrs...");

    // 2. Load configuration; invalid configuration aborts startup
    let settings = Arc::new(Settings::new()?);

    // 3. Wire up the fetch engine, geocoder and robots checker
    let engine = Arc::new(ReqwestEngine::new(&settings.fetch.user_agent)?);
    let geocoder = Arc::new(NominatimGeocoder::new(
        settings.geocode.endpoint.clone(),
        &settings.fetch.user_agent,
        Duration::from_secs(settings.geocode.timeout_secs),
    ));
    let robots = Arc::new(RobotsChecker::new());

    // 4. Run the crawl
    let use_case = CrawlUseCase::new(settings.clone(), engine, geocoder, robots)?;
    let spots = use_case.run().await?;

    // 5. Export results
    export::write_json(&spots, Path::new(&settings.output.json_path))?;
    export::write_csv(&spots, Path::new(&settings.output.csv_path))?;

    info!(
        "Done: {} spots exported to {} and {}",
        spots.len(),
        settings.output.json_path,
        settings.output.csv_path
    );
    Ok(())
}
