use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::{
    io::sink::{ChartSink, SinkError},
    models::{
        chart::{ChartFailure, ChartImage, ChartResult, size_kb},
        request_params::ChartRequest,
    },
    providers::ChartProvider,
    requests::{FILE_TIMESTAMP_FORMAT, file_component},
};

/// Fetches one chart, stores it, and returns the outcome.
///
/// Remote failures (non-200 answers, transport errors, empty bodies) come back
/// as `Ok(ChartResult::Failure)`. Only a failure to store the image is an
/// `Err`, since it means the output directory is unusable for the whole run.
/// No retries happen here.
pub async fn fetch_chart(
    provider: &dyn ChartProvider,
    sink: &dyn ChartSink,
    request: &ChartRequest,
    description: &str,
) -> Result<ChartResult, SinkError> {
    info!(
        "Generating {} chart for {} with {} bars",
        request.interval, request.symbol, request.bars_back
    );

    let payload = match provider.fetch_chart(request).await {
        Ok(payload) if !payload.is_empty() => payload,
        Ok(_) => {
            error!("Chart API returned an empty {} image", request.interval);
            return Ok(ChartResult::Failure(failure(
                request,
                "chart API returned an empty image".to_string(),
                None,
            )));
        }
        Err(e) => {
            match e.details() {
                Some(details) => error!("{e} - {details}"),
                None => error!("Error generating {} chart: {e}", request.interval),
            }
            return Ok(ChartResult::Failure(failure(
                request,
                e.to_string(),
                e.details(),
            )));
        }
    };

    let file_name = image_file_name(request, Local::now());
    let local_path = sink.write_image(&file_name, payload.as_bytes()).await?;
    let base64_image = general_purpose::STANDARD.encode(payload.as_bytes());

    info!(
        "Successfully generated {} chart ({} bytes) at {}",
        request.interval,
        payload.len(),
        local_path.display()
    );

    Ok(ChartResult::Success(ChartImage {
        interval: request.interval.clone(),
        description: description.to_string(),
        base64_image,
        format: request.render.format,
        local_path,
        size_bytes: payload.len() as u64,
        size_kb: size_kb(payload.len()),
        indicators: request.indicator_names(),
        bars_back: request.bars_back,
        extended_hours: request.render.extended_hours,
        api_version: provider.api_version().to_string(),
    }))
}

/// `{SYMBOL}_{interval}_{timestamp}.{ext}`, e.g. `NASDAQ_NVDA_1D_20250101_093000_123.png`.
pub fn image_file_name(request: &ChartRequest, at: DateTime<Local>) -> String {
    format!(
        "{}_{}_{}.{}",
        file_component(&request.symbol.file_stem()),
        file_component(&request.interval),
        at.format(FILE_TIMESTAMP_FORMAT),
        request.render.format.extension()
    )
}

fn failure(request: &ChartRequest, error: String, details: Option<String>) -> ChartFailure {
    ChartFailure {
        interval: request.interval.clone(),
        error,
        details,
        attempted_intervals: vec![request.interval.clone()],
    }
}
