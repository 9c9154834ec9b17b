use serde::Serialize;

use crate::models::{
    indicator::Study,
    request_params::{ChartRequest, ImageFormat, Theme},
};

/// Request body of the advanced-chart endpoint.
///
/// The API takes a flat object, so this borrows the pieces of a
/// [`ChartRequest`] and lays them out the way the endpoint expects.
#[derive(Debug, Serialize)]
pub struct ChartImgPayload<'a> {
    pub symbol: &'a str,
    pub interval: &'a str,
    pub bars_back: u32,
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
    pub studies: &'a [Study],
    pub format: ImageFormat,
    pub extended_hours: bool,
    pub session: &'a str,
    pub hide_legend: bool,
    pub hide_side_toolbar: bool,
    pub allow_symbol_change: bool,
    pub save_image: bool,
    pub hide_volume: bool,
}

impl<'a> From<&'a ChartRequest> for ChartImgPayload<'a> {
    fn from(req: &'a ChartRequest) -> Self {
        let render = &req.render;
        Self {
            symbol: req.symbol.as_str(),
            interval: &req.interval,
            bars_back: req.bars_back,
            width: render.width,
            height: render.height,
            theme: render.theme,
            studies: &req.studies,
            format: render.format,
            extended_hours: render.extended_hours,
            session: &render.session,
            hide_legend: render.hide_legend,
            hide_side_toolbar: render.hide_side_toolbar,
            allow_symbol_change: render.allow_symbol_change,
            save_image: render.save_image,
            hide_volume: render.hide_volume,
        }
    }
}
