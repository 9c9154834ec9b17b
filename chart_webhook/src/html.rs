//! Browser preview of a run: one card per stored chart with the image inlined
//! as a data URI.

use std::{fmt::Write, path::Path};

use chart_ingestor::{RunReport, models::summary::EXPECTED_CHARTS};

const STYLE: &str = r#"
body { background: #0a0a0a; color: #fff; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 20px; line-height: 1.6; }
.header { text-align: center; margin-bottom: 30px; padding: 30px; background: linear-gradient(135deg, #1a1a1a, #2a2a2a); border-radius: 15px; }
h1 { margin: 0; font-size: 2.5em; color: #4CAF50; }
.status { margin-top: 15px; font-size: 1.2em; }
.chart-container { margin: 30px auto; padding: 25px; background: #1a1a1a; border-radius: 15px; max-width: 1920px; }
.chart-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; padding-bottom: 15px; border-bottom: 1px solid #333; }
h3 { margin: 0; color: #4CAF50; font-size: 1.5em; }
.api-badge { display: inline-block; background: #4CAF50; color: #000; padding: 3px 8px; border-radius: 5px; font-size: 0.6em; margin-left: 10px; }
.indicators { margin: 15px 0; color: #999; }
.indicator-badge { display: inline-block; background: #2a2a2a; padding: 5px 12px; border-radius: 20px; margin: 3px; font-size: 0.85em; border: 1px solid #444; }
img { width: 100%; border: 2px solid #333; border-radius: 10px; margin-top: 15px; }
.success { color: #4CAF50; font-weight: bold; }
.warning { color: #ff9800; font-weight: bold; }
.metadata { display: flex; gap: 20px; font-size: 0.9em; color: #666; }
.footer { text-align: center; margin-top: 40px; color: #666; }
"#;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the preview page for `report`. `ticker` is the raw path segment
/// the caller asked for.
pub fn render_report(ticker: &str, report: &RunReport, output_dir: &Path) -> String {
    let (status_class, status_text) = if report.success {
        ("success", format!("All {EXPECTED_CHARTS} charts generated successfully"))
    } else {
        (
            "warning",
            format!("{}/{EXPECTED_CHARTS} charts generated", report.success_count),
        )
    };

    let mut page = String::new();
    // write! into a String cannot fail
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Chart Results for {ticker}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="header">
<h1>Chart Generation Results</h1>
<div class="status"><strong>{ticker}</strong> &rarr; {symbol} | Generated: {generated}</div>
<div class="status">Status: <span class="{status_class}">{status_text}</span></div>
</div>
"#,
        ticker = escape_html(ticker),
        symbol = escape_html(report.symbol.as_str()),
        generated = report.timestamp.format("%Y-%m-%d %H:%M:%S"),
    );

    for (label, chart) in &report.charts {
        let badges = chart
            .indicators
            .iter()
            .map(|name| format!(r#"<span class="indicator-badge">{}</span>"#, escape_html(name)))
            .collect::<Vec<_>>()
            .join(" ");
        let extended = if chart.extended_hours {
            "<span>Extended Hours</span>"
        } else {
            ""
        };

        let _ = write!(
            page,
            r#"<div class="chart-container">
<div class="chart-header">
<h3>{description} <span class="api-badge">API {api_version}</span></h3>
<div class="metadata">
<span>Interval: {interval}</span>
<span>Bars: {bars}</span>
<span>Size: {size:.1} KB</span>
{extended}
</div>
</div>
<div class="indicators"><strong>Technical Indicators:</strong><br>{badges}</div>
<img src="data:{mime};base64,{data}" alt="{label} chart">
</div>
"#,
            description = escape_html(&chart.description),
            api_version = escape_html(&chart.api_version.to_uppercase()),
            interval = escape_html(&chart.interval),
            bars = chart.bars_back,
            size = chart.size_kb,
            mime = chart.format.mime_type(),
            data = chart.base64_image,
            label = escape_html(label),
        );
    }

    let _ = write!(
        page,
        r#"<div class="footer">{service} | Powered by TradingView Charts<br>Output Directory: {dir}</div>
</body>
</html>
"#,
        service = crate::routes::SERVICE_NAME,
        dir = escape_html(&output_dir.display().to_string()),
    );

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x&'y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;&#39;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("NVDA"), "NVDA");
    }
}
