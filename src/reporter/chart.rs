use serde::Serialize;

use crate::errors::SitelensResult;
use crate::models::{ChartData, MAX_SCORE};
use crate::utils::json_for_script;

/// The `{labels, data, colors}` payload the page hands to Chart.js.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload<'a> {
    pub labels: &'a [String],
    pub data: &'a [u8],
    pub colors: &'a [String],
}

impl<'a> From<&'a ChartData> for ChartPayload<'a> {
    fn from(chart: &'a ChartData) -> Self {
        Self {
            labels: &chart.labels,
            data: &chart.data,
            colors: &chart.colors,
        }
    }
}

/// Pretty JSON of the payload, for writing alongside the HTML page.
pub fn payload_json(chart: &ChartData) -> SitelensResult<String> {
    Ok(serde_json::to_string_pretty(&ChartPayload::from(chart))?)
}

/// Inline script that draws the score bar chart into `canvas_id`.
pub fn render_script(chart: &ChartData, canvas_id: &str, chart_js_src: &str) -> SitelensResult<String> {
    let payload = json_for_script(&ChartPayload::from(chart))?;

    Ok(format!(
        r#"    <script src="{src}"></script>
    <script>
        const chartData = {payload};

        document.addEventListener('DOMContentLoaded', function () {{
            const canvas = document.getElementById({canvas});
            if (!canvas || typeof Chart === 'undefined') {{
                return;
            }}
            new Chart(canvas.getContext('2d'), {{
                type: 'bar',
                data: {{
                    labels: chartData.labels,
                    datasets: [{{
                        data: chartData.data,
                        backgroundColor: chartData.colors,
                        borderRadius: 6,
                        borderWidth: 0
                    }}]
                }},
                options: {{
                    responsive: true,
                    scales: {{
                        y: {{
                            min: 0,
                            max: {max},
                            ticks: {{ stepSize: 1, precision: 0 }}
                        }}
                    }},
                    plugins: {{
                        legend: {{ display: false }},
                        tooltip: {{
                            callbacks: {{
                                label: function (ctx) {{ return ctx.parsed.y + '/{max}'; }}
                            }}
                        }}
                    }}
                }}
            }});
        }});
    </script>"#,
        src = crate::utils::escape_html(chart_js_src),
        payload = payload,
        canvas = json_for_script(&canvas_id)?,
        max = MAX_SCORE,
    ))
}
