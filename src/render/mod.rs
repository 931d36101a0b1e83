pub mod html;

pub use html::render_html_report;

use crate::model::DashboardData;

pub fn render_json(data: &DashboardData) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}
