//! Printable HTML report, the stand-in for PDF export.
//!
//! The document embeds the SVG plan and a room schedule. Metrics and
//! compliance sections appear only when the [`ExportContext`] carries them.

use crate::codes::RoomType;
use crate::compliance::{ComplianceIssue, ComplianceReport, ComplianceStatus};
use crate::layout::LayoutData;
use crate::metrics::PerformanceMetrics;

use super::{escape_xml, svg, ExportContext};

const STYLE: &str = "body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem; color: #222; }
    h1 { margin-bottom: 0.2rem; }
    .meta { color: #666; margin-top: 0; }
    section { margin-top: 2rem; page-break-inside: avoid; }
    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #ccc; padding: 0.35rem 0.6rem; text-align: left; }
    th { background: #f2f2f2; }
    td.num { text-align: right; }
    .plan svg { max-width: 100%; height: auto; }
    .status { display: inline-block; padding: 0.2rem 0.6rem; border-radius: 4px; font-weight: bold; }
    .status-compliant { background: #d4edda; }
    .status-warning { background: #fff3cd; }
    .status-non-compliant, .status-error { background: #f8d7da; }
    @media print { body { margin: 0; } }";

/// Render the report document.
pub fn encode(layout: &LayoutData, ctx: &ExportContext<'_>) -> String {
    let title = escape_xml(&ctx.project_name);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} - Floor Plan Report</title>\n", title));
    html.push_str(&format!("<style>\n    {}\n</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!(
        "<p class=\"meta\">Generated {} &middot; {} rooms &middot; {:.0} sq ft</p>\n",
        ctx.exported_at.format("%Y-%m-%d %H:%M UTC"),
        layout.rooms.len(),
        layout.total_area()
    ));

    html.push_str("<section class=\"plan\">\n<h2>Floor Plan</h2>\n");
    html.push_str(&svg::render_svg_element(layout, &ctx.options));
    html.push_str("</section>\n");

    push_room_schedule(&mut html, layout);

    if let Some(metrics) = ctx.metrics {
        push_metrics(&mut html, metrics);
    }
    if let Some(report) = ctx.compliance {
        push_compliance(&mut html, report);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_room_schedule(html: &mut String, layout: &LayoutData) {
    html.push_str("<section class=\"rooms\">\n<h2>Room Schedule</h2>\n<table>\n");
    html.push_str("<tr><th>Room</th><th>Type</th><th>Area (sq ft)</th><th>Width (ft)</th><th>Height (ft)</th></tr>\n");
    for room in &layout.rooms {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{:.1}</td><td class=\"num\">{:.1}</td><td class=\"num\">{:.1}</td></tr>\n",
            escape_xml(&room.name),
            RoomType::classify(&room.name),
            room.area,
            room.width,
            room.height
        ));
    }
    html.push_str("</table>\n</section>\n");
}

fn push_metrics(html: &mut String, metrics: &PerformanceMetrics) {
    html.push_str("<section class=\"metrics\">\n<h2>Performance Metrics</h2>\n<table>\n");
    let rows = [
        ("Circulation efficiency", format!("{} / 100", metrics.circulation_efficiency)),
        ("Daylight", format!("{:.1} hours", metrics.daylight_hours)),
        ("Energy efficiency", format!("{} / 100", metrics.energy_efficiency)),
        ("Space utilization", format!("{} / 100", metrics.space_utilization)),
        ("Accessibility", format!("{} / 100", metrics.accessibility_score)),
    ];
    for (label, value) in rows {
        html.push_str(&format!("<tr><th>{}</th><td class=\"num\">{}</td></tr>\n", label, value));
    }
    html.push_str("</table>\n");

    if !metrics.recommendations.is_empty() {
        html.push_str("<h3>Recommendations</h3>\n<ul>\n");
        for rec in &metrics.recommendations {
            html.push_str(&format!(
                "<li><strong>[{}] {}</strong>: {}</li>\n",
                rec.priority,
                escape_xml(&rec.title),
                escape_xml(&rec.description)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}

fn push_compliance(html: &mut String, report: &ComplianceReport) {
    let result = &report.result;
    let status = report.status();

    html.push_str("<section class=\"compliance\">\n<h2>Code Compliance</h2>\n");
    html.push_str(&format!(
        "<p><span class=\"status status-{}\">{}</span> &middot; compliance rate {}%</p>\n",
        status.key(),
        status.display_name(),
        report.compliance_rate
    ));
    html.push_str(&format!(
        "<p>{} checks: {} passed, {} failed, {} warnings</p>\n",
        result.summary.total_checks, result.summary.passed, result.summary.failed, result.summary.warnings
    ));

    push_issue_table(html, "Issues", &result.issues);
    push_issue_table(html, "Warnings", &result.warnings);

    if !report.recommendations.is_empty() {
        html.push_str("<h3>Recommendations</h3>\n");
        for rec in &report.recommendations {
            html.push_str(&format!(
                "<h4>{} ({})</h4>\n<p>{}</p>\n<ul>\n",
                escape_xml(&rec.title),
                rec.priority,
                escape_xml(&rec.description)
            ));
            for action in &rec.actions {
                html.push_str(&format!("<li>{}</li>\n", escape_xml(action)));
            }
            html.push_str("</ul>\n");
        }
    }

    html.push_str("<h3>Next Steps</h3>\n<ol>\n");
    for step in &report.next_steps {
        html.push_str(&format!("<li>{}</li>\n", escape_xml(step)));
    }
    html.push_str("</ol>\n");

    if status == ComplianceStatus::Compliant {
        html.push_str("<p>No issues found for the selected codes.</p>\n");
    }
    html.push_str("</section>\n");
}

fn push_issue_table(html: &mut String, heading: &str, issues: &[ComplianceIssue]) {
    if issues.is_empty() {
        return;
    }
    html.push_str(&format!("<h3>{}</h3>\n<table>\n", heading));
    html.push_str("<tr><th>Code</th><th>Location</th><th>Required</th><th>Actual</th><th>Message</th></tr>\n");
    for issue in issues {
        let unit = issue.unit.as_deref().unwrap_or("");
        let fmt_value = |v: Option<f64>| v.map(|v| format!("{:.1} {}", v, unit)).unwrap_or_default();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{}</td></tr>\n",
            escape_xml(&issue.code),
            escape_xml(&issue.location),
            escape_xml(fmt_value(issue.required).trim()),
            escape_xml(fmt_value(issue.actual).trim()),
            escape_xml(&issue.message)
        ));
    }
    html.push_str("</table>\n");
}
