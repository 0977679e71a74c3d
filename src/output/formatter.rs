//! Output formatters for screening reports

use crate::analyzer::{ExperienceBand, ScreeningReport};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::experience::ExperienceVerdict;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;

    /// One entry per resume of a batch run
    fn format_batch(&self, reports: &[ScreeningReport]) -> Result<String>;

    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for machine consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn duration_text(years: u32, months: u32) -> String {
    let plural = |n: u32| if n == 1 { "" } else { "s" };
    match (years, months) {
        (0, m) => format!("{} month{}", m, plural(m)),
        (y, 0) => format!("{} year{}", y, plural(y)),
        (y, m) => format!("{} year{} {} month{}", y, plural(y), m, plural(m)),
    }
}

fn total_text(verdict: &ExperienceVerdict) -> String {
    duration_text(verdict.total_years, verdict.total_months)
}

fn required_text(verdict: &ExperienceVerdict) -> String {
    if verdict.required_in_months() == 0 {
        "none stated".to_string()
    } else {
        duration_text(verdict.jd_required_years, verdict.jd_required_months)
    }
}

fn file_label(path: Option<&str>) -> String {
    path.and_then(|p| Path::new(p).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "-".to_string())
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict(&self, passed: bool) -> String {
        let (badge, color) = if passed {
            ("PASS", Color::Green)
        } else {
            ("FAIL", Color::Red)
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn band_color(band: ExperienceBand) -> Color {
        match band {
            ExperienceBand::Fresher => Color::Yellow,
            ExperienceBand::Intermediate => Color::Cyan,
            ExperienceBand::Experienced => Color::Green,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let experience = &report.experience;
        let education = &report.education;

        output.push_str(&self.format_header("RESUME SCREENING", 1));
        if report.resume_path.is_some() {
            output.push_str(&format!(
                "Resume: {} | Job: {}\n",
                file_label(report.resume_path.as_deref()),
                file_label(report.job_path.as_deref())
            ));
        }

        output.push_str(&self.format_header("Experience", 2));
        output.push_str(&format!(
            "Total: {} ({})\n",
            total_text(experience),
            self.colorize(&report.experience_band.to_string(), Self::band_color(report.experience_band))
        ));
        output.push_str(&format!("Required: {}\n", required_text(experience)));
        output.push_str(&format!(
            "Meets requirement: {}\n",
            self.format_verdict(experience.meets_requirement)
        ));

        if self.detailed && !experience.experience_ranges.is_empty() {
            output.push_str(&self.format_header("Ranges", 3));
            for record in &experience.experience_ranges {
                output.push_str(&format!(
                    "  • {} - {} ({} month{})\n",
                    record.start_label,
                    record.end_label,
                    record.months,
                    if record.months == 1 { "" } else { "s" }
                ));
            }
        }

        output.push_str(&self.format_header("Education", 2));
        output.push_str(&format!("Required: {}\n", list_or_none(&education.jd_detected)));
        output.push_str(&format!("Found: {}\n", list_or_none(&education.resume_detected)));
        output.push_str(&format!("Matched: {}\n", self.format_verdict(education.matched)));

        if !education.missing_groups.is_empty() {
            output.push_str(&self.format_header("Missing", 3));
            for missing in &education.missing_groups {
                output.push_str(&format!("  • {}\n", self.colorize(missing, Color::Yellow)));
            }
        }

        if self.detailed {
            output.push_str(&format!("\nProcessing time: {}ms\n", report.processing_time_ms));
        }

        Ok(output)
    }

    fn format_batch(&self, reports: &[ScreeningReport]) -> Result<String> {
        let mut output = self.format_header(&format!("BATCH SCREENING ({} resumes)", reports.len()), 1);

        for report in reports {
            output.push_str(&format!(
                "{:<32} {:>18}  exp {}  edu {}\n",
                file_label(report.resume_path.as_deref()),
                total_text(&report.experience),
                self.format_verdict(report.experience.meets_requirement),
                self.format_verdict(report.education.matched)
            ));
        }

        let passing = reports
            .iter()
            .filter(|r| r.experience.meets_requirement && r.education.matched)
            .count();
        output.push_str(&format!(
            "\n{}\n",
            self.colorize(&format!("{} of {} pass both checks", passing, reports.len()), Color::Cyan)
        ));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn format_batch(&self, reports: &[ScreeningReport]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(reports)?)
        } else {
            Ok(serde_json::to_string(reports)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn check_mark(passed: bool) -> &'static str {
        if passed {
            "✅"
        } else {
            "❌"
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let experience = &report.experience;
        let education = &report.education;

        output.push_str("# Resume Screening Report\n\n");

        if self.include_metadata && report.resume_path.is_some() {
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}` | **Processing Time:** {}ms\n\n",
                file_label(report.resume_path.as_deref()),
                file_label(report.job_path.as_deref()),
                report.processing_time_ms
            ));
        }

        output.push_str("## Experience\n\n");
        output.push_str(&format!(
            "**Total:** {} ({})\n\n",
            total_text(experience),
            report.experience_band
        ));
        output.push_str(&format!("**Required:** {}\n\n", required_text(experience)));
        output.push_str(&format!(
            "**Meets requirement:** {}\n\n",
            Self::check_mark(experience.meets_requirement)
        ));

        if !experience.experience_ranges.is_empty() {
            output.push_str("| Start | End | Months |\n");
            output.push_str("|-------|-----|--------|\n");
            for record in &experience.experience_ranges {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    record.start_label, record.end_label, record.months
                ));
            }
            output.push('\n');
        }

        output.push_str("## Education\n\n");
        output.push_str(&format!("**Required:** {}\n\n", list_or_none(&education.jd_detected)));
        output.push_str(&format!("**Found:** {}\n\n", list_or_none(&education.resume_detected)));
        output.push_str(&format!("**Matched:** {}\n\n", Self::check_mark(education.matched)));

        if !education.missing_groups.is_empty() {
            output.push_str("### Missing\n\n");
            for missing in &education.missing_groups {
                output.push_str(&format!("- {}\n", missing));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn format_batch(&self, reports: &[ScreeningReport]) -> Result<String> {
        let mut output = String::from("# Batch Screening Report\n\n");
        output.push_str("| Resume | Experience | Band | Experience OK | Education OK | Missing |\n");
        output.push_str("|--------|------------|------|---------------|--------------|---------|\n");

        for report in reports {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                file_label(report.resume_path.as_deref()),
                total_text(&report.experience),
                report.experience_band,
                Self::check_mark(report.experience.meets_requirement),
                Self::check_mark(report.education.matched),
                list_or_none(&report.education.missing_groups)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_batch_report(&self, reports: &[ScreeningReport], format: OutputFormat) -> Result<String> {
        self.formatter(format).format_batch(reports)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
