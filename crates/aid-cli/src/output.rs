// Rust guideline compliant 2026-10-16

//! Output formatting module for the aid CLI.
//!
//! Every command result has a JSON, table and plain rendering. JSON output
//! uses the same envelopes a transport would send.

use aid_app::approval::ApprovalPlan;
use aid_app::ratings::RatingSummary;
use aid_app::tickets::ReplyPlan;
use aid_app::{AppError, ErrorEnvelope, NearbyResponse, SuccessEnvelope};
use aid_core::{AccessDecision, Action, Config, OutputFormat, ResourceKind, SideEffect};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Outcome of a `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReport {
    pub resource: ResourceKind,
    pub action: Action,
    #[serde(flatten)]
    pub decision: AccessDecision,
}

/// Outcome of a `transition` command.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReport {
    pub resource: ResourceKind,
    pub id: String,
    pub from: String,
    pub to: String,
    pub side_effects: Vec<SideEffect>,
    /// Whether the snapshot file was rewritten.
    pub written: bool,
}

/// Output formatter trait.
///
/// Defines the interface for rendering command results in different
/// output formats.
pub trait OutputFormatter {
    /// Formats the result of a nearby search.
    fn format_nearby(&self, response: &NearbyResponse) -> String;

    /// Formats a policy decision.
    fn format_decision(&self, report: &DecisionReport) -> String;

    /// Formats an applied or planned status change.
    fn format_transition(&self, report: &TransitionReport) -> String;

    /// Formats a validated ticket reply.
    fn format_reply(&self, plan: &ReplyPlan) -> String;

    /// Formats a member's rating summary.
    fn format_ratings(&self, summary: &RatingSummary) -> String;

    /// Formats an approval decision.
    fn format_approval(&self, plan: &ApprovalPlan) -> String;

    /// Formats the effective configuration.
    fn format_config(&self, config: &Config) -> String;

    /// Formats a command failure.
    fn format_error(&self, error: &anyhow::Error) -> String;
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|_| json!({ "error": "Failed to serialize output" }).to_string())
}

fn side_effect_text(effect: &SideEffect) -> String {
    match effect {
        SideEffect::SetResolvedAt { at } => format!("resolved_at = {}", at.to_rfc3339()),
        SideEffect::SetTicketStatus { ticket_id, from, to } => {
            format!("ticket {ticket_id}: {from} -> {to}")
        }
    }
}

/// JSON output formatter.
///
/// Wraps results in `{"data": ...}` and failures in the error envelope.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_nearby(&self, response: &NearbyResponse) -> String {
        pretty(response)
    }

    fn format_decision(&self, report: &DecisionReport) -> String {
        pretty(&SuccessEnvelope::new(report))
    }

    fn format_transition(&self, report: &TransitionReport) -> String {
        pretty(&SuccessEnvelope::new(report))
    }

    fn format_reply(&self, plan: &ReplyPlan) -> String {
        pretty(&SuccessEnvelope::new(plan))
    }

    fn format_ratings(&self, summary: &RatingSummary) -> String {
        pretty(summary)
    }

    fn format_approval(&self, plan: &ApprovalPlan) -> String {
        pretty(&json!({
            "message": plan.message(),
            "data": plan,
        }))
    }

    fn format_config(&self, config: &Config) -> String {
        pretty(config)
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        match error.downcast_ref::<AppError>() {
            Some(app) => pretty(&ErrorEnvelope::from_error(app)),
            None => json!({ "error": error.to_string() }).to_string(),
        }
    }
}

/// Table output formatter.
///
/// Formats results as human-readable tables with colors and alignment.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let mut buffer = Buffer::ansi();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{text}");
        let _ = buffer.reset();
        String::from_utf8_lossy(buffer.as_slice()).to_string()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_nearby(&self, response: &NearbyResponse) -> String {
        let params = &response.search_params;
        let heading = format!(
            "{} post(s) within {} km of ({}, {})",
            response.count, params.radius_km, params.latitude, params.longitude
        );
        if response.data.is_empty() {
            return format!("{heading}\nNo help posts found.");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Distance (km)", "Type", "Category", "Title"]);
        for nearby in &response.data {
            let post = &nearby.item;
            builder.push_record([
                post.id.clone(),
                format!("{:.2}", nearby.distance_km),
                post.post_type.to_string(),
                post.category.clone(),
                post.title.clone(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        format!("{heading}\n{table}")
    }

    fn format_decision(&self, report: &DecisionReport) -> String {
        let verdict = if report.decision.allowed {
            self.paint("ALLOW", Color::Green)
        } else {
            self.paint("DENY", Color::Red)
        };
        format!(
            "{verdict}  {} {}\nReason:  {}",
            report.action, report.resource, report.decision.reason
        )
    }

    fn format_transition(&self, report: &TransitionReport) -> String {
        let mut output = String::new();
        output.push_str(&format!("Resource:  {} {}\n", report.resource, report.id));
        output.push_str(&format!("Status:    {} -> {}\n", report.from, report.to));
        for effect in &report.side_effects {
            output.push_str(&format!("Effect:    {}\n", side_effect_text(effect)));
        }
        let state = if report.written {
            self.paint("written", Color::Green)
        } else {
            self.paint("dry run", Color::Yellow)
        };
        output.push_str(&format!("Snapshot:  {state}"));
        output
    }

    fn format_reply(&self, plan: &ReplyPlan) -> String {
        let mut output = String::new();
        output.push_str(&format!("Ticket:    {}\n", plan.message.ticket_id));
        output.push_str(&format!("From:      {}\n", plan.message.user_id));
        output.push_str(&format!("Internal:  {}\n", plan.message.is_internal));
        output.push_str(&format!("Message:   {}", plan.message.message));
        for effect in &plan.side_effects {
            output.push_str(&format!("\nEffect:    {}", side_effect_text(effect)));
        }
        output
    }

    fn format_ratings(&self, summary: &RatingSummary) -> String {
        let heading = format!(
            "Average {:.1} over {} rating(s)",
            summary.average_rating, summary.total_ratings
        );
        if summary.data.is_empty() {
            return heading;
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Rating", "Rater", "Post", "Comment", "Created"]);
        for rating in &summary.data {
            builder.push_record([
                rating.id.clone(),
                rating.rating.to_string(),
                rating.rater_id.clone(),
                rating.help_post_id.clone().unwrap_or_default(),
                rating.comment.clone().unwrap_or_default(),
                rating.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        format!("{heading}\n{table}")
    }

    fn format_approval(&self, plan: &ApprovalPlan) -> String {
        let mut output = self.paint(&plan.message(), Color::Green);
        output.push_str(&format!("\nUser:      {}", plan.user_id));
        if let Some(role) = plan.grant_role {
            output.push_str(&format!("\nRole:      {role}"));
        }
        output
    }

    fn format_config(&self, config: &Config) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Key", "Value"]);
        builder.push_record(["default_radius_km".to_string(), config.default_radius_km.to_string()]);
        builder.push_record(["max_radius_km".to_string(), config.max_radius_km.to_string()]);
        builder.push_record([
            "parallel_threshold".to_string(),
            config.parallel_threshold.to_string(),
        ]);
        builder.push_record(["log_level".to_string(), config.log_level.clone()]);
        builder.push_record([
            "output_format".to_string(),
            format_name(config.output_format).to_string(),
        ]);
        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("{} {error}", self.paint("Error:", Color::Red))
    }
}

/// Plain text output formatter.
///
/// One record per line, fields separated by spaces; easy to pipe.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_nearby(&self, response: &NearbyResponse) -> String {
        response
            .data
            .iter()
            .map(|n| format!("{} {:.2} {}", n.item.id, n.distance_km, n.item.title))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_decision(&self, report: &DecisionReport) -> String {
        let verdict = if report.decision.allowed { "allow" } else { "deny" };
        format!("{verdict} {}", report.decision.reason)
    }

    fn format_transition(&self, report: &TransitionReport) -> String {
        format!("{} {} {} {}", report.resource, report.id, report.from, report.to)
    }

    fn format_reply(&self, plan: &ReplyPlan) -> String {
        let mut lines = vec![format!("{} {}", plan.message.ticket_id, plan.message.user_id)];
        lines.extend(plan.side_effects.iter().map(side_effect_text));
        lines.join("\n")
    }

    fn format_ratings(&self, summary: &RatingSummary) -> String {
        format!("{:.1} {}", summary.average_rating, summary.total_ratings)
    }

    fn format_approval(&self, plan: &ApprovalPlan) -> String {
        format!("{} {}", plan.user_id, plan.status)
    }

    fn format_config(&self, config: &Config) -> String {
        format!(
            "default_radius_km={}\nmax_radius_km={}\nparallel_threshold={}\nlog_level={}\noutput_format={}",
            config.default_radius_km,
            config.max_radius_km,
            config.parallel_threshold,
            config.log_level,
            format_name(config.output_format)
        )
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("Error: {error}")
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Table => "table",
        OutputFormat::Plain => "plain",
    }
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `format` - The desired output format ("json", "table", or "plain")
/// * `use_color` - Whether to use colored output (ignored for JSON)
pub fn create_formatter(format: &str, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "plain" => Box::new(PlainFormatter),
        _ => Box::new(TableFormatter::new(use_color)),
    }
}
