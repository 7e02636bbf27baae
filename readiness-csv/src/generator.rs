//! CSV report generator implementation.

use chrono::NaiveDate;
use readiness::catalog::{self, OTHER};
use readiness::coverage;
use readiness::{
    AnswerSet, Capability, Integration, Location, MetaField, Practice, Provider, QuestionKey,
    Schema, Signal, SloDetail, TriState,
};

type Row = Vec<String>;

/// Generate the CSV report of an assessment.
///
/// Sections come in a fixed order, separated by an empty line: metadata,
/// SLO/SLA, disaster recovery, best practices, monitoring coverage, the
/// selected location and other mentions. Only the selected location is
/// reported.
pub fn to_csv(schema: &Schema, answers: &AnswerSet) -> String {
    let location = Location::parse(answers.text(MetaField::Location));

    let sections = [
        metadata(answers, location),
        slo(answers),
        practices(
            answers,
            &[
                (Practice::DrPlan, "DR Plan Documented"),
                (Practice::DrRtoRpo, "RTO/RPO Defined"),
                (Practice::DrTested, "DR Plan Tested (12 months)"),
            ],
        ),
        practices(
            answers,
            &[
                (Practice::BpRunbooks, "Runbooks/Support Guides"),
                (Practice::BpSpof, "Critical Failures Documented"),
                (Practice::BpNoise, "Alert Noise Documented"),
                (Practice::BpMttr, "MTTR Tracked"),
                (Practice::BpDependencies, "Direct Dependencies Documented"),
            ],
        ),
        location.map(|l| monitoring_coverage(answers, l)).unwrap_or_default(),
        location
            .map(|l| location_detail(schema, answers, l))
            .unwrap_or_default(),
        other_mentions(answers),
    ];

    let mut lines: Vec<String> = Vec::new();
    for section in sections.iter().filter(|s| !s.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(section.iter().map(|r| render_row(r)));
    }
    lines.join("\n")
}

/// Quote a cell for CSV output.
///
/// Internal quotes are doubled. A value that a spreadsheet would read as a
/// formula (leading `=`, `+`, `-`, `@`, tab or carriage return) is prefixed
/// with `'`.
pub fn escape_cell(value: &str) -> String {
    let neutralise = value.starts_with(['=', '+', '-', '@', '\t', '\r']);
    let mut cell = String::with_capacity(value.len() + 3);
    cell.push('"');
    if neutralise {
        cell.push('\'');
    }
    cell.push_str(&value.replace('"', "\"\""));
    cell.push('"');
    cell
}

/// File name of an export: `sre-readiness-<app>-<YYYY-MM-DD>.csv`.
///
/// Every character of the application name outside `[A-Za-z0-9]` becomes `-`.
pub fn export_file_name(app_name: &str, date: NaiveDate) -> String {
    format!(
        "sre-readiness-{}-{}.csv",
        sanitize_name(app_name.trim()),
        date.format("%Y-%m-%d")
    )
}

fn sanitize_name(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn render_row(row: &[String]) -> String {
    row.iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn row<const N: usize>(cells: [&str; N]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

fn tri_label(answers: &AnswerSet, key: impl Into<QuestionKey>) -> &'static str {
    answers.tri(key).map(TriState::label).unwrap_or("")
}

fn metadata(answers: &AnswerSet, location: Option<Location>) -> Vec<Row> {
    let mut rows = vec![
        row(["Application Name", answers.text(MetaField::AppName)]),
        row(["Role", answers.text(MetaField::Role)]),
    ];
    if answers.text(MetaField::Role) == OTHER {
        rows.push(row(["Role (Other)", answers.text(MetaField::RoleOther)]));
    }
    rows.push(row(["NAR-ID", answers.text(MetaField::NarId)]));
    rows.push(row(["Contact Email", answers.text(MetaField::ContactEmail)]));
    rows.push(row(["Application Type", answers.text(MetaField::AppType)]));
    if answers.text(MetaField::AppType) == OTHER {
        rows.push(row([
            "Application Type (Other)",
            answers.text(MetaField::AppTypeOther),
        ]));
    }
    rows.push(row(["Location", location.map(Location::title).unwrap_or("")]));
    rows
}

fn with_link(rows: &mut Vec<Row>, answers: &AnswerSet, practice: Practice, label: &str) {
    rows.push(row([label, tri_label(answers, practice)]));
    if answers.tri(practice) != Some(TriState::Yes) {
        return;
    }
    let link = answers.text(QuestionKey::Link(practice)).trim();
    if !link.is_empty() {
        let link_label = format!("  {label} (link)");
        rows.push(row([link_label.as_str(), link]));
    }
}

fn slo(answers: &AnswerSet) -> Vec<Row> {
    let mut rows = vec![row([
        "SLO/SLA Structure Exists",
        tri_label(answers, Practice::SloExists),
    ])];
    if answers.tri(Practice::SloExists) == Some(TriState::Yes) {
        for (detail, label) in [
            (SloDetail::Latency, "  Latency SLO"),
            (SloDetail::Availability, "  Availability SLO"),
            (SloDetail::ErrorBudget, "  Error Budget Defined"),
        ] {
            rows.push(row([label, tri_label(answers, detail)]));
        }
    }
    with_link(&mut rows, answers, Practice::SloPdm, "PDM Documented");
    rows
}

fn practices(answers: &AnswerSet, items: &[(Practice, &str)]) -> Vec<Row> {
    let mut rows = Vec::new();
    for &(practice, label) in items {
        with_link(&mut rows, answers, practice, label);
    }
    rows
}

fn monitoring_coverage(answers: &AnswerSet, location: Location) -> Vec<Row> {
    let stats = coverage::coverage(answers, location);
    if stats.is_empty() {
        return Vec::new();
    }
    let mut rows = vec![row(["Monitoring Coverage", "Overall", "Monitoring", "Alerting"])];
    for stat in stats {
        rows.push(vec![
            format!("  {}", stat.capability.title()),
            stat.overall.to_string(),
            stat.monitoring.to_string(),
            stat.alerting.to_string(),
        ]);
    }
    rows
}

fn location_detail(schema: &Schema, answers: &AnswerSet, location: Location) -> Vec<Row> {
    let mut rows = vec![vec![format!("Location: {}", location.title())]];
    for &capability in Capability::ALL {
        let owner = QuestionKey::Capability(location, capability);
        rows.push(vec![
            format!("  {} Component", capability.title()),
            tri_label(answers, owner).to_string(),
        ]);
        if answers.tri(owner) != Some(TriState::Yes) {
            continue;
        }

        for &signal in Signal::ALL {
            for &provider in catalog::providers(location) {
                let key = QuestionKey::Signal(location, capability, signal, provider);
                let items = answers.choices(key);
                if schema.contains(&key) && !items.is_empty() {
                    rows.push(vec![
                        format!("    {} {}", provider.title(), signal.title()),
                        items.join(", "),
                    ]);
                }
            }
        }

        for &integration in Integration::ALL {
            let key = QuestionKey::Integration(location, capability, integration);
            rows.push(vec![
                format!("    {}", integration.title()),
                tri_label(answers, key).to_string(),
            ]);
            if integration == Integration::Stip && answers.tri(key) == Some(TriState::Yes) {
                stip_providers(&mut rows, schema, answers, location, capability);
            }
        }
    }
    rows
}

fn stip_providers(
    rows: &mut Vec<Row>,
    schema: &Schema,
    answers: &AnswerSet,
    location: Location,
    capability: Capability,
) {
    for &provider in Provider::ALL {
        let key = QuestionKey::StipProvider(location, capability, provider);
        let items = answers.choices(key);
        if schema.contains(&key) && !items.is_empty() {
            rows.push(vec![
                format!("      Stip via {}", provider.title()),
                items.join(", "),
            ]);
        }
    }
}

fn other_mentions(answers: &AnswerSet) -> Vec<Row> {
    let text = answers.text(MetaField::OtherMentions);
    if text.trim().is_empty() {
        Vec::new()
    } else {
        vec![row(["Other Mentions", text])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain_and_quoted() {
        assert_eq!(escape_cell("Ledger"), "\"Ledger\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell(""), "\"\"");
    }

    #[test]
    fn escape_formula_prefixes() {
        assert_eq!(escape_cell("=1+1"), "\"'=1+1\"");
        assert_eq!(escape_cell("+49 123"), "\"'+49 123\"");
        assert_eq!(escape_cell("-5"), "\"'-5\"");
        assert_eq!(escape_cell("@SUM(A1)"), "\"'@SUM(A1)\"");
        assert_eq!(escape_cell("\tx"), "\"'\tx\"");
        assert_eq!(escape_cell("a=b"), "\"a=b\"");
    }

    #[test]
    fn file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(
            export_file_name("Payments/Core API", date),
            "sre-readiness-Payments-Core-API-2024-12-01.csv"
        );
        assert_eq!(export_file_name("Zürich", date), "sre-readiness-Z-rich-2024-12-01.csv");
    }

    #[test]
    fn empty_report_has_fixed_sections() {
        let csv = to_csv(catalog::schema(), &AnswerSet::new());
        let blank_lines = csv.lines().filter(|l| l.is_empty()).count();
        // Metadata, SLO/SLA, disaster recovery and best practices.
        assert_eq!(blank_lines, 3);
        assert!(csv.starts_with("\"Application Name\",\"\"\n"));
        assert!(!csv.contains("Location:"));
    }
}
