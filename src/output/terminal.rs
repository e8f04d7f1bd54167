//! Human-readable rendering: colored headings and comfy-table grids.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::common::format_currency;
use crate::config::RiskmapConfig;
use crate::core::Task;
use crate::landing::LandingStats;
use crate::profile::Profile;
use crate::risk::dashboard::Dashboard;
use crate::risk::{EmployeeRisk, EmployeeRiskDetail, RiskLevel, SystemRisk, TeamRisk};
use crate::store::Paginated;

/// Values that have a terminal rendering.
pub trait TerminalView {
    fn render_terminal(&self) -> String;
}

/// One row per assessed entity in a risk table.
pub trait RiskRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<Cell>;
}

pub fn level_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    }
}

fn level_cell(level: RiskLevel) -> Cell {
    Cell::new(level.label()).fg(level_color(level))
}

fn colored_level(level: RiskLevel) -> String {
    match level {
        RiskLevel::High => level.label().red().bold().to_string(),
        RiskLevel::Medium => level.label().yellow().bold().to_string(),
        RiskLevel::Low => level.label().green().to_string(),
    }
}

fn heading(title: &str) -> String {
    title.bold().underline().to_string()
}

fn new_table(headers: Vec<&'static str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

pub fn risk_table<R: RiskRow>(rows: &[R]) -> String {
    if rows.is_empty() {
        return "  (none)".dimmed().to_string();
    }
    let mut table = new_table(R::headers());
    for row in rows {
        table.add_row(row.cells());
    }
    table.to_string()
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl RiskRow for EmployeeRisk {
    fn headers() -> Vec<&'static str> {
        vec!["Employee", "Email", "Team", "Tasks", "Weight", "Avg Priority", "Score", "Level"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.name),
            Cell::new(&self.email),
            Cell::new(optional(self.team_id.as_deref())),
            Cell::new(self.workload.task_count),
            Cell::new(format!("{:.1}", self.workload.total_weight)),
            Cell::new(format!("{:.2}", self.workload.average_priority)),
            Cell::new(self.risk_score),
            level_cell(self.risk_level),
        ]
    }
}

impl RiskRow for SystemRisk {
    fn headers() -> Vec<&'static str> {
        vec!["System", "Criticality", "Status", "Team", "Tasks", "Weight", "Score", "Level"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.name),
            Cell::new(self.criticality),
            Cell::new(format!("{:?}", self.status).to_uppercase()),
            Cell::new(optional(self.team_id.as_deref())),
            Cell::new(self.workload.task_count),
            Cell::new(format!("{:.1}", self.workload.total_weight)),
            Cell::new(self.risk_score),
            level_cell(self.risk_level),
        ]
    }
}

impl RiskRow for TeamRisk {
    fn headers() -> Vec<&'static str> {
        vec!["Team", "Status", "Employees", "Systems", "Score", "Level"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::new(&self.name),
            Cell::new(format!("{:?}", self.status).to_uppercase()),
            Cell::new(self.employee_count),
            Cell::new(self.system_count),
            Cell::new(self.risk_score),
            level_cell(self.risk_level),
        ]
    }
}

fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "  (no active tasks)".dimmed().to_string();
    }
    let mut table = new_table(vec!["Task", "Title", "Status", "Priority", "Weight", "System"]);
    for task in tasks {
        table.add_row(vec![
            Cell::new(&task.id),
            Cell::new(&task.title),
            Cell::new(format!("{:?}", task.status)),
            Cell::new(task.priority),
            Cell::new(format!("{:.1}", task.effective_work_weight())),
            Cell::new(&task.system_id),
        ]);
    }
    table.to_string()
}

fn score_line(name: &str, score: impl std::fmt::Display, level: RiskLevel) -> String {
    format!("{}  score {}  {}", name.bold(), score, colored_level(level))
}

impl<R: RiskRow> TerminalView for Paginated<R> {
    fn render_terminal(&self) -> String {
        let pages = self.meta.total.div_ceil(self.meta.limit.max(1)).max(1);
        format!(
            "{}\n{}",
            risk_table(&self.data),
            format!(
                "page {} of {} ({} total, {} per page)",
                self.meta.page, pages, self.meta.total, self.meta.limit
            )
            .dimmed()
        )
    }
}

impl TerminalView for EmployeeRiskDetail {
    fn render_terminal(&self) -> String {
        let risk = &self.risk;
        format!(
            "{}\n{}\n\n{}\n{}",
            score_line(&risk.name, risk.risk_score, risk.risk_level),
            risk_table(std::slice::from_ref(risk)),
            heading("Active tasks"),
            task_table(&self.active_tasks)
        )
    }
}

impl TerminalView for SystemRisk {
    fn render_terminal(&self) -> String {
        format!(
            "{}\n{}",
            score_line(&self.name, self.risk_score, self.risk_level),
            risk_table(std::slice::from_ref(self))
        )
    }
}

impl TerminalView for TeamRisk {
    fn render_terminal(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}",
            score_line(&self.name, self.risk_score, self.risk_level),
            risk_table(std::slice::from_ref(self)),
            heading("Members"),
            risk_table(&self.employee_risks)
        )
    }
}

impl TerminalView for Dashboard {
    fn render_terminal(&self) -> String {
        let summary = &self.summary;
        let mut out = vec![
            heading("Risk summary"),
            format!(
                "  High-risk employees: {}\n  High-risk systems:   {}\n  High-risk teams:     {}",
                summary.high_risk_employee_count.to_string().red(),
                summary.high_risk_system_count.to_string().red(),
                summary.high_risk_team_count.to_string().red()
            ),
            String::new(),
            heading("Top employees"),
            risk_table(&self.rankings.top_risk_employees),
            String::new(),
            heading("Top systems"),
            risk_table(&self.rankings.top_risk_systems),
            String::new(),
            heading("Top teams"),
            risk_table(&self.rankings.top_risk_teams),
        ];
        if summary.high_risk_employee_count + summary.high_risk_system_count + summary.high_risk_team_count
            == 0
        {
            out.push(String::new());
            out.push("No HIGH risk entities.".green().to_string());
        }
        out.join("\n")
    }
}

impl TerminalView for LandingStats {
    fn render_terminal(&self) -> String {
        let hero = &self.hero;
        let before = &self.before_after;
        let visuals = &self.risk_visuals;

        let mut facts = new_table(vec!["Metric", "Value"]);
        let rows: Vec<(&str, String)> = vec![
            ("Teams", hero.teams.to_string()),
            ("Employees", hero.employees.to_string()),
            ("Systems", hero.systems.to_string()),
            ("Coverage", format!("{}%", hero.coverage)),
            ("Prevented losses", before.prevented_losses_label.clone()),
            (
                "Resolved high-priority tasks",
                before.resolved_high_priority_tasks.to_string(),
            ),
            ("Avg resolution", format!("{} days", before.avg_resolution_days)),
            ("Attrition", format!("{}%", before.attrition_rate)),
            ("Protected projects", before.protected_projects.to_string()),
            ("Delayed projects", before.delayed_projects.to_string()),
            ("Crisis reduction", format!("{}%", before.crisis_reduction)),
            ("Critical systems", visuals.critical_systems.to_string()),
            (
                "Revenue at risk",
                format_currency(visuals.current_risk_revenue_loss),
            ),
            (
                "Estimated downtime",
                format!("{:.0} min", visuals.estimated_downtime_minutes),
            ),
        ];
        for (label, value) in rows {
            facts.add_row(vec![Cell::new(label), Cell::new(value)]);
        }

        let mut trend = new_table(vec!["Date", "Active tasks", "Load"]);
        for point in &visuals.daily_trend {
            let load = Cell::new(format!("{}%", point.load_percent));
            let load = match point.load_percent {
                70.. => load.fg(Color::Red),
                30..=69 => load.fg(Color::Yellow),
                _ => load.fg(Color::Green),
            };
            trend.add_row(vec![
                Cell::new(point.date),
                Cell::new(point.active_tasks),
                load,
            ]);
        }

        format!(
            "{}\n{}\n\n{}\n{}",
            heading("Impact"),
            facts,
            heading("Daily load"),
            trend
        )
    }
}

impl TerminalView for Profile {
    fn render_terminal(&self) -> String {
        let team = self
            .team()
            .map(|t| format!("{} ({})", t.name, t.id))
            .unwrap_or_else(|| "-".to_string());
        let email = match self {
            Profile::Admin(p) => &p.admin.email,
            Profile::Manager(p) => &p.manager.email,
            Profile::Employee(p) => &p.employee.email,
        };
        let mut out = format!(
            "{} {}\n  email: {}\n  team:  {}",
            self.name().bold(),
            format!("[{:?}]", self.role()).to_uppercase().cyan(),
            email,
            team
        );
        if let Profile::Employee(p) = self {
            out.push_str(&format!(
                "\n\n{}\n{}",
                heading("Active tasks"),
                task_table(&p.active_tasks)
            ));
        }
        out
    }
}

impl TerminalView for RiskmapConfig {
    fn render_terminal(&self) -> String {
        match toml::to_string_pretty(self) {
            Ok(text) => text,
            Err(err) => format!("{}: {err}", "could not render configuration".red()),
        }
    }
}
