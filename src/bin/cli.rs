use chrono::NaiveDate;
use clap::Parser;
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use timeline_tool::tier::format_employee_count;
use timeline_tool::{
    ConfiguratorConfig, Plan, PlanError, comparison_matrix, logging, render_matrix,
    render_text_chart, save_plan_to_csv, save_plan_to_json,
};

#[derive(Debug, Parser)]
#[command(name = "timeline-tool", about = "Interactive implementation timeline configurator")]
struct Cli {
    /// TOML file overriding defaults, tiers, products and palette
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Boolean(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        rows.push(
            columns
                .iter()
                .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
                .collect(),
        );
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &rows {
        for (ci, value) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(value.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&table_row(&col_names, &widths));
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&table_row(row, &widths));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn table_row(values: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (value, width) in values.iter().zip(widths) {
        line.push_str(&format!(" {value:<width$} |"));
    }
    line.push('\n');
    line
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the current plan summary\n  chart                              Draw the Gantt chart\n  table                              Show the task table\n  tier                               Show the resolved service tier\n  products                           List product bundles\n  employees <n>                      Set the employee count\n  product <key...>                   Select a product bundle (rest of line)\n  company <name...>                  Set the company name (rest of line)\n  start <YYYY-MM-DD|none>            Set or clear the project start date\n  workdays <on|off>                  Roll the end date onto a working day\n  matrix                             Compare every product across tiers\n  save <json|csv> <path>             Write the current plan to disk\n  quit|exit                          Exit"
    );
}

fn print_summary(plan: &Plan) {
    println!("Company            : {}", plan.display_company_name());
    println!(
        "Employees          : {}",
        format_employee_count(plan.employee_count)
    );
    println!("Product            : {}", plan.product.key);
    println!("Package            : {}", plan.tier.package);
    println!("Customer tier      : {}", plan.tier.customer_tier);
    println!("Weeks per module   : {}", plan.tier.weeks_per_module);
    println!("Module check-ins   : {}", plan.tier.module_check_ins);
    println!("Tasks              : {}", plan.tasks.len());
    println!("Estimated total    : {}", plan.total_weeks);
    if let Some(start) = plan.start_date {
        println!("Start date         : {start}");
    }
    if let Some(end) = plan.end_date {
        println!("End date           : {end}");
    }
}

fn report(result: &Result<Plan, PlanError>) {
    match result {
        Ok(plan) => print_summary(plan),
        Err(e) => println!("Error: {e}"),
    }
}

fn rest_of_line<'a>(input: &'a str, cmd: &str) -> &'a str {
    input[cmd.len()..].trim()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => match ConfiguratorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => ConfiguratorConfig::default(),
    };

    let mut session = config.configurator();

    println!("Timeline Tool (CLI) - type 'help' for commands\n");
    report(session.current());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => report(session.current()),
            "chart" => match session.plan() {
                Some(plan) => print!("{}", render_text_chart(plan, &config.chart)),
                None => report(session.current()),
            },
            "table" => match session.plan() {
                Some(plan) => match plan.timeline().to_dataframe() {
                    Ok(df) => println!("{}", render_df_as_text_table(&df)),
                    Err(e) => println!("Error building table: {e}"),
                },
                None => report(session.current()),
            },
            "tier" => match session.tiers().resolve(session.request().employee_count) {
                Ok(tier) => {
                    println!("Band               : {}", tier.band);
                    println!("Package            : {}", tier.package);
                    println!("Customer tier      : {}", tier.customer_tier);
                    println!("Module check-ins   : {}", tier.module_check_ins);
                    println!("Weeks per module   : {}", tier.weeks_per_module);
                }
                Err(e) => println!("Error: {e}"),
            },
            "products" => {
                for product in session.registry().products() {
                    let modules = product
                        .modules
                        .iter()
                        .map(|m| m.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("  {:<24} {}", product.key, modules);
                }
            }
            "employees" => match parts.next().map(str::parse::<i64>) {
                Some(Ok(count)) => report(session.set_employee_count(count)),
                Some(Err(_)) => println!("Invalid employee count"),
                None => println!("Usage: employees <n>"),
            },
            "product" => {
                let key = rest_of_line(input, cmd);
                if key.is_empty() {
                    println!("Usage: product <key...>");
                } else {
                    report(session.set_product(key));
                }
            }
            "company" => report(session.set_company_name(rest_of_line(input, cmd))),
            "start" => match parts.next() {
                Some("none") => report(session.set_start_date(None)),
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) => report(session.set_start_date(Some(date))),
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: start <YYYY-MM-DD|none>"),
            },
            "workdays" => match parts.next() {
                Some("on") => report(session.set_use_working_days(true)),
                Some("off") => report(session.set_use_working_days(false)),
                _ => println!("Usage: workdays <on|off>"),
            },
            "matrix" => match comparison_matrix(session.tiers(), session.registry()) {
                Ok(cells) => print!("{}", render_matrix(&cells, session.tiers())),
                Err(e) => println!("Error: {e}"),
            },
            "save" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path, session.plan()) {
                    (Some(_), Some(_), None) => report(session.current()),
                    (Some("json"), Some(path), Some(plan)) => {
                        match save_plan_to_json(plan, &config.palette, path) {
                            Ok(_) => println!("Saved JSON to {path}"),
                            Err(e) => println!("Error saving JSON: {e}"),
                        }
                    }
                    (Some("csv"), Some(path), Some(plan)) => {
                        match save_plan_to_csv(plan, &config.palette, path) {
                            Ok(_) => println!("Saved CSV to {path}"),
                            Err(e) => println!("Error saving CSV: {e}"),
                        }
                    }
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }

    ExitCode::SUCCESS
}
