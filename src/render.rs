use crate::chart::ChartOptions;
use crate::plan::Plan;
use crate::task::Task;
use crate::tier::format_employee_count;

const BAR_CHAR: char = '#';
const EMPTY_CHAR: char = '.';
const SELF_PACED_CHAR: char = '~';

/// Renders a plan as a plain-text Gantt chart, one character per week.
pub fn render_text_chart(plan: &Plan, options: &ChartOptions) -> String {
    let timeline = plan.timeline();
    let horizon = options.min_weeks.max(timeline.total_weeks()) as usize;
    let name_width = plan
        .tasks
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Task".len());

    let mut out = format!(
        "Implementation Gantt Chart for {}\n{}\n\n",
        plan.display_company_name(),
        summary_line(plan)
    );

    let ruler: String = (1..=horizon)
        .map(|week| char::from_digit((week % 10) as u32, 10).unwrap_or(' '))
        .collect();
    out.push_str(&format!("{:<name_width$} |{ruler}|\n", "Task"));

    for (phase, tasks) in timeline.tasks_by_phase() {
        out.push_str(&format!("== {phase} ==\n"));
        for task in tasks {
            out.push_str(&format!(
                "{:<name_width$} |{}| {}\n",
                task.name,
                bar(task, horizon),
                bar_label(task)
            ));
        }
    }
    out
}

fn summary_line(plan: &Plan) -> String {
    let mut line = format!(
        "Employees: {} | Customer tier: {} | Package: {} | Weeks per module: {} | Modules: {} | Estimated total: {}",
        format_employee_count(plan.employee_count),
        plan.tier.customer_tier,
        plan.tier.package,
        plan.tier.weeks_per_module,
        plan.product.module_count(),
        plan.total_weeks,
    );
    if let Some(start) = plan.start_date {
        let end = match plan.end_date {
            Some(end) => end.format("%b %d, %Y").to_string(),
            None => plan.total_weeks.to_string(),
        };
        line.push_str(&format!(
            " | Start: {} | End: {end}",
            start.format("%b %d, %Y")
        ));
    }
    line
}

fn bar(task: &Task, horizon: usize) -> String {
    if task.is_self_paced {
        return std::iter::repeat_n(SELF_PACED_CHAR, horizon).collect();
    }
    let start = task.start as usize;
    let end = task.end() as usize;
    (0..horizon)
        .map(|week| {
            if week >= start && week < end {
                BAR_CHAR
            } else {
                EMPTY_CHAR
            }
        })
        .collect()
}

fn bar_label(task: &Task) -> String {
    if task.is_self_paced {
        crate::chart::SELF_PACED_BAR_LABEL.to_string()
    } else {
        task.duration_label()
    }
}
