//! Colored terminal rendering of extraction results.

use owo_colors::OwoColorize;

use revops_core::classify::DayMetrics;
use revops_core::event::ClassifiedEvent;

/// Per-setter summary with show-up rates and event detail lines.
pub fn day_summary(metrics: &DayMetrics) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Meetings for {}", metrics.date).bold().to_string());

    if metrics.total_scheduled() == 0 {
        lines.push("   No meetings classified".dimmed().to_string());
        return lines.join("\n");
    }

    for (setter, m) in &metrics.setters {
        if m.scheduled == 0 {
            continue;
        }

        lines.push(format!(
            "   {:<8} | scheduled: {:>2} | attended: {:>2} | show-up: {:>5.1}%",
            setter.to_string(),
            m.scheduled,
            m.attended,
            m.show_up_rate()
        ));

        for event in &m.events {
            lines.push(format!("      {}", event_line(event)));
        }
    }

    lines.push(format!(
        "   {}",
        format!(
            "Total: {} scheduled, {} attended",
            metrics.total_scheduled(),
            metrics.total_attended()
        )
        .dimmed()
    ));

    lines.join("\n")
}

fn event_line(event: &ClassifiedEvent) -> String {
    let mark = if event.attended {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    };

    format!(
        "{} {} {}",
        mark,
        event.time.format("%H:%M"),
        event.title.as_str().dimmed()
    )
}

/// A single ✓/✗ checklist line for `verify`.
pub fn check_line(name: &str, ok: bool) -> String {
    if ok {
        format!("{} {}", "✓".green(), name)
    } else {
        format!("{} {}", "✗".red(), name)
    }
}
