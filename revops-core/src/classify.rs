//! Event classification: raw calendar events → per-setter daily metrics.
//!
//! Who booked a meeting is encoded in the event's color, with blue events
//! split between Matias and the bot by title. Whether the meeting actually
//! happened is encoded in the color too: organizers recolor no-shows after
//! the fact. The two axes are evaluated independently over the same color
//! value.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::event::{ClassifiedEvent, RawEvent, local_day_start};
use crate::setter::Setter;

/// A single classification rule: predicate → setter.
#[derive(Debug, Clone)]
pub struct Rule {
    pub predicate: Predicate,
    pub setter: Setter,
}

/// Predicates over an event's (color, title) pair.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Color equals this code.
    Color(String),
    /// Color equals this code and the title starts with the prefix
    /// (case-sensitive, exact prefix match).
    ColorAndTitlePrefix { color: String, prefix: String },
    /// Color equals this code and the lowercased, trimmed title contains the
    /// needle.
    ColorAndTitleContains { color: String, needle: String },
}

impl Rule {
    pub fn matches(&self, color: &str, title: &str) -> bool {
        match &self.predicate {
            Predicate::Color(code) => color == code,
            Predicate::ColorAndTitlePrefix { color: code, prefix } => {
                color == code && title.starts_with(prefix.as_str())
            }
            Predicate::ColorAndTitleContains { color: code, needle } => {
                color == code && title.trim().to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// An ordered rule list, evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build the standard rule chain from the color configuration:
    ///
    /// 1. black → Teresa
    /// 2. green → Daniela
    /// 3. blue + robot title prefix → Robot
    /// 4. blue + "reunion" in title → Matias
    /// 5. blue → Matias (fallback for ambiguous blue events)
    pub fn from_config(config: &CalendarConfig) -> Self {
        let colors = &config.colors;
        let rules = vec![
            Rule {
                predicate: Predicate::Color(colors.teresa.clone()),
                setter: Setter::Teresa,
            },
            Rule {
                predicate: Predicate::Color(colors.daniela.clone()),
                setter: Setter::Daniela,
            },
            Rule {
                predicate: Predicate::ColorAndTitlePrefix {
                    color: colors.blue.clone(),
                    prefix: config.robot_title_prefix.clone(),
                },
                setter: Setter::Robot,
            },
            Rule {
                predicate: Predicate::ColorAndTitleContains {
                    color: colors.blue.clone(),
                    needle: "reunion".to_string(),
                },
                setter: Setter::Matias,
            },
            Rule {
                predicate: Predicate::Color(colors.blue.clone()),
                setter: Setter::Matias,
            },
        ];

        RuleSet { rules }
    }

    /// First matching rule wins. `None` means unresolved: the caller drops
    /// the event instead of counting it against anyone.
    pub fn classify(&self, color: &str, title: &str) -> Option<Setter> {
        self.rules
            .iter()
            .find(|rule| rule.matches(color, title))
            .map(|rule| rule.setter)
    }
}

/// Per-setter counts for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetterDailyMetrics {
    pub scheduled: u32,
    pub attended: u32,
    pub events: Vec<ClassifiedEvent>,
}

impl SetterDailyMetrics {
    fn record(&mut self, event: ClassifiedEvent) {
        self.scheduled += 1;
        if event.attended {
            self.attended += 1;
        }
        self.events.push(event);
    }

    /// Attended ÷ scheduled as a percentage, 0.0 when nothing was scheduled.
    pub fn show_up_rate(&self) -> f64 {
        if self.scheduled == 0 {
            0.0
        } else {
            f64::from(self.attended) / f64::from(self.scheduled) * 100.0
        }
    }
}

/// Classifier output for one target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMetrics {
    pub date: NaiveDate,
    pub setters: BTreeMap<Setter, SetterDailyMetrics>,
}

impl DayMetrics {
    fn empty(date: NaiveDate) -> Self {
        let setters = Setter::ALL
            .iter()
            .map(|&s| (s, SetterDailyMetrics::default()))
            .collect();
        DayMetrics { date, setters }
    }

    pub fn total_scheduled(&self) -> u32 {
        self.setters.values().map(|m| m.scheduled).sum()
    }

    pub fn total_attended(&self) -> u32 {
        self.setters.values().map(|m| m.attended).sum()
    }
}

/// Classifies raw events for a target date.
///
/// Built once per run from the immutable configuration; holds no other
/// state.
pub struct Classifier {
    timezone: Tz,
    rules: RuleSet,
    no_show_colors: Vec<String>,
}

impl Classifier {
    pub fn new(config: &CalendarConfig, timezone: Tz) -> Self {
        Classifier {
            timezone,
            rules: RuleSet::from_config(config),
            no_show_colors: config.colors.no_show.clone(),
        }
    }

    /// Attendance is decided by the event's current color alone, independent
    /// of which rule assigned the setter.
    pub fn attended(&self, color: &str) -> bool {
        !self.no_show_colors.iter().any(|c| c == color)
    }

    /// Classify every event whose localized start falls within
    /// `[start_of_day, start_of_day + 24h)` and aggregate per-setter counts.
    ///
    /// Unresolved events are logged and excluded from all metrics. Events
    /// with unresolvable start times are skipped with a diagnostic.
    pub fn day_metrics(&self, events: &[RawEvent], date: NaiveDate) -> DayMetrics {
        let mut metrics = DayMetrics::empty(date);

        let Some(start_of_day) = local_day_start(date, self.timezone) else {
            log::warn!("Day {} has no valid start in {}", date, self.timezone);
            return metrics;
        };
        let end_of_day = start_of_day + Duration::hours(24);

        for event in events {
            let Some(local_start) = event.start.localize(self.timezone) else {
                log::warn!("Skipping event with unresolvable start time: {}", event.title);
                continue;
            };

            if local_start < start_of_day || local_start >= end_of_day {
                continue;
            }

            let color = event.color.as_deref().unwrap_or("");

            let Some(setter) = self.rules.classify(color, &event.title) else {
                log::warn!(
                    "Event without identified setter: {} (color: {})",
                    event.title,
                    color
                );
                continue;
            };

            let classified = ClassifiedEvent {
                title: event.title.clone(),
                time: local_start.time(),
                color: color.to_string(),
                attended: self.attended(color),
            };

            log::debug!(
                "  {}: {} - {}",
                setter,
                classified.title,
                if classified.attended { "attended" } else { "no-show" }
            );

            metrics
                .setters
                .entry(setter)
                .or_default()
                .record(classified);
        }

        metrics
    }
}
