use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fintrack_analytics::{
    BudgetTracker, GoalProgressEngine, PeriodAggregator, SavingsProjector, TrendBucketer,
};
use fintrack_core::time::parse_local_deadline_to_utc;
use fintrack_core::{Budget, TimePeriod};

mod config;
mod csv_loader;
mod goals_file;
mod state;

use csv_loader::{load_transactions_csv, LoadedData};
use goals_file::load_goals_file;

#[derive(Parser, Debug)]
#[command(name = "fintrack", version, about = "Personal-finance analytics over CSV exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals, per-day average and top category for a period
    Summary {
        #[arg(long)]
        csv: Option<PathBuf>,

        /// today, yesterday, this-week, this-month, this-year,
        /// last-7-days, last-30-days, last-90-days, all-time
        #[arg(long, default_value = "last-30-days")]
        period: String,
    },

    /// Spending by category, descending
    Breakdown {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, default_value = "last-30-days")]
        period: String,

        /// Attribute subcategory spend to the top-level parent
        #[arg(long)]
        rollup: bool,
    },

    /// Top merchants by spend
    Merchants {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, default_value = "last-30-days")]
        period: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Spending series bucketed for the period's span
    Trend {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, default_value = "last-30-days")]
        period: String,

        /// Per-day debit/credit split instead of the bucketed series
        #[arg(long)]
        daily: bool,
    },

    /// Savings analysis and planning
    Savings {
        #[command(subcommand)]
        command: SavingsCommand,
    },

    /// Goal progress reports
    Goals {
        /// Goals JSON file (defaults to the configured path)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Budget utilization for one calendar month
    Budget {
        #[arg(long)]
        csv: Option<PathBuf>,

        /// 1-12
        #[arg(long)]
        month: u32,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        limit: f64,

        /// Restrict to one category by name; omit for the overall budget
        #[arg(long)]
        category: Option<String>,
    },

    /// Write a default ~/.fintrack/config.toml
    InitConfig,
}

#[derive(Subcommand, Debug)]
enum SavingsCommand {
    /// Tiered savings suggestion from recent income and spending
    Suggest {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long, default_value = "last-30-days")]
        period: String,
    },

    /// Required monthly contribution toward a target by a deadline
    Plan {
        #[arg(long)]
        target: f64,

        /// Local deadline, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        deadline: String,

        #[arg(long, default_value_t = 0.0)]
        current: f64,

        /// IANA timezone for the deadline (defaults to the configured one)
        #[arg(long)]
        tz: Option<String>,

        /// Optional history CSV for the affordability check
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    let now = Utc::now();

    match cli.command {
        Command::Summary { csv, period } => {
            let data = load_data(csv, &cfg)?;
            let window = parse_period(&period)?.resolve(now);
            let summary = PeriodAggregator::summarize(&data.transactions, window, &data.categories);

            println!("Period: {period} ({} transactions)", summary.transaction_count);
            println!("  Spent:     {:>12.2}", summary.total_spent);
            println!("  Received:  {:>12.2}", summary.total_received);
            println!("  Avg/day:   {:>12.2}", summary.average_daily);
            match summary.top_category {
                Some(name) => println!("  Top category: {name}"),
                None => println!("  Top category: (no spending)"),
            }
        }

        Command::Breakdown { csv, period, rollup } => {
            let data = load_data(csv, &cfg)?;
            let window = parse_period(&period)?.resolve(now);
            let breakdown = PeriodAggregator::category_breakdown(
                &data.transactions,
                window,
                &data.categories,
                rollup,
            );

            for c in breakdown {
                println!(
                    "{:<24} {:>10.2}  {:>5.1}%  ({} txns)",
                    c.name, c.total, c.percentage, c.count
                );
            }
        }

        Command::Merchants { csv, period, limit } => {
            let data = load_data(csv, &cfg)?;
            let window = parse_period(&period)?.resolve(now);
            for m in PeriodAggregator::top_merchants(&data.transactions, window, limit) {
                println!("{:<32} {:>10.2}  ({} txns)", m.merchant, m.total, m.count);
            }
        }

        Command::Trend { csv, period, daily } => {
            let data = load_data(csv, &cfg)?;
            let window = parse_period(&period)?.resolve(now);

            if daily {
                for p in TrendBucketer::daily_spending(&data.transactions, window) {
                    println!(
                        "{} {}  spent {:>10.2}  received {:>10.2}",
                        p.date, p.day_label, p.spent, p.received
                    );
                }
            } else {
                for p in TrendBucketer::spending_trend(&data.transactions, window) {
                    println!("{:<8} {:>10.2}", p.label, p.amount);
                }
            }
        }

        Command::Savings { command } => match command {
            SavingsCommand::Suggest { csv, period } => {
                let data = load_data(csv, &cfg)?;
                let window = parse_period(&period)?.resolve(now);
                let s = SavingsProjector::suggest(&data.transactions, window);

                println!("{}", s.analysis);
                println!("  conservative: {:>10.2}", s.conservative);
                println!("  moderate:     {:>10.2}", s.moderate);
                println!("  aggressive:   {:>10.2}", s.aggressive);
                println!("  recommended:  {:?}", s.recommended);
            }

            SavingsCommand::Plan {
                target,
                deadline,
                current,
                tz,
                csv,
            } => {
                let tz = tz.unwrap_or_else(|| cfg.display.timezone.clone());
                let deadline = parse_local_deadline_to_utc(&deadline, &tz)?;

                let history = match csv {
                    Some(path) => Some(load_transactions_csv(&path)?.transactions),
                    None => None,
                };
                let rec = SavingsProjector::recommend_monthly(
                    target,
                    deadline,
                    current,
                    history.as_deref(),
                    now,
                );

                println!(
                    "Save {:.2}/month for {} month(s) to reach {:.2} (currently {:.2})",
                    rec.required_monthly, rec.months_remaining, rec.target_amount, rec.current_savings
                );
                if !rec.is_affordable {
                    println!("Warning: that exceeds your trailing-30-day net income.");
                }
            }
        },

        Command::Goals { file } => {
            let path = file.unwrap_or_else(|| PathBuf::from(&cfg.data.goals));
            let goals = load_goals_file(&path)
                .with_context(|| format!("loading goals from {}", path.display()))?;

            for goal in &goals.goals {
                let contributions = goals.contributions_for(&goal.id);
                let m = GoalProgressEngine::metrics(goal, &contributions, now);

                println!("{} ({:.2}/{:.2})", goal.name, goal.current_amount, goal.target_amount);
                println!(
                    "  {:.1}% complete, {} day(s) left, {}",
                    m.percentage_complete,
                    m.days_remaining,
                    if m.is_on_track { "on track" } else { "off track" }
                );
                println!("  needs {:.2}/day ({:.2}/week, {:.2}/month)",
                    m.required_daily, m.required_weekly, m.required_monthly);
                match m.projected_completion {
                    Some(d) => println!("  projected completion: {}", d.date_naive()),
                    None => println!("  projected completion: no momentum to project"),
                }
            }

            let stats = GoalProgressEngine::aggregate(&goals.goals, now);
            println!(
                "\n{} goal(s): {} active, {} completed, {} overdue",
                stats.total_goals, stats.active_count, stats.completed_count, stats.overdue_count
            );
            println!(
                "Overall {:.1}% of {:.2}; average per-goal {:.1}%",
                stats.overall_progress, stats.total_target, stats.average_progress
            );
        }

        Command::Budget {
            csv,
            month,
            year,
            limit,
            category,
        } => {
            if !(1..=12).contains(&month) {
                bail!("month must be 1-12, got {month}");
            }
            let data = load_data(csv, &cfg)?;

            let budget = match category {
                None => Budget::overall(month, year, limit),
                Some(name) => {
                    let cat = data
                        .categories
                        .iter()
                        .find(|c| c.name.eq_ignore_ascii_case(&name))
                        .with_context(|| format!("no category named '{name}' in the CSV"))?;
                    Budget::for_category(month, year, cat.id, limit)
                }
            };

            let status = &BudgetTracker::status(&[budget], &data.transactions)[0];
            println!(
                "{:02}/{}: spent {:.2} of {:.2} ({:.1}%)",
                month, year, status.spent, status.budget.limit, status.percent_used
            );
            if status.is_over_limit {
                println!("Over budget by {:.2}", -status.remaining);
            } else {
                println!("{:.2} remaining", status.remaining);
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn load_data(csv: Option<PathBuf>, cfg: &config::Config) -> Result<LoadedData> {
    let path = csv.unwrap_or_else(|| PathBuf::from(&cfg.data.transactions));
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    load_transactions_csv(&path)
}

fn parse_period(s: &str) -> Result<TimePeriod> {
    Ok(match s {
        "today" => TimePeriod::Today,
        "yesterday" => TimePeriod::Yesterday,
        "this-week" => TimePeriod::ThisWeek,
        "this-month" => TimePeriod::ThisMonth,
        "this-year" => TimePeriod::ThisYear,
        "last-7-days" => TimePeriod::Last7Days,
        "last-30-days" => TimePeriod::Last30Days,
        "last-90-days" => TimePeriod::Last90Days,
        "all-time" => TimePeriod::AllTime,
        other => bail!("unknown period: {other}"),
    })
}
