use std::fmt::Write as _;
use std::time::Duration;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::format::{format_ft, format_huf, format_percent};
use crate::core::income::{compare_to_reference, hourly_from_gross, quintile_for};
use crate::core::inflation::erosion_table;
use crate::core::investment::project_scenarios;
use crate::core::loan::LoanWarning;
use crate::core::reference::{self, default_district, find_district};
use crate::core::simulator::{DEFAULT_HAPPINESS, DayLog, run_interval};
use crate::core::{
    DistrictEstimate, ExpenseBook, FinanceResult, InvestmentPlan, Language, LifeSimulator,
    LoanQuote, SimulatorConfig, TaxBreakdown,
};

#[derive(Parser, Debug)]
#[command(
    name = "financecalc",
    about = "Personal finance calculator: salary, budget, housing loan, inflation and savings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the web UI and JSON API.
    Serve {
        #[arg(long, env = "FINANCECALC_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print every tab's numbers for one salary.
    Report(ReportArgs),
    /// Run the d20 life simulator in real time.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value_t = reference::DEFAULT_GROSS)]
    pub gross: f64,
    #[arg(long, default_value = "hu", value_parser = parse_language)]
    pub lang: Language,
    #[arg(long, default_value_t = reference::DEFAULT_LOAN_AMOUNT)]
    pub loan_amount: f64,
    #[arg(long, default_value_t = reference::DEFAULT_LOAN_YEARS)]
    pub loan_years: u32,
    #[arg(long, help = "District id, e.g. XIII; defaults to II")]
    pub district: Option<String>,
    #[arg(long, default_value_t = reference::DEFAULT_HOME_SIZE_SQM)]
    pub home_size: f64,
    #[arg(long, default_value_t = 4.5, help = "Annual inflation in percent")]
    pub inflation: f64,
    #[arg(long, default_value_t = reference::DEFAULT_INVEST_YEARS)]
    pub years: u32,
    #[arg(long, default_value_t = 0.0)]
    pub initial_savings: f64,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = 30)]
    pub days: u32,
    #[arg(long, help = "RNG seed; random when omitted")]
    pub seed: Option<u64>,
    #[arg(long, default_value_t = 250, help = "Wall-clock milliseconds per simulated day")]
    pub interval_ms: u64,
    #[arg(long, default_value_t = reference::DEFAULT_GROSS)]
    pub gross: f64,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).map_err(|e| e.to_string())
}

pub fn render_report(args: &ReportArgs) -> FinanceResult<String> {
    let lang = args.lang;
    let t = lang.translations();
    let labels = &t.report;
    let breakdown = TaxBreakdown::from_gross(args.gross)?;
    let net = breakdown.net as f64;
    let mut out = String::new();

    writeln!(out, "== Income ==")?;
    writeln!(
        out,
        "{:<16}{}",
        format!("{}:", labels.gross),
        format_ft(breakdown.gross as f64)
    )?;
    writeln!(
        out,
        "SZJA ({}):     -{}",
        format_percent(reference::TAX_SZJA, 0),
        format_ft(breakdown.szja as f64)
    )?;
    writeln!(
        out,
        "TB ({}):     -{}",
        format_percent(reference::TAX_TB, 1),
        format_ft(breakdown.tb as f64)
    )?;
    writeln!(out, "{:<16}{}", format!("{}:", labels.net), format_ft(net))?;
    writeln!(
        out,
        "{:<16}{} (SZOCHO {})",
        format!("{}:", labels.employer_cost),
        format_ft(breakdown.employer_cost as f64),
        format_ft(breakdown.szocho as f64)
    )?;
    let hourly = hourly_from_gross(args.gross, reference::DEFAULT_HOURS_PER_WEEK)?;
    writeln!(
        out,
        "{:<16}{}",
        format!("{}:", labels.hourly_wage),
        format_ft(hourly.hourly_wage as f64)
    )?;
    let quintile = quintile_for(net, lang);
    writeln!(
        out,
        "{:<16}{} ({})",
        format!("{}:", labels.quintile),
        quintile.label,
        quintile.description
    )?;
    let cmp = compare_to_reference(args.gross);
    writeln!(
        out,
        "vs minimum wage {}, median {}, average {}",
        format_percent(cmp.min_wage_ratio, 0),
        format_percent(cmp.median_ratio, 0),
        format_percent(cmp.average_ratio, 0)
    )?;

    let book = ExpenseBook::new(lang);
    writeln!(out, "\n== Expenses ==")?;
    for line in book.lines() {
        writeln!(out, "{:<28}{:>14}", line.label, format_ft(line.value))?;
    }
    writeln!(out, "{:<28}{:>14}", labels.total, format_ft(book.total()))?;
    writeln!(
        out,
        "{:<28}{:>14}",
        labels.remaining,
        format_ft(book.remaining(net))
    )?;

    let quote = LoanQuote::new(args.loan_amount, args.loan_years, net)?;
    let district = match args.district.as_deref() {
        Some(id) => find_district(id)?,
        None => default_district(),
    };
    let estimate = DistrictEstimate::new(district, args.home_size)?;
    writeln!(out, "\n== Housing ==")?;
    writeln!(
        out,
        "Loan {} over {} years: {} / month",
        format_ft(quote.amount as f64),
        quote.years,
        format_ft(quote.monthly_payment as f64)
    )?;
    if quote.is_split {
        writeln!(
            out,
            "  supported {} at {} + market {} at {}",
            format_ft(quote.supported_amount as f64),
            format_percent(reference::SUPPORTED_LOAN_RATE, 0),
            format_ft(quote.market_amount as f64),
            format_percent(reference::MARKET_LOAN_RATE, 2)
        )?;
    }
    writeln!(
        out,
        "  market rate only: {} / month, {} more in total",
        format_ft(quote.market_only_payment as f64),
        format_ft(quote.market_only_extra_cost as f64)
    )?;
    match quote.warning {
        LoanWarning::None => {}
        LoanWarning::Moderate => writeln!(out, "  {}", t.loan_moderate_warning)?,
        LoanWarning::Critical => writeln!(out, "  {}", t.loan_critical_warning)?,
    }
    writeln!(
        out,
        "{} {} m²: price {}, rent {} / month",
        estimate.district_name,
        format_huf(estimate.home_size),
        format_ft(estimate.price as f64),
        format_ft(estimate.rent as f64)
    )?;

    let rate = args.inflation / 100.0;
    writeln!(out, "\n== Inflation ({}) ==", format_percent(rate, 1))?;
    for row in erosion_table(net, rate)? {
        writeln!(
            out,
            "{:>2}y  {:>14}  -{}",
            row.year,
            format_ft(row.future_value as f64),
            format_ft(row.loss as f64)
        )?;
    }

    let plan = InvestmentPlan {
        initial_savings: args.initial_savings,
        monthly_savings: book.suggested_monthly_savings(net).unwrap_or(0.0),
        years: args.years,
        inflation_rate: rate,
        net_income: net,
        disasters: Vec::new(),
    };
    writeln!(
        out,
        "\n== Savings ({} / month, {} years) ==",
        format_ft(plan.monthly_savings),
        plan.years
    )?;
    for scenario in project_scenarios(&plan, lang)? {
        if let Some(last) = scenario.points.last() {
            writeln!(
                out,
                "{:<28}{:>16}  (real {})",
                scenario.name,
                format_ft(last.value as f64),
                format_ft(last.real_value as f64)
            )?;
        }
    }

    Ok(out)
}

fn print_day(day: &DayLog) {
    println!(
        "{} {} d20={:>2} {:<16} {:>12} mood {:>3}{}",
        day.date,
        day.weather.icon,
        day.roll,
        day.event.id,
        format_ft(day.balance),
        day.happiness,
        if day.payday { "  payday" } else { "" }
    );
}

pub async fn simulate(args: &SimulateArgs) -> FinanceResult<()> {
    let breakdown = TaxBreakdown::from_gross(args.gross)?;
    let net = breakdown.net as f64;
    let config = SimulatorConfig {
        start_date: Local::now().date_naive(),
        starting_balance: net,
        starting_happiness: DEFAULT_HAPPINESS,
        monthly_income: net,
        monthly_expenses: ExpenseBook::default().total(),
    };
    let mut sim = LifeSimulator::new(config)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    println!("seed {seed}");

    run_interval(
        &mut sim,
        Duration::from_millis(args.interval_ms.max(1)),
        args.days,
        &mut rng,
        print_day,
    )
    .await;

    let state = sim.snapshot();
    println!(
        "after {} days: balance {}, happiness {}",
        state.day,
        format_ft(state.balance),
        state.happiness
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_args(argv: &[&str]) -> ReportArgs {
        let mut full = vec!["financecalc", "report"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).expect("args should parse").command {
            Command::Report(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn report_defaults_match_reference_values() {
        let args = report_args(&[]);
        assert!((args.gross - 400_000.0).abs() < 1e-9);
        assert_eq!(args.lang, Language::Hu);
        assert_eq!(args.loan_years, 20);
        assert!((args.inflation - 4.5).abs() < 1e-12);
    }

    #[test]
    fn report_prints_worked_example() {
        let out = render_report(&report_args(&["--lang", "en"])).expect("report");
        assert!(out.contains("-60.000 Ft"));
        assert!(out.contains("-74.000 Ft"));
        assert!(out.contains("Net:            266.000 Ft"));
        assert!(out.contains("110.920 Ft / month"));
        assert!(out.contains("Rent"));
        assert!(out.contains("254.545 Ft"));
    }

    #[test]
    fn report_labels_follow_language() {
        let out = render_report(&report_args(&["--lang", "hu"])).expect("report");
        assert!(out.contains("Nettó:          266.000 Ft"));
        assert!(out.contains("Összesen"));
        assert!(out.contains("Marad"));
        assert!(!out.contains("Remaining"));
    }

    #[test]
    fn report_shows_split_loan_and_district() {
        let out = render_report(&report_args(&[
            "--loan-amount",
            "60000000",
            "--district",
            "xiii",
            "--home-size",
            "50",
        ]))
        .expect("report");
        assert!(out.contains("supported 50.000.000 Ft"));
        assert!(out.contains("rent 274.500 Ft"));
    }

    #[test]
    fn report_rejects_out_of_range_inputs() {
        let args = report_args(&["--home-size", "500"]);
        assert!(render_report(&args).is_err());
        assert!(Cli::try_parse_from(["financecalc", "report", "--lang", "xx"]).is_err());
    }

    #[test]
    fn serve_port_defaults_to_8080() {
        let cli = Cli::try_parse_from(["financecalc", "serve"]).expect("args should parse");
        match cli.command {
            Command::Serve { port } => {
                if std::env::var("FINANCECALC_PORT").is_err() {
                    assert_eq!(port, 8080);
                }
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_runs_requested_days() {
        let args = SimulateArgs {
            days: 5,
            seed: Some(3),
            interval_ms: 10,
            gross: 400_000.0,
        };
        assert!(simulate(&args).await.is_ok());
    }
}
