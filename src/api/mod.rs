use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::expenses::ExpenseLine;
use crate::core::income::{
    AnswerCheck, HourlyWage, QuintileGuess, QuintileMatch, ReferenceComparison, check_answers,
    check_quintile_guess, compare_to_reference, hourly_wage, quintile_at, quintile_for,
};
use crate::core::inflation::{ErosionRow, erosion_table};
use crate::core::investment::{
    ChartRow, Disaster, DisasterOutcome, ScenarioProjection, merge_chart, project_scenarios,
};
use crate::core::loan::{LoanWarning, add_housing_cost_to_expenses};
use crate::core::reference::{
    self, DISTRICTS, District, SCENARIOS, SOURCES, ScenarioId, Sources, default_district,
    find_district,
};
use crate::core::simulator::{DEFAULT_HAPPINESS, DayLog, SimulatorSnapshot};
use crate::core::{
    DistrictEstimate, ExpenseBook, FinanceError, InvestmentPlan, Language, LifeSimulator,
    LoanQuote, SavingsAccount, SimulatorConfig, TaxBreakdown, WageMode,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_SIMULATION_DAYS: u32 = 366;
const DEFAULT_SIMULATION_DAYS: u32 = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiWageMode {
    #[serde(alias = "fromGross", alias = "from_gross")]
    FromGross,
    #[serde(alias = "fromHourly", alias = "from_hourly")]
    FromHourly,
}

impl From<ApiWageMode> for WageMode {
    fn from(value: ApiWageMode) -> Self {
        match value {
            ApiWageMode::FromGross => WageMode::FromGross,
            ApiWageMode::FromHourly => WageMode::FromHourly,
        }
    }
}

impl From<WageMode> for ApiWageMode {
    fn from(value: WageMode) -> Self {
        match value {
            WageMode::FromGross => ApiWageMode::FromGross,
            WageMode::FromHourly => ApiWageMode::FromHourly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiHousingCost {
    Rent,
    #[serde(alias = "instalment", alias = "installment")]
    Payment,
    #[serde(alias = "marketPayment", alias = "market_payment")]
    MarketPayment,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<FinanceError> for ApiError {
    fn from(value: FinanceError) -> Self {
        let status = match value {
            FinanceError::Bankrupt => StatusCode::CONFLICT,
            FinanceError::Format(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: value.to_string(),
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Fields every tab shares: the salary the student typed and the UI language.
#[derive(Debug, Clone, Copy)]
struct Common {
    gross: f64,
    lang: Language,
    breakdown: TaxBreakdown,
}

fn resolve_common(gross_income: Option<f64>, lang: Option<&str>) -> ApiResult<Common> {
    let gross = gross_income.unwrap_or(reference::DEFAULT_GROSS);
    let lang = match lang {
        Some(code) => Language::from_code(code)?,
        None => Language::default(),
    };
    let breakdown = TaxBreakdown::from_gross(gross)?;
    Ok(Common {
        gross,
        lang,
        breakdown,
    })
}

fn resolve_book(lines: Option<Vec<ExpenseLine>>, lang: Language) -> ApiResult<ExpenseBook> {
    match lines {
        Some(lines) => Ok(ExpenseBook::from_lines(lines, lang)?),
        None => Ok(ExpenseBook::new(lang)),
    }
}

fn percent_to_rate(field: &str, percent: f64) -> ApiResult<f64> {
    if !percent.is_finite() {
        return Err(ApiError::bad_request(format!("{field} must be a number")));
    }
    Ok(percent / 100.0)
}

// ---- reference ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReferencePayload {
    lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LanguageOption {
    code: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioOption {
    id: ScenarioId,
    name: &'static str,
    annual_rate: f64,
    color: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceResponse {
    lang: Language,
    min_wage: f64,
    avg_gross: f64,
    avg_gross_budapest: f64,
    median_gross: f64,
    tax_szja: f64,
    tax_tb: f64,
    tax_szocho: f64,
    avg_home_size: f64,
    market_loan_rate: f64,
    supported_loan_rate: f64,
    supported_loan_max: f64,
    default_district: &'static str,
    districts: &'static [District],
    quintiles: Vec<QuintileMatch>,
    scenarios: Vec<ScenarioOption>,
    languages: Vec<LanguageOption>,
    sources: Sources,
}

fn reference_from_payload(payload: ReferencePayload) -> ApiResult<ReferenceResponse> {
    let lang = match payload.lang.as_deref() {
        Some(code) => Language::from_code(code)?,
        None => Language::default(),
    };
    let t = lang.translations();
    Ok(ReferenceResponse {
        lang,
        min_wage: reference::MIN_WAGE_2025,
        avg_gross: reference::AVG_GROSS,
        avg_gross_budapest: reference::AVG_GROSS_BUDAPEST,
        median_gross: reference::MEDIAN_GROSS,
        tax_szja: reference::TAX_SZJA,
        tax_tb: reference::TAX_TB,
        tax_szocho: reference::TAX_SZOCHO,
        avg_home_size: reference::AVG_HOME_SIZE_SQM,
        market_loan_rate: reference::MARKET_LOAN_RATE,
        supported_loan_rate: reference::SUPPORTED_LOAN_RATE,
        supported_loan_max: reference::SUPPORTED_LOAN_MAX,
        default_district: default_district().id,
        districts: &DISTRICTS,
        quintiles: (0..reference::QUINTILE_BANDS.len())
            .map(|idx| quintile_at(idx, lang))
            .collect(),
        scenarios: SCENARIOS
            .iter()
            .map(|s| ScenarioOption {
                id: s.id,
                name: t.scenario_name(s.id),
                annual_rate: s.annual_rate,
                color: s.color,
            })
            .collect(),
        languages: Language::ALL
            .into_iter()
            .map(|l| LanguageOption {
                code: l.code(),
                label: l.label(),
            })
            .collect(),
        sources: SOURCES,
    })
}

// ---- income ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct IncomePayload {
    gross_income: Option<f64>,
    lang: Option<String>,
    hours_per_week: Option<f64>,
    hourly_wage: Option<f64>,
    calculation_mode: Option<ApiWageMode>,
    szja_answer: Option<String>,
    tb_answer: Option<String>,
    quintile_guess: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IncomeResponse {
    lang: Language,
    calculation_mode: ApiWageMode,
    breakdown: TaxBreakdown,
    hourly: HourlyWage,
    answers: AnswerCheck,
    quintile: QuintileMatch,
    quintile_guess: Option<QuintileGuess>,
    comparison: ReferenceComparison,
}

fn income_from_payload(payload: IncomePayload) -> ApiResult<IncomeResponse> {
    let common = resolve_common(payload.gross_income, payload.lang.as_deref())?;
    let mode: WageMode = payload
        .calculation_mode
        .map(Into::into)
        .unwrap_or_default();
    let hours = payload
        .hours_per_week
        .unwrap_or(reference::DEFAULT_HOURS_PER_WEEK);
    let hourly = hourly_wage(
        mode,
        common.gross,
        payload.hourly_wage.unwrap_or(0.0),
        hours,
    )?;

    let breakdown = match mode {
        WageMode::FromGross => common.breakdown,
        WageMode::FromHourly => TaxBreakdown::from_gross(hourly.gross_monthly as f64)?,
    };
    let net = breakdown.net as f64;
    let quintile_guess = payload
        .quintile_guess
        .map(|guess| check_quintile_guess(guess, net))
        .transpose()?;

    Ok(IncomeResponse {
        lang: common.lang,
        calculation_mode: mode.into(),
        breakdown,
        hourly,
        answers: check_answers(
            &breakdown,
            payload.szja_answer.as_deref().unwrap_or(""),
            payload.tb_answer.as_deref().unwrap_or(""),
        ),
        quintile: quintile_for(net, common.lang),
        quintile_guess,
        comparison: compare_to_reference(breakdown.gross as f64),
    })
}

// ---- expenses ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewExpense {
    name: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseUpdate {
    id: String,
    value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExpensesPayload {
    gross_income: Option<f64>,
    lang: Option<String>,
    expenses: Option<Vec<ExpenseLine>>,
    add: Option<NewExpense>,
    update: Option<ExpenseUpdate>,
    remove: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpensesResponse {
    lang: Language,
    expenses: Vec<ExpenseLine>,
    added_id: Option<String>,
    total: i64,
    net: i64,
    remaining: i64,
    suggested_monthly_savings: Option<i64>,
}

fn expenses_from_payload(payload: ExpensesPayload) -> ApiResult<ExpensesResponse> {
    let common = resolve_common(payload.gross_income, payload.lang.as_deref())?;
    let mut book = resolve_book(payload.expenses, common.lang)?;

    if let Some(update) = payload.update {
        book.update(&update.id, update.value)?;
    }
    if let Some(id) = payload.remove {
        book.remove(&id)?;
    }
    let added_id = match payload.add {
        Some(line) => Some(book.add(&line.name, line.value)?),
        None => None,
    };

    let net = common.breakdown.net as f64;
    Ok(ExpensesResponse {
        lang: common.lang,
        added_id,
        total: crate::core::format::round_ft(book.total()),
        net: common.breakdown.net,
        remaining: crate::core::format::round_ft(book.remaining(net)),
        suggested_monthly_savings: book
            .suggested_monthly_savings(net)
            .map(crate::core::format::round_ft),
        expenses: book.lines().to_vec(),
    })
}

// ---- loan ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoanPayload {
    gross_income: Option<f64>,
    lang: Option<String>,
    loan_amount: Option<f64>,
    loan_years: Option<u32>,
    district: Option<String>,
    home_size: Option<f64>,
    add_to_expenses: Option<ApiHousingCost>,
    expense_name: Option<String>,
    expenses: Option<Vec<ExpenseLine>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanResponse {
    lang: Language,
    net: i64,
    quote: LoanQuote,
    warning_message: Option<&'static str>,
    estimate: DistrictEstimate,
    feedback: Option<String>,
    expenses: Option<Vec<ExpenseLine>>,
}

fn loan_from_payload(payload: LoanPayload) -> ApiResult<LoanResponse> {
    let common = resolve_common(payload.gross_income, payload.lang.as_deref())?;
    let t = common.lang.translations();

    let quote = LoanQuote::new(
        payload.loan_amount.unwrap_or(reference::DEFAULT_LOAN_AMOUNT),
        payload.loan_years.unwrap_or(reference::DEFAULT_LOAN_YEARS),
        common.breakdown.net as f64,
    )?;
    let district = match payload.district.as_deref() {
        Some(id) => find_district(id)?,
        None => default_district(),
    };
    let estimate = DistrictEstimate::new(
        district,
        payload.home_size.unwrap_or(reference::DEFAULT_HOME_SIZE_SQM),
    )?;

    let warning_message = match quote.warning {
        LoanWarning::None => None,
        LoanWarning::Moderate => Some(t.loan_moderate_warning),
        LoanWarning::Critical => Some(t.loan_critical_warning),
    };

    let (feedback, expenses) = match payload.add_to_expenses {
        Some(cost) => {
            let mut book = resolve_book(payload.expenses, common.lang)?;
            let (default_name, amount) = match cost {
                ApiHousingCost::Rent => (
                    format!("{} ({})", t.expenses.rent, estimate.district_id),
                    estimate.rent,
                ),
                ApiHousingCost::Payment => {
                    (t.loan_payment_label.to_string(), quote.monthly_payment)
                }
                ApiHousingCost::MarketPayment => (
                    t.loan_market_payment_label.to_string(),
                    quote.market_only_payment,
                ),
            };
            let name = payload
                .expense_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(default_name);
            let feedback = add_housing_cost_to_expenses(&mut book, &name, amount as f64)?;
            (Some(feedback), Some(book.lines().to_vec()))
        }
        None => (None, None),
    };

    Ok(LoanResponse {
        lang: common.lang,
        net: common.breakdown.net,
        quote,
        warning_message,
        estimate,
        feedback,
        expenses,
    })
}

// ---- inflation ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InflationPayload {
    gross_income: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InflationResponse {
    net: i64,
    inflation_rate: f64,
    rows: Vec<ErosionRow>,
}

fn inflation_from_payload(payload: InflationPayload) -> ApiResult<InflationResponse> {
    let common = resolve_common(payload.gross_income, None)?;
    let rate = match payload.inflation_rate {
        Some(percent) => percent_to_rate("inflationRate", percent)?,
        None => reference::DEFAULT_INFLATION_RATE,
    };
    Ok(InflationResponse {
        net: common.breakdown.net,
        inflation_rate: rate,
        rows: erosion_table(common.breakdown.net as f64, rate)?,
    })
}

// ---- investment ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InvestmentPayload {
    gross_income: Option<f64>,
    lang: Option<String>,
    initial_savings: Option<f64>,
    monthly_savings: Option<f64>,
    invest_years: Option<u32>,
    inflation_rate: Option<f64>,
    disasters: Option<Vec<Disaster>>,
    expenses: Option<Vec<ExpenseLine>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentResponse {
    lang: Language,
    net: i64,
    initial_savings: f64,
    monthly_savings: f64,
    invest_years: u32,
    scenarios: Vec<ScenarioProjection>,
    chart: Vec<ChartRow>,
}

fn investment_from_payload(payload: InvestmentPayload) -> ApiResult<InvestmentResponse> {
    let common = resolve_common(payload.gross_income, payload.lang.as_deref())?;
    let net = common.breakdown.net as f64;

    let monthly_savings = match payload.monthly_savings {
        Some(v) => v,
        None => resolve_book(payload.expenses, common.lang)?
            .suggested_monthly_savings(net)
            .unwrap_or(0.0),
    };
    let inflation_rate = match payload.inflation_rate {
        Some(percent) => percent_to_rate("inflationRate", percent)?,
        None => reference::DEFAULT_INFLATION_RATE,
    };

    let plan = InvestmentPlan {
        initial_savings: payload.initial_savings.unwrap_or(0.0),
        monthly_savings,
        years: payload
            .invest_years
            .unwrap_or(reference::DEFAULT_INVEST_YEARS),
        inflation_rate,
        net_income: net,
        disasters: payload.disasters.unwrap_or_default(),
    };
    let scenarios = project_scenarios(&plan, common.lang)?;
    let chart = merge_chart(&scenarios);

    Ok(InvestmentResponse {
        lang: common.lang,
        net: common.breakdown.net,
        initial_savings: plan.initial_savings,
        monthly_savings: plan.monthly_savings,
        invest_years: plan.years,
        scenarios,
        chart,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DisasterPayload {
    lang: Option<String>,
    initial_savings: Option<f64>,
    bankrupt: Option<bool>,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DisasterResponse {
    seed: u64,
    outcome: DisasterOutcome,
    bankruptcy_message: Option<&'static str>,
}

fn disaster_from_payload(payload: DisasterPayload) -> ApiResult<DisasterResponse> {
    let lang = match payload.lang.as_deref() {
        Some(code) => Language::from_code(code)?,
        None => Language::default(),
    };
    let initial_savings = payload.initial_savings.unwrap_or(0.0);
    if !initial_savings.is_finite() {
        return Err(ApiError::bad_request("initialSavings must be a number"));
    }
    let mut account = SavingsAccount {
        initial_savings,
        bankrupt: payload.bankrupt.unwrap_or(false),
    };
    let seed = payload.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let outcome = account.roll_disaster(&mut rng, lang)?;

    Ok(DisasterResponse {
        seed,
        bankruptcy_message: outcome.bankrupt.then_some(lang.translations().bankruptcy),
        outcome,
    })
}

// ---- simulator ----

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatorPayload {
    gross_income: Option<f64>,
    seed: Option<u64>,
    days: Option<u32>,
    start_date: Option<NaiveDate>,
    starting_balance: Option<f64>,
    starting_happiness: Option<i32>,
    monthly_expenses: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulatorResponse {
    seed: u64,
    start_date: NaiveDate,
    days: Vec<DayLog>,
    state: SimulatorSnapshot,
}

fn simulator_from_payload(payload: SimulatorPayload) -> ApiResult<SimulatorResponse> {
    let common = resolve_common(payload.gross_income, None)?;
    let days = payload.days.unwrap_or(DEFAULT_SIMULATION_DAYS);
    if days == 0 || days > MAX_SIMULATION_DAYS {
        return Err(ApiError::bad_request(format!(
            "days must be between 1 and {MAX_SIMULATION_DAYS}"
        )));
    }

    let net = common.breakdown.net as f64;
    let config = SimulatorConfig {
        start_date: payload
            .start_date
            .unwrap_or_else(|| Local::now().date_naive()),
        starting_balance: payload.starting_balance.unwrap_or(net),
        starting_happiness: payload.starting_happiness.unwrap_or(DEFAULT_HAPPINESS),
        monthly_income: net,
        monthly_expenses: payload
            .monthly_expenses
            .unwrap_or_else(|| ExpenseBook::new(common.lang).total()),
    };
    let start_date = config.start_date;
    let mut sim = LifeSimulator::new(config)?;
    let seed = payload.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut trace = Vec::with_capacity(days as usize);
    for _ in 0..days {
        match sim.tick(&mut rng) {
            Some(day) => trace.push(day),
            None => break,
        }
    }

    Ok(SimulatorResponse {
        seed,
        start_date,
        days: trace,
        state: sim.snapshot(),
    })
}

// ---- server ----

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/reference",
            get(reference_get_handler).post(reference_post_handler),
        )
        .route(
            "/api/income",
            get(income_get_handler).post(income_post_handler),
        )
        .route("/api/expenses", post(expenses_post_handler))
        .route("/api/loan", get(loan_get_handler).post(loan_post_handler))
        .route(
            "/api/inflation",
            get(inflation_get_handler).post(inflation_post_handler),
        )
        .route(
            "/api/investment",
            get(investment_get_handler).post(investment_post_handler),
        )
        .route("/api/investment/disaster", post(disaster_post_handler))
        .route(
            "/api/simulator",
            get(simulator_get_handler).post(simulator_post_handler),
        )
        .fallback(not_found_handler)
        .layer(middleware::map_response(no_store))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(target: "api", %addr, "Finance calculator listening");
    info!(target: "api", "Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn reference_get_handler(payload: Result<Query<ReferencePayload>, QueryRejection>) -> Response {
    respond("reference", query_payload(payload).and_then(reference_from_payload))
}

async fn reference_post_handler(payload: Result<Json<ReferencePayload>, JsonRejection>) -> Response {
    respond("reference", json_payload(payload).and_then(reference_from_payload))
}

async fn income_get_handler(payload: Result<Query<IncomePayload>, QueryRejection>) -> Response {
    respond("income", query_payload(payload).and_then(income_from_payload))
}

async fn income_post_handler(payload: Result<Json<IncomePayload>, JsonRejection>) -> Response {
    respond("income", json_payload(payload).and_then(income_from_payload))
}

async fn expenses_post_handler(payload: Result<Json<ExpensesPayload>, JsonRejection>) -> Response {
    respond("expenses", json_payload(payload).and_then(expenses_from_payload))
}

async fn loan_get_handler(payload: Result<Query<LoanPayload>, QueryRejection>) -> Response {
    respond("loan", query_payload(payload).and_then(loan_from_payload))
}

async fn loan_post_handler(payload: Result<Json<LoanPayload>, JsonRejection>) -> Response {
    respond("loan", json_payload(payload).and_then(loan_from_payload))
}

async fn inflation_get_handler(payload: Result<Query<InflationPayload>, QueryRejection>) -> Response {
    respond("inflation", query_payload(payload).and_then(inflation_from_payload))
}

async fn inflation_post_handler(payload: Result<Json<InflationPayload>, JsonRejection>) -> Response {
    respond("inflation", json_payload(payload).and_then(inflation_from_payload))
}

async fn investment_get_handler(payload: Result<Query<InvestmentPayload>, QueryRejection>) -> Response {
    respond("investment", query_payload(payload).and_then(investment_from_payload))
}

async fn investment_post_handler(payload: Result<Json<InvestmentPayload>, JsonRejection>) -> Response {
    respond("investment", json_payload(payload).and_then(investment_from_payload))
}

async fn disaster_post_handler(payload: Result<Json<DisasterPayload>, JsonRejection>) -> Response {
    respond("disaster", json_payload(payload).and_then(disaster_from_payload))
}

async fn simulator_get_handler(payload: Result<Query<SimulatorPayload>, QueryRejection>) -> Response {
    respond("simulator", query_payload(payload).and_then(simulator_from_payload))
}

async fn simulator_post_handler(payload: Result<Json<SimulatorPayload>, JsonRejection>) -> Response {
    respond("simulator", json_payload(payload).and_then(simulator_from_payload))
}

/// Malformed bodies and query strings become the same `400 {"error"}`
/// response as failed validation.
fn json_payload<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn query_payload<T>(payload: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    payload
        .map(|Query(payload)| payload)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn respond<T: Serialize>(endpoint: &'static str, result: ApiResult<T>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            warn!(target: "api", endpoint, status = %err.status, error = %err.message, "Rejected request");
            error_response(err.status, &err.message)
        }
    }
}

/// Applied router-wide so extractor rejections and 405s are not cached either.
async fn no_store(response: Response) -> Response {
    with_cache_control(response)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
