//! Day-by-day "life simulator": every tick advances the calendar, draws the
//! weather and rolls a d20 that picks what happens to the student that day.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::error::{FinanceError, FinanceResult};

pub const DIE_SIDES: u8 = 20;
pub const HAPPINESS_MAX: i32 = 100;
pub const DEFAULT_HAPPINESS: i32 = 70;
pub const LOG_CAPACITY: usize = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCategory {
    CriticalFail,
    Bad,
    Neutral,
    Good,
    CriticalSuccess,
}

impl EventCategory {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            1 => EventCategory::CriticalFail,
            2..=5 => EventCategory::Bad,
            16..=19 => EventCategory::Good,
            20 => EventCategory::CriticalSuccess,
            _ => EventCategory::Neutral,
        }
    }

    pub fn events(self) -> &'static [DailyEvent] {
        match self {
            EventCategory::CriticalFail => &CRITICAL_FAIL,
            EventCategory::Bad => &BAD,
            EventCategory::Neutral => &NEUTRAL,
            EventCategory::Good => &GOOD,
            EventCategory::CriticalSuccess => &CRITICAL_SUCCESS,
        }
    }
}

/// `cost` is what the day takes from the balance; negative means income.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEvent {
    pub id: &'static str,
    pub icon: &'static str,
    pub cost: f64,
    pub mood: i32,
}

const fn event(id: &'static str, icon: &'static str, cost: f64, mood: i32) -> DailyEvent {
    DailyEvent {
        id,
        icon,
        cost,
        mood,
    }
}

const CRITICAL_FAIL: [DailyEvent; 4] = [
    event("broken_appliance", "💥", 15_000.0, -20),
    event("fine", "🚓", 10_000.0, -15),
    event("medical", "🏥", 8_000.0, -10),
    event("theft", "🦹", 12_000.0, -25),
];

const BAD: [DailyEvent; 4] = [
    event("bad_food", "🤢", 2_000.0, -5),
    event("lost_ticket", "🎫", 1_500.0, -5),
    event("umbrella", "☂️", 3_000.0, -2),
    event("coffee_spill", "☕", 0.0, -5),
];

const NEUTRAL: [DailyEvent; 5] = [
    event("work", "💼", 0.0, -1),
    event("groceries", "🛒", 3_000.0, 0),
    event("read_book", "📖", 0.0, 2),
    event("walk", "🚶", 0.0, 3),
    event("netflix", "📺", 0.0, 1),
];

const GOOD: [DailyEvent; 4] = [
    event("found_money", "💰", -1_000.0, 5),
    event("discount", "🏷️", -500.0, 3),
    event("compliment", "😊", 0.0, 5),
    event("good_meal", "🍕", 4_000.0, 5),
];

const CRITICAL_SUCCESS: [DailyEvent; 4] = [
    event("bonus", "💎", -20_000.0, 30),
    event("gift", "🎁", -5_000.0, 20),
    event("lottery", "🎰", -15_000.0, 25),
    event("promotion", "📈", -30_000.0, 40),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub id: &'static str,
    pub icon: &'static str,
    pub mood_mod: i32,
}

pub const WEATHER_TYPES: [Weather; 5] = [
    Weather {
        id: "sunny",
        icon: "☀️",
        mood_mod: 5,
    },
    Weather {
        id: "cloudy",
        icon: "☁️",
        mood_mod: 0,
    },
    Weather {
        id: "rainy",
        icon: "🌧️",
        mood_mod: -5,
    },
    Weather {
        id: "stormy",
        icon: "⛈️",
        mood_mod: -10,
    },
    Weather {
        id: "snowy",
        icon: "❄️",
        mood_mod: 2,
    },
];

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolledEvent {
    pub roll: u8,
    pub category: EventCategory,
    pub event: DailyEvent,
}

pub fn roll_d20<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=DIE_SIDES)
}

pub fn draw_event<R: Rng + ?Sized>(roll: u8, rng: &mut R) -> RolledEvent {
    let category = EventCategory::from_roll(roll);
    let events = category.events();
    let event = events[rng.gen_range(0..events.len())];
    RolledEvent {
        roll,
        category,
        event,
    }
}

pub fn random_weather<R: Rng + ?Sized>(rng: &mut R) -> Weather {
    WEATHER_TYPES.choose(rng).copied().unwrap_or(WEATHER_TYPES[1])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    pub start_date: NaiveDate,
    pub starting_balance: f64,
    pub starting_happiness: i32,
    /// Credited on the first day of every month.
    pub monthly_income: f64,
    /// Debited on the first day of every month.
    pub monthly_expenses: f64,
}

impl SimulatorConfig {
    pub fn validate(&self) -> FinanceResult<()> {
        if !self.starting_balance.is_finite() {
            return Err(FinanceError::invalid("startingBalance", "a finite number"));
        }
        if !(0..=HAPPINESS_MAX).contains(&self.starting_happiness) {
            return Err(FinanceError::invalid("startingHappiness", "between 0 and 100"));
        }
        if !self.monthly_income.is_finite() || self.monthly_income < 0.0 {
            return Err(FinanceError::invalid("monthlyIncome", ">= 0"));
        }
        if !self.monthly_expenses.is_finite() || self.monthly_expenses < 0.0 {
            return Err(FinanceError::invalid("monthlyExpenses", ">= 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub day: u32,
    pub date: NaiveDate,
    pub weather: Weather,
    pub roll: u8,
    pub category: EventCategory,
    pub event: DailyEvent,
    pub payday: bool,
    pub balance: f64,
    pub happiness: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorSnapshot {
    pub day: u32,
    pub date: NaiveDate,
    pub balance: f64,
    pub happiness: i32,
    pub weather: Weather,
    pub running: bool,
    pub recent: Vec<DayLog>,
}

#[derive(Debug, Clone)]
pub struct LifeSimulator {
    date: NaiveDate,
    day: u32,
    balance: f64,
    happiness: i32,
    weather: Weather,
    running: bool,
    monthly_income: f64,
    monthly_expenses: f64,
    log: VecDeque<DayLog>,
}

impl LifeSimulator {
    pub fn new(config: SimulatorConfig) -> FinanceResult<Self> {
        config.validate()?;
        Ok(Self {
            date: config.start_date,
            day: 0,
            balance: config.starting_balance,
            happiness: config.starting_happiness,
            weather: WEATHER_TYPES[0],
            running: true,
            monthly_income: config.monthly_income,
            monthly_expenses: config.monthly_expenses,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        })
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    /// Advances one day. Returns `None` while paused or when the calendar
    /// cannot advance any further.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<DayLog> {
        if !self.running {
            return None;
        }
        let date = self.date.checked_add_days(Days::new(1))?;
        self.date = date;
        self.day += 1;

        let payday = date.day() == 1;
        if payday {
            self.balance += self.monthly_income - self.monthly_expenses;
        }

        self.weather = random_weather(rng);
        let rolled = draw_event(roll_d20(rng), rng);
        self.balance -= rolled.event.cost;
        self.happiness =
            (self.happiness + rolled.event.mood + self.weather.mood_mod).clamp(0, HAPPINESS_MAX);

        let entry = DayLog {
            day: self.day,
            date,
            weather: self.weather,
            roll: rolled.roll,
            category: rolled.category,
            event: rolled.event,
            payday,
            balance: self.balance,
            happiness: self.happiness,
        };
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(entry.clone());

        debug!(
            target: "sim.tick",
            day = self.day,
            roll = rolled.roll,
            event = rolled.event.id,
            balance = self.balance,
            happiness = self.happiness,
            "Day simulated"
        );
        Some(entry)
    }

    pub fn snapshot(&self) -> SimulatorSnapshot {
        SimulatorSnapshot {
            day: self.day,
            date: self.date,
            balance: self.balance,
            happiness: self.happiness,
            weather: self.weather,
            running: self.running,
            recent: self.log.iter().cloned().collect(),
        }
    }
}

/// Ticks `sim` once per `period` for `ticks` days, handing each day to
/// `on_day` as it happens.
pub async fn run_interval<R, F>(
    sim: &mut LifeSimulator,
    period: Duration,
    ticks: u32,
    rng: &mut R,
    mut on_day: F,
) -> Vec<DayLog>
where
    R: Rng + ?Sized,
    F: FnMut(&DayLog),
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut days = Vec::with_capacity(ticks as usize);
    for _ in 0..ticks {
        interval.tick().await;
        let Some(entry) = sim.tick(rng) else {
            break;
        };
        on_day(&entry);
        days.push(entry);
    }

    info!(
        target: "sim.tick",
        days = days.len(),
        balance = sim.balance(),
        happiness = sim.happiness(),
        "Simulation finished"
    );
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_config() -> SimulatorConfig {
        SimulatorConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 30).expect("valid date"),
            starting_balance: 100_000.0,
            starting_happiness: DEFAULT_HAPPINESS,
            monthly_income: 266_000.0,
            monthly_expenses: 279_500.0,
        }
    }

    #[test]
    fn roll_maps_to_five_categories() {
        assert_eq!(EventCategory::from_roll(1), EventCategory::CriticalFail);
        for roll in 2..=5 {
            assert_eq!(EventCategory::from_roll(roll), EventCategory::Bad);
        }
        for roll in 6..=15 {
            assert_eq!(EventCategory::from_roll(roll), EventCategory::Neutral);
        }
        for roll in 16..=19 {
            assert_eq!(EventCategory::from_roll(roll), EventCategory::Good);
        }
        assert_eq!(EventCategory::from_roll(20), EventCategory::CriticalSuccess);
    }

    #[test]
    fn drawn_event_belongs_to_rolled_category() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for roll in 1..=DIE_SIDES {
            let rolled = draw_event(roll, &mut rng);
            assert!(rolled.category.events().contains(&rolled.event));
        }
    }

    #[test]
    fn paused_simulator_does_not_advance() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut sim = LifeSimulator::new(sample_config()).expect("valid config");
        sim.pause();
        assert!(sim.tick(&mut rng).is_none());
        assert_eq!(sim.date(), sample_config().start_date);

        sim.resume();
        assert!(sim.tick(&mut rng).is_some());
    }

    #[test]
    fn first_of_month_credits_salary_minus_expenses() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut sim = LifeSimulator::new(sample_config()).expect("valid config");

        let jan_31 = sim.tick(&mut rng).expect("ticks");
        assert!(!jan_31.payday);
        let before = sim.balance();

        let feb_1 = sim.tick(&mut rng).expect("ticks");
        assert!(feb_1.payday);
        assert_eq!(feb_1.date, NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid"));
        let expected = before + 266_000.0 - 279_500.0 - feb_1.event.cost;
        assert!((feb_1.balance - expected).abs() < 1e-9);
    }

    #[test]
    fn log_keeps_only_recent_days() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut sim = LifeSimulator::new(sample_config()).expect("valid config");
        for _ in 0..(LOG_CAPACITY + 10) {
            sim.tick(&mut rng);
        }
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.recent.len(), LOG_CAPACITY);
        assert_eq!(snapshot.recent[0].day, 11);
        assert_eq!(snapshot.day as usize, LOG_CAPACITY + 10);
    }

    #[test]
    fn config_rejects_out_of_range_happiness() {
        let mut config = sample_config();
        config.starting_happiness = 101;
        assert!(LifeSimulator::new(config).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn run_interval_ticks_requested_days() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut sim = LifeSimulator::new(sample_config()).expect("valid config");
        let mut seen = 0;
        let days = run_interval(
            &mut sim,
            Duration::from_millis(250),
            5,
            &mut rng,
            |_| seen += 1,
        )
        .await;
        assert_eq!(days.len(), 5);
        assert_eq!(seen, 5);
        assert_eq!(days[4].day, 5);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_happiness_stays_clamped(seed in any::<u64>(), start in 0i32..=100) {
            let mut config = sample_config();
            config.starting_happiness = start;
            let mut sim = LifeSimulator::new(config).expect("valid config");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..120 {
                let day = sim.tick(&mut rng).expect("ticks");
                prop_assert!((0..=HAPPINESS_MAX).contains(&day.happiness));
            }
        }

        #[test]
        fn prop_same_seed_replays_same_days(seed in any::<u64>()) {
            let mut a = LifeSimulator::new(sample_config()).expect("valid config");
            let mut b = LifeSimulator::new(sample_config()).expect("valid config");
            let mut rng_a = ChaCha8Rng::seed_from_u64(seed);
            let mut rng_b = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..40 {
                prop_assert_eq!(a.tick(&mut rng_a), b.tick(&mut rng_b));
            }
        }
    }
}
