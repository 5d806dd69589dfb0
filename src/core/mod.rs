mod error;
pub mod expenses;
pub mod format;
pub mod i18n;
pub mod income;
pub mod inflation;
pub mod investment;
pub mod loan;
pub mod reference;
pub mod simulator;

pub use error::{FinanceError, FinanceResult};
pub use expenses::{ExpenseBook, ExpenseLine};
pub use i18n::Language;
pub use income::{TaxBreakdown, WageMode};
pub use investment::{InvestmentPlan, SavingsAccount};
pub use loan::{DistrictEstimate, LoanQuote};
pub use simulator::{LifeSimulator, SimulatorConfig};
