// ⚙️ Settings - where the CSV lives, where the server binds, and the
// accounting assumptions every report applies.
//
// Sources, later wins:
//   1. built-in defaults
//   2. ledger.toml (optional, working directory)
//   3. LEDGER__* environment variables (after .env is loaded)

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub assumptions: Assumptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Ratios and constants the statements are derived with.
/// The source data carries no chart of accounts, so receivables, capex and
/// friends are estimated as fixed shares of the transaction totals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// Share of Asset amounts treated as accounts receivable
    pub receivable_ratio: f64,
    /// Share of total Cash Flow treated as working-capital change
    pub working_capital_ratio: f64,
    /// Share of Asset amounts treated as capital expenditure
    pub capex_ratio: f64,
    /// Share of Liability amounts treated as debt proceeds
    pub debt_proceeds_ratio: f64,
    /// Opening cash for the cash flow statement
    pub opening_cash: f64,
    /// Share of all amounts treated as deposits in transit
    pub deposits_in_transit_ratio: f64,
    pub income_tax_rate: f64,
    pub vat_rate: f64,
    /// Budgeted revenue = actual × this
    pub budget_revenue_factor: f64,
    /// Budgeted expenses = actual × this
    pub budget_expense_factor: f64,
    pub forecast_revenue_growth: f64,
    pub forecast_expense_growth: f64,
    /// Months in the forecast horizon
    pub forecast_months: u32,
    /// Accuracy scores below this are flagged
    pub low_accuracy_threshold: f64,
    /// Amounts further than this many standard deviations from the mean are unusual
    pub outlier_sigma: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Assumptions {
            receivable_ratio: 0.15,
            working_capital_ratio: 0.10,
            capex_ratio: 0.20,
            debt_proceeds_ratio: 0.10,
            opening_cash: 50_000.0,
            deposits_in_transit_ratio: 0.02,
            income_tax_rate: 0.30,
            vat_rate: 0.10,
            budget_revenue_factor: 1.10,
            budget_expense_factor: 0.90,
            forecast_revenue_growth: 1.05,
            forecast_expense_growth: 1.03,
            forecast_months: 3,
            low_accuracy_threshold: 0.8,
            outlier_sigma: 3.0,
        }
    }
}

impl Assumptions {
    /// Reject values that would make a report meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("opening_cash", self.opening_cash),
            ("budget_revenue_factor", self.budget_revenue_factor),
            ("budget_expense_factor", self.budget_expense_factor),
            ("forecast_revenue_growth", self.forecast_revenue_growth),
            ("forecast_expense_growth", self.forecast_expense_growth),
            ("low_accuracy_threshold", self.low_accuracy_threshold),
        ];

        for (key, value) in amounts {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    key: format!("assumptions.{}", key),
                    reason: format!("{} is not a finite number", value),
                });
            }
        }

        let rates = [
            ("receivable_ratio", self.receivable_ratio),
            ("working_capital_ratio", self.working_capital_ratio),
            ("capex_ratio", self.capex_ratio),
            ("debt_proceeds_ratio", self.debt_proceeds_ratio),
            ("deposits_in_transit_ratio", self.deposits_in_transit_ratio),
            ("income_tax_rate", self.income_tax_rate),
            ("vat_rate", self.vat_rate),
        ];

        for (key, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    key: format!("assumptions.{}", key),
                    reason: format!("{} is outside 0.0..=1.0", value),
                });
            }
        }

        if !self.outlier_sigma.is_finite() || self.outlier_sigma <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "assumptions.outlier_sigma".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        if self.forecast_months == 0 {
            return Err(ConfigError::Invalid {
                key: "assumptions.forecast_months".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            csv_path: default_csv_path(),
            server: ServerSettings::default(),
            assumptions: Assumptions::default(),
        }
    }
}

impl Settings {
    /// Load settings from `ledger.toml` and `LEDGER__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name("ledger").required(false))
            .add_source(config::Environment::with_prefix("LEDGER").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.assumptions.validate()?;
        Ok(settings)
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("accounting_data.csv")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assumptions_are_valid() {
        let assumptions = Assumptions::default();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.opening_cash, 50_000.0);
        assert_eq!(assumptions.income_tax_rate, 0.30);
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let assumptions = Assumptions {
            vat_rate: 1.5,
            ..Assumptions::default()
        };

        let err = assumptions.validate().unwrap_err();
        assert!(err.to_string().contains("assumptions.vat_rate"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let nan_cash = Assumptions {
            opening_cash: f64::NAN,
            ..Assumptions::default()
        };
        let err = nan_cash.validate().unwrap_err();
        assert!(err.to_string().contains("assumptions.opening_cash"));

        let infinite_growth = Assumptions {
            forecast_revenue_growth: f64::INFINITY,
            ..Assumptions::default()
        };
        let err = infinite_growth.validate().unwrap_err();
        assert!(err.to_string().contains("assumptions.forecast_revenue_growth"));

        let nan_factor = Assumptions {
            budget_expense_factor: f64::NAN,
            ..Assumptions::default()
        };
        assert!(nan_factor.validate().is_err());
        println!("✅ Non-finite assumptions rejected");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "csv_path = \"data/ledger.csv\"\n[server]\nport = 8080\n[assumptions]\nincome_tax_rate = 0.25\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.csv_path, PathBuf::from("data/ledger.csv"));
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.assumptions.income_tax_rate, 0.25);
        assert_eq!(settings.assumptions.vat_rate, 0.10);
    }
}
