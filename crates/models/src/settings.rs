use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of `settings.json`. Every field has a default so a partial file
/// (or no file at all) still yields a working configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_title: String,
    /// Directory holding the statement documents, relative to the working directory
    /// unless absolute.
    pub data_dir: PathBuf,
    pub files: DocumentFiles,
    pub reporting: ReportingYears,
    pub server: ServerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_title: "LTI Intelligence Platform".to_string(),
            data_dir: PathBuf::from("json"),
            files: DocumentFiles::default(),
            reporting: ReportingYears::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Settings {
    pub fn balance_sheet_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.balance_sheet)
    }

    pub fn profit_and_loss_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.profit_and_loss)
    }

    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.employees)
    }

    pub fn current_investments_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.current_investments)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFiles {
    pub balance_sheet: String,
    pub profit_and_loss: String,
    pub employees: String,
    pub current_investments: String,
}

impl Default for DocumentFiles {
    fn default() -> Self {
        Self {
            balance_sheet: "balanceSheet.json".to_string(),
            profit_and_loss: "profitAndLoss.json".to_string(),
            employees: "employee_chart1.json".to_string(),
            current_investments: "currentInvestments.json".to_string(),
        }
    }
}

/// Year keys looked up in year-keyed records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingYears {
    pub current_year: String,
    pub prior_year: String,
}

impl Default for ReportingYears {
    fn default() -> Self {
        Self {
            current_year: "2024".to_string(),
            prior_year: "2023".to_string(),
        }
    }
}

impl ReportingYears {
    /// Chronological order, as used on comparison chart axes.
    pub fn both(&self) -> [&str; 2] {
        [&self.prior_year, &self.current_year]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"data_dir": "data", "reporting": {"current_year": "2025"}}"#)
                .unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.reporting.current_year, "2025");
        assert_eq!(settings.reporting.prior_year, "2023");
        assert_eq!(settings.server.port, 8501);
        assert_eq!(
            settings.balance_sheet_path(),
            PathBuf::from("data").join("balanceSheet.json")
        );
    }

    #[test]
    fn test_default_paths() {
        let settings = Settings::default();
        assert_eq!(settings.employees_path(), PathBuf::from("json/employee_chart1.json"));
        assert_eq!(settings.reporting.both(), ["2023", "2024"]);
    }
}
