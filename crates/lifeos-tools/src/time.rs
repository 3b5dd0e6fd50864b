// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current local time for Madrid, with Spanish weekday names.

use async_trait::async_trait;
use chrono::{Datelike, Utc, Weekday};
use chrono_tz::Europe::Madrid;
use lifeos_core::{LifeosError, ToolSpec, UserProfile};

use crate::catalog::Tool;

/// Weekday names are mapped by hand so the output does not depend on
/// any locale being installed in the container.
fn weekday_es(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Reports the current date, time, and weekday in Madrid.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "current_time".into(),
            description: "Useful for getting the current local date, time, and day of the week \
                          in Madrid/Spain. Use this BEFORE scheduling, checking agenda, or \
                          asking about 'today'."
                .into(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    async fn invoke(
        &self,
        _args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let now = Utc::now().with_timezone(&Madrid);
        Ok(format!(
            "{}, {}",
            weekday_es(now.weekday()),
            now.format("%Y-%m-%d %H:%M:%S %Z")
        ))
    }
}
