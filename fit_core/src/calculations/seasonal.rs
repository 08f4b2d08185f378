//! # Seasonal Advisor
//!
//! Construction-duration estimate and weather advice by season.
//!
//! Seasons follow the southern hemisphere, where the catalog data
//! originates:
//!
//! | Season | Months      | Duration |
//! |--------|-------------|----------|
//! | Summer | Dec–Feb     | 7 weeks  |
//! | Autumn | Mar–May     | 7 weeks  |
//! | Winter | Jun–Aug     | 10 weeks |
//! | Spring | Sep–Nov     | 6 weeks  |
//!
//! The month is always passed in by the caller; nothing here reads a clock.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Month;
//! use fit_core::calculations::seasonal::{Season, SeasonalAdvisor};
//!
//! let rec = SeasonalAdvisor::recommend(Month::July);
//! assert_eq!(rec.season, Season::Winter);
//! assert_eq!(rec.duration_weeks, 10);
//! ```

use chrono::Month;
use serde::{Deserialize, Serialize};

/// Months in which breaking ground is recommended, in display order.
pub const BEST_MONTHS: [Month; 6] = [
    Month::September,
    Month::October,
    Month::November,
    Month::December,
    Month::March,
    Month::April,
];

/// Southern-hemisphere season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Autumn,
    Winter,
    Spring,
}

impl Season {
    /// Season containing `month`.
    pub fn of(month: Month) -> Self {
        match month {
            Month::December | Month::January | Month::February => Season::Summer,
            Month::March | Month::April | Month::May => Season::Autumn,
            Month::June | Month::July | Month::August => Season::Winter,
            Month::September | Month::October | Month::November => Season::Spring,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Summer => "Summer (Dec-Feb)",
            Season::Autumn => "Autumn (Mar-May)",
            Season::Winter => "Winter (Jun-Aug)",
            Season::Spring => "Spring (Sep-Nov)",
        }
    }

    /// Typical build duration when work starts in this season.
    pub fn duration_weeks(&self) -> u32 {
        match self {
            Season::Spring => 6,
            Season::Summer | Season::Autumn => 7,
            Season::Winter => 10,
        }
    }

    pub fn weather_considerations(&self) -> &'static str {
        match self {
            Season::Summer => {
                "Heat and afternoon storms: pour concrete early in the day, cure it \
                 under wet cover and keep pumps ready for flooded excavations."
            }
            Season::Autumn => {
                "Stable weather with cooling nights: good conditions for the shell, \
                 finish tiling before the first frosts."
            }
            Season::Winter => {
                "Cold and wet ground slow excavation and curing: expect frost \
                 stoppages and protect fresh concrete and adhesives below 5 °C."
            }
            Season::Spring => {
                "Best window: mild temperatures and dry soil allow continuous work \
                 and the pool is ready for summer."
            }
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Advice for a construction start month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalRecommendation {
    /// Season of the requested month
    pub season: Season,
    /// Recommended start months (constant)
    pub best_months: Vec<Month>,
    /// Estimated construction duration
    pub duration_weeks: u32,
    /// Advisory text for the season
    pub weather_considerations: String,
}

impl SeasonalRecommendation {
    /// Whether `month` is one of the recommended start months.
    pub fn is_best_month(&self, month: Month) -> bool {
        self.best_months.contains(&month)
    }
}

/// Stateless season lookup.
pub struct SeasonalAdvisor;

impl SeasonalAdvisor {
    pub fn recommend(current_month: Month) -> SeasonalRecommendation {
        let season = Season::of(current_month);
        SeasonalRecommendation {
            season,
            best_months: BEST_MONTHS.to_vec(),
            duration_weeks: season.duration_weeks(),
            weather_considerations: season.weather_considerations().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Month::January, Season::Summer, 7)]
    #[test_case(Month::February, Season::Summer, 7)]
    #[test_case(Month::March, Season::Autumn, 7)]
    #[test_case(Month::May, Season::Autumn, 7)]
    #[test_case(Month::June, Season::Winter, 10)]
    #[test_case(Month::August, Season::Winter, 10)]
    #[test_case(Month::September, Season::Spring, 6)]
    #[test_case(Month::November, Season::Spring, 6)]
    #[test_case(Month::December, Season::Summer, 7)]
    fn test_month_lookup(month: Month, season: Season, weeks: u32) {
        let rec = SeasonalAdvisor::recommend(month);
        assert_eq!(rec.season, season);
        assert_eq!(rec.duration_weeks, weeks);
        assert_eq!(rec.weather_considerations, season.weather_considerations());
    }

    #[test]
    fn test_best_months_constant() {
        let july = SeasonalAdvisor::recommend(Month::July);
        let october = SeasonalAdvisor::recommend(Month::October);
        assert_eq!(july.best_months, october.best_months);
        assert_eq!(july.best_months.len(), 6);
        assert!(october.is_best_month(Month::October));
        assert!(!july.is_best_month(Month::July));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(
            SeasonalAdvisor::recommend(Month::April),
            SeasonalAdvisor::recommend(Month::April)
        );
    }
}
